//! # Repository Module
//!
//! Database repository implementations for the fruit store.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  FruitService (fruit-service)                                          │
//! │       │                                                                 │
//! │       │  db.fruits().adjust_quantity(7, -3)                            │
//! │       ▼                                                                 │
//! │  FruitRepository                                                       │
//! │  ├── insert / update / delete                                          │
//! │  ├── find_by_id / find_all / find_by_field                             │
//! │  ├── search_by_name / find_by_price_range / find_low_stock             │
//! │  └── set_quantity / adjust_quantity (single statement)                 │
//! │       │                                                                 │
//! │       │  SQL → FruitRow → TryFrom → Fruit                              │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is exactly one entity, so the repository is a concrete type rather
//! than a generic trait.
//!
//! ## Available Repositories
//!
//! - [`FruitRepository`](fruit::FruitRepository) - Fruit CRUD, lookups and stock

pub mod fruit;
