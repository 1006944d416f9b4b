//! # fruit-core: Pure Business Logic for the Fruit Store
//!
//! Record types, raw-input parsing and validation rules for the fruit
//! inventory. Nothing in here touches a database, a file or a socket.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Fruit Store Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              UI glue (dashboard / desktop forms)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ FruitFields (raw dictionary)           │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                fruit-service (FruitService)                     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fruit-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │  fields   │  │ validation│                  │   │
//! │  │   │   Fruit   │  │FruitFields│  │   rules   │                  │   │
//! │  │   │ NewFruit  │  │  builder  │  │  parsing  │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fruit-db (Database Layer)                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Fruit, NewFruit, FruitPatch, CategorySummary)
//! - [`fields`] - Raw, loosely typed field dictionary supplied by UI glue
//! - [`validation`] - Business rule validation
//! - [`error`] - Validation error types
//!
//! ## Example Usage
//!
//! ```rust
//! use fruit_core::fields::FruitFields;
//! use fruit_core::validation::validate_new_fruit;
//!
//! let fields = FruitFields::new()
//!     .name("Apple")
//!     .category("Fresh Fruits")
//!     .price(1.99)
//!     .quantity(100);
//!
//! let fruit = validate_new_fruit(&fields).unwrap();
//! assert_eq!(fruit.quantity, 100);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod fields;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationErrors};
pub use fields::FruitFields;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Minimum length (in characters, after trimming) of a fruit name.
pub const MIN_NAME_LEN: usize = 2;

/// Minimum length (in characters, after trimming) of a category label.
pub const MIN_CATEGORY_LEN: usize = 2;

/// Stock level below which a fruit counts as "low stock" unless the
/// caller configures another threshold.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;
