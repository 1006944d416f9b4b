//! # fruit-service: Domain Service for the Fruit Store
//!
//! Validation, stock rules and configuration on top of `fruit-db`.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Startup Sequence                                     │
//! │                                                                         │
//! │  1. StoreConfig::from_env()   FRUIT_DB_PATH, FRUIT_LOG, ...            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. init_tracing(&config)     binaries only                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. FruitService::open(&config)                                        │
//! │       │   └── Database::new → pool + migrations                        │
//! │       ▼                                                                 │
//! │  4. UI glue calls service.create / adjust_stock / get_all ...          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! use fruit_service::{init_tracing, FruitService, StoreConfig};
//!
//! let config = StoreConfig::from_env()?;
//! init_tracing(&config);
//!
//! let service = FruitService::open(&config).await?;
//! let low = service.get_low_stock_default().await?;
//! ```

pub mod config;
pub mod error;
pub mod service;

pub use config::{ConfigError, StoreConfig, DEFAULT_LOG_FILTER};
pub use error::{ServiceError, ServiceResult};
pub use service::FruitService;

use tracing_subscriber::EnvFilter;

/// Initializes the tracing subscriber for logging.
///
/// ## Log Levels
/// - ERROR: Failed operations (validation or storage)
/// - WARN: Recoverable issues
/// - INFO: Mutations (create, update, delete, stock)
/// - DEBUG: Repository calls and SQL-level detail
///
/// ## Configuration
/// Uses `config.log_filter` (from `FRUIT_LOG`). An unparsable filter falls
/// back to [`DEFAULT_LOG_FILTER`].
pub fn init_tracing(config: &StoreConfig) {
    let filter = EnvFilter::try_new(&config.log_filter)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
