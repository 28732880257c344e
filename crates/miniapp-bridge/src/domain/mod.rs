//! Domain layer: request correlation, configuration, outcomes, and errors.

pub mod config;
pub mod correlation;
pub mod error;
pub mod pending;
pub mod types;

pub use config::{BridgeConfig, ConfigError};
pub use correlation::RequestId;
pub use error::{codes, BridgeError, BridgeResult};
pub use pending::{cleanup_task, BridgeStats, PendingTable};
pub use types::{TransactionError, TransactionResult};
