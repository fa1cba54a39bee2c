//! The transactional statement sequencer: opens a warehouse connection,
//! disables auto-commit, runs a strategy's fixed statement sequence under
//! per-statement timeouts, and commits or rolls back.

pub mod connection;
pub mod error;
pub mod executor;
pub mod stl;

pub use error::WarehouseError;
pub use executor::{execute, with_connection};
pub use stl::{query_recent_errors, StlLoadError};
