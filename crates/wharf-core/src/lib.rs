//! Ambient glue shared across wharf's crates: process-wide metrics and the
//! status-tracking side database. Carried as part of the ambient stack per
//! SPEC_FULL.md even though its collaborators are out of spec.md's core
//! scope.

pub mod metrics;
pub mod status;

pub use metrics::Metrics;
pub use status::{PostgresStatusStore, StatusError, StatusStore};
