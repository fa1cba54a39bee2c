//! Parsing and validation for wharf's two EDN document shapes: the
//! per-directory descriptor (`manifest.edn`) and the application config
//! (`config.edn`).

pub mod config;
pub mod descriptor;
pub mod edn;
pub mod error;
pub mod template;

pub use error::DescriptorError;
