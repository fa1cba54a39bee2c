pub mod config;
pub mod descriptor;
pub mod manifest;
pub mod state;
pub mod status;

pub use config::{Config, S3Config, StatusDbConfig};
pub use descriptor::{Descriptor, ExecuteOpts, StagingSelect, Strategy};
pub use manifest::{CopyManifest, ManifestEntry, UploadedManifest};
pub use state::{CycleState, Transition};
pub use status::StatusLabel;
