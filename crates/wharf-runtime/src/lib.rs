//! The watcher hierarchy: a `BucketWatcher` discovers load directories, a
//! `KeyWatcherSpawner` starts one `KeyWatcher` per directory, and each
//! `KeyWatcher` drives that directory's load-cycle state machine.

pub mod actor;
pub mod bucket_watcher;
pub mod cycle;
pub mod error;
pub mod key_watcher;
pub mod spawner;
pub mod supervisor;

pub use cycle::CycleContext;
pub use error::RuntimeError;
pub use key_watcher::KeyWatcherConfig;
pub use spawner::{KeyWatcherSpawner, SpawnerMsg};
pub use supervisor::Watchers;
