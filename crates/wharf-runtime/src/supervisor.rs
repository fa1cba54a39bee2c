//! Wires a bucket's `BucketWatcher` task to its `KeyWatcherSpawner`,
//! sharing one `CancellationToken` so a single `stop()` call tears down the
//! whole hierarchy for one bucket.

use std::sync::Arc;

use regex::Regex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wharf_core::{Metrics, StatusStore};
use wharf_model::config::S3Config;
use wharf_store::ObjectStore;

use crate::bucket_watcher;
use crate::error::RuntimeError;
use crate::key_watcher::KeyWatcherConfig;
use crate::spawner::KeyWatcherSpawner;

pub struct Watchers {
    bucket_watcher: JoinHandle<()>,
    spawner: KeyWatcherSpawner,
}

impl Watchers {
    /// Starts the BucketWatcher and KeyWatcherSpawner for `s3_config`,
    /// rooted at the bucket's top level.
    pub fn start(
        store: ObjectStore,
        status_store: Arc<dyn StatusStore>,
        metrics: Metrics,
        s3_config: &S3Config,
        cancel_token: CancellationToken,
    ) -> Result<Self, RuntimeError> {
        let key_pattern = Regex::new(&s3_config.key_pattern)
            .map_err(|err| RuntimeError::InvalidKeyPattern(s3_config.key_pattern.clone(), err.to_string()))?;

        let watcher_config = KeyWatcherConfig {
            poll_interval_seconds: s3_config.poll_interval_seconds,
            poll_interval_random_seconds: s3_config.poll_interval_random_seconds,
        };

        let spawner =
            KeyWatcherSpawner::spawn(store.clone(), status_store, metrics, watcher_config, cancel_token.clone());
        let spawner_ref = spawner.actor_ref();

        let bucket_watcher = tokio::spawn(bucket_watcher::run(
            store,
            String::new(),
            key_pattern,
            s3_config.poll_interval_seconds,
            spawner_ref,
            cancel_token,
        ));

        Ok(Self { bucket_watcher, spawner })
    }

    /// Cancels the shared token, which the BucketWatcher and every
    /// KeyWatcher observe at their next suspension point, then joins all of
    /// them.
    pub async fn stop(self) {
        self.spawner.stop().await;
        if let Err(err) = self.bucket_watcher.await {
            tracing::warn!(%err, "bucket watcher task panicked");
        }
    }
}
