//! Discovers new load directories under a bucket: repeated leaf-directory
//! enumeration, filtered by the configured key-pattern regex, diffed
//! against the monotonically-growing set of directories ever seen, emitted
//! onto the [`KeyWatcherSpawner`](crate::spawner::KeyWatcherSpawner)'s
//! mailbox.

use std::collections::HashSet;
use std::time::Duration;

use regex::Regex;
use tokio_util::sync::CancellationToken;
use wharf_store::ObjectStore;

use crate::spawner::SpawnerMsg;
use crate::actor::ActorRef;

/// Runs the discovery loop until `cancel_token` fires. New directory
/// batches are sent to `spawner`; a closed mailbox (the spawner stopped)
/// also ends the loop.
///
/// Per spec.md §9's open question, directories that disappear or stop
/// matching are never removed from the known set — there is no
/// corresponding "stop watching" signal.
pub async fn run(
    store: ObjectStore,
    root_prefix: String,
    key_pattern: Regex,
    poll_interval_seconds: u64,
    spawner: ActorRef<SpawnerMsg>,
    cancel_token: CancellationToken,
) {
    let mut known: HashSet<String> = HashSet::new();

    loop {
        if cancel_token.is_cancelled() {
            break;
        }

        match store.find_leaf_directories(&root_prefix).await {
            Ok(leaves) => {
                let matching: HashSet<String> = leaves.into_iter().filter(|leaf| key_pattern.is_match(leaf)).collect();
                let new: Vec<String> = matching.difference(&known).cloned().collect();

                if !new.is_empty() {
                    for dir in &new {
                        known.insert(dir.clone());
                    }
                    if spawner.send(SpawnerMsg::NewDirectories(new)).await.is_err() {
                        break;
                    }
                }
            }
            Err(err) => {
                tracing::warn!(%err, "bucket leaf-directory enumeration failed");
            }
        }

        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = tokio::time::sleep(Duration::from_secs(poll_interval_seconds)) => {}
        }
    }

    tracing::info!("bucket watcher stopped");
}
