//! `KeyWatcherSpawner`: the one component in the watcher hierarchy that
//! genuinely exchanges messages, so it is built as an [`Actor`] the way the
//! teacher's `ConsumerActor` is — a mailbox of `SpawnerMsg`, fed by the
//! `BucketWatcher`'s new-directories emissions, rather than a hand-rolled
//! channel loop.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wharf_core::{Metrics, StatusStore};
use wharf_store::ObjectStore;

use crate::actor::{spawn_actor, Actor, ActorContext, ActorRef};
use crate::cycle::CycleContext;
use crate::error::RuntimeError;
use crate::key_watcher::{self, KeyWatcherConfig};

#[derive(Debug)]
pub enum SpawnerMsg {
    NewDirectories(Vec<String>),
}

struct SpawnerActor {
    store: ObjectStore,
    status_store: Arc<dyn StatusStore>,
    metrics: Metrics,
    config: KeyWatcherConfig,
    cancel_token: CancellationToken,
    handles: Vec<JoinHandle<()>>,
}

#[async_trait]
impl Actor<SpawnerMsg> for SpawnerActor {
    async fn handle(&mut self, msg: SpawnerMsg, ctx: &ActorContext) -> Result<(), RuntimeError> {
        let SpawnerMsg::NewDirectories(directories) = msg;
        for directory in directories {
            tracing::info!(actor = ctx.name(), directory = %directory, "starting key watcher for newly discovered directory");
            let cycle_ctx = CycleContext::new(
                self.store.clone(),
                directory,
                self.status_store.clone(),
                self.metrics.clone(),
            );
            let handle = key_watcher::spawn(cycle_ctx, self.config, self.cancel_token.clone());
            self.handles.push(handle);
        }
        Ok(())
    }

    async fn on_stop(&mut self, ctx: &ActorContext) -> Result<(), RuntimeError> {
        tracing::info!(actor = ctx.name(), watchers = self.handles.len(), "spawner stopping, joining key watchers");
        self.cancel_token.cancel();
        for handle in self.handles.drain(..) {
            if let Err(err) = handle.await {
                tracing::warn!(%err, "key watcher task panicked");
            }
        }
        Ok(())
    }
}

/// A handle to the running spawner: an `ActorRef` to feed it new
/// directories, and the `CancellationToken` shared with every watcher it
/// starts, so stopping the BucketWatcher and the spawner is one signal.
pub struct KeyWatcherSpawner {
    actor_ref: ActorRef<SpawnerMsg>,
    join_handle: JoinHandle<()>,
    cancel_token: CancellationToken,
}

impl KeyWatcherSpawner {
    pub fn spawn(
        store: ObjectStore,
        status_store: Arc<dyn StatusStore>,
        metrics: Metrics,
        config: KeyWatcherConfig,
        cancel_token: CancellationToken,
    ) -> Self {
        let actor = SpawnerActor {
            store,
            status_store,
            metrics,
            config,
            cancel_token: cancel_token.clone(),
            handles: Vec::new(),
        };
        let (actor_ref, join_handle) = spawn_actor("key-watcher-spawner", 64, actor);
        Self { actor_ref, join_handle, cancel_token }
    }

    pub fn actor_ref(&self) -> ActorRef<SpawnerMsg> {
        self.actor_ref.clone()
    }

    /// Cancels every watcher the spawner started, drops its own mailbox
    /// handle so the actor's event loop ends, and joins its task.
    pub async fn stop(self) {
        self.cancel_token.cancel();
        drop(self.actor_ref);
        let _ = self.join_handle.await;
    }
}
