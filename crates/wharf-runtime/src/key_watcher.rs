//! One long-running task per discovered directory, driving its
//! [`CycleState`] machine. Stopping is cooperative: a shared
//! `CancellationToken` stands in for the control channel spec.md §4.6
//! describes, checked at the watcher's only suspension point.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wharf_model::state::CycleState;

use crate::cycle::{self, CycleContext};

#[derive(Debug, Clone, Copy)]
pub struct KeyWatcherConfig {
    pub poll_interval_seconds: u64,
    pub poll_interval_random_seconds: u64,
}

impl KeyWatcherConfig {
    /// The next sleep duration: `poll-interval-seconds +
    /// rand()*poll-interval-random-seconds`, recomputed on every call so
    /// jitter varies per iteration and avoids thundering herds.
    fn next_delay(&self) -> Duration {
        let jitter = rand::random::<f64>() * self.poll_interval_random_seconds as f64;
        Duration::from_secs_f64(self.poll_interval_seconds as f64 + jitter)
    }
}

/// Spawns the watcher task for `ctx.directory()`. Advances the cycle state
/// machine once per loop iteration; sleeps a jittered poll interval
/// whenever the transition pauses, racing the sleep against cancellation.
pub fn spawn(ctx: CycleContext, config: KeyWatcherConfig, cancel_token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        let directory = ctx.directory().to_string();
        let mut state = CycleState::Scan;

        loop {
            if cancel_token.is_cancelled() {
                break;
            }

            let transition = cycle::advance(state, &ctx).await;
            state = transition.next;

            if transition.pause {
                tokio::select! {
                    _ = cancel_token.cancelled() => break,
                    _ = tokio::time::sleep(config.next_delay()) => {}
                }
            }
        }

        tracing::info!(directory = %directory, "key watcher stopped");
    })
}
