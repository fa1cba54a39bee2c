//! Listens for SIGINT/SIGTERM and cancels the shared token that the
//! watcher hierarchy ([`wharf_runtime::Watchers`]) observes at its
//! suspension points, grounded on the teacher's
//! `cli::shutdown::ShutdownCoordinator`.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Clone)]
pub struct ShutdownCoordinator {
    cancel_token: CancellationToken,
    shutdown_requested: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    pub fn new(cancel_token: CancellationToken) -> Self {
        Self { cancel_token, shutdown_requested: Arc::new(AtomicBool::new(false)) }
    }

    pub fn register_handlers(&self) {
        let cancel_token = self.cancel_token.clone();
        let shutdown_flag = self.shutdown_requested.clone();

        tokio::spawn(async move {
            let ctrl_c = async {
                signal::ctrl_c().await.expect("failed to install SIGINT handler");
            };

            #[cfg(unix)]
            let terminate = async {
                signal::unix::signal(signal::unix::SignalKind::terminate())
                    .expect("failed to install SIGTERM handler")
                    .recv()
                    .await;
            };

            #[cfg(not(unix))]
            let terminate = std::future::pending::<()>();

            tokio::select! {
                _ = ctrl_c => info!("received SIGINT, initiating graceful shutdown"),
                _ = terminate => info!("received SIGTERM, initiating graceful shutdown"),
            }

            shutdown_flag.store(true, Ordering::SeqCst);
            cancel_token.cancel();
        });
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.shutdown_requested.load(Ordering::SeqCst)
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }
}
