use std::process;
use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{info, Level};
use wharf_core::{Metrics, NoopStatusStore, PostgresStatusStore, StatusStore};
use wharf_runtime::Watchers;
use wharf_store::ObjectStore;

use crate::error::CliError;
use crate::shutdown::ShutdownCoordinator;

mod error;
mod repl;
mod shutdown;

/// Watches an S3-compatible bucket for directories of data files and loads
/// them into a Redshift warehouse table as described by each directory's
/// manifest descriptor.
#[derive(Parser)]
#[command(name = "wharf", version = "0.1.0", about = "Object-store to warehouse ingestion daemon")]
struct Cli {
    /// Path to the application config file (s3 bucket, key pattern, poll
    /// interval, optional status-db block).
    #[arg(short, long, default_value = wharf_config::DEFAULT_CONFIG_PATH)]
    config: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let exit_code = match run().await {
        Ok(()) => 0,
        Err(CliError::ShutdownRequested) => {
            info!("shut down gracefully");
            130
        }
        Err(err) => {
            tracing::error!(%err, "fatal error");
            1
        }
    };

    process::exit(exit_code);
}

async fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = wharf_config::load(&cli.config)?;

    let cancel_token = CancellationToken::new();
    let shutdown_coordinator = ShutdownCoordinator::new(cancel_token.clone());
    shutdown_coordinator.register_handlers();

    let store = ObjectStore::connect(config.s3.bucket.clone()).await;
    let metrics = Metrics::new();

    let status_store: Arc<dyn StatusStore> = match &config.status_db {
        Some(status_db) => Arc::new(
            PostgresStatusStore::connect(
                &status_db.jdbc_url,
                &status_db.username,
                &status_db.password,
                &status_db.schema,
                &status_db.table,
            )
            .await?,
        ),
        None => Arc::new(NoopStatusStore),
    };

    repl::spawn_if_enabled(metrics.clone(), cancel_token.clone()).await;

    let watchers = Watchers::start(store, status_store, metrics, &config.s3, cancel_token.clone())?;

    info!(bucket = %config.s3.bucket, "watcher hierarchy started");
    cancel_token.cancelled().await;

    watchers.stop().await;

    if shutdown_coordinator.is_shutdown_requested() {
        Err(CliError::ShutdownRequested)
    } else {
        Ok(())
    }
}
