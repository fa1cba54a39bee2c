//! A deliberately minimal stand-in for the original's nREPL: a bare
//! line-based TCP listener on port 7979, started whenever `STAGE` is unset
//! or not `prod` (spec.md marks the remote REPL peripheral/out of scope, so
//! this only needs to expose enough to poke at a running process).

use std::env;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wharf_core::Metrics;

const PORT: u16 = 7979;

/// Starts the REPL listener unless `STAGE=prod`, returning immediately if
/// it's disabled. Runs until `cancel_token` fires.
pub async fn spawn_if_enabled(metrics: Metrics, cancel_token: CancellationToken) {
    let stage = env::var("STAGE").unwrap_or_default();
    if stage == "prod" {
        tracing::info!("STAGE=prod, remote REPL disabled");
        return;
    }

    tokio::spawn(run(metrics, cancel_token));
}

async fn run(metrics: Metrics, cancel_token: CancellationToken) {
    let listener = match TcpListener::bind(("127.0.0.1", PORT)).await {
        Ok(listener) => listener,
        Err(err) => {
            tracing::warn!(%err, port = PORT, "failed to bind remote REPL port");
            return;
        }
    };

    tracing::info!(port = PORT, "remote REPL listening");

    loop {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            accepted = listener.accept() => {
                match accepted {
                    Ok((socket, _addr)) => {
                        tokio::spawn(handle_connection(socket, metrics.clone()));
                    }
                    Err(err) => tracing::warn!(%err, "failed to accept REPL connection"),
                }
            }
        }
    }

    tracing::info!("remote REPL shutting down");
}

async fn handle_connection(socket: tokio::net::TcpStream, metrics: Metrics) {
    let (read_half, mut write_half) = socket.into_split();
    let mut lines = BufReader::new(read_half).lines();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(%err, "REPL connection read error");
                break;
            }
        };

        let response = match line.trim() {
            "ping" => "pong\n".to_string(),
            "metrics" => {
                let snapshot = metrics.snapshot();
                format!(
                    "commits={} rollbacks={} timeouts={} open_connections={}\n",
                    snapshot.commits, snapshot.rollbacks, snapshot.timeouts, snapshot.open_connections
                )
            }
            other => format!("unknown command: {other}\n"),
        };

        if write_half.write_all(response.as_bytes()).await.is_err() {
            break;
        }
    }
}
