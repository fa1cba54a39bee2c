//! The transactional executor: `with_connection` opens a connection with
//! auto-commit disabled and runs a fixed statement sequence, committing on
//! success and rolling back on the first failure; `execute` runs that
//! sequence one statement at a time under a per-statement timeout.

use crate::connection;
use crate::error::WarehouseError;
use std::time::Duration;
use tokio_postgres::{Client, NoTls, Transaction};
use wharf_core::Metrics;
use wharf_model::descriptor::ExecuteOpts;
use wharf_query::dialect::Dialect;
use wharf_query::statement::Statement;

/// Runs `statements` sequentially against `tx`, each under its own
/// `opts.timeout_millis` deadline. On timeout, the in-flight statement is
/// cancelled at the driver level via `cancel_token` and a
/// [`WarehouseError::Timeout`] is returned without attempting further
/// statements.
pub async fn execute(
    tx: &Transaction<'_>,
    cancel_token: &tokio_postgres::CancelToken,
    statements: &[Statement],
    dialect: &dyn Dialect,
    opts: &ExecuteOpts,
    metrics: &Metrics,
) -> Result<(), WarehouseError> {
    let timeout = Duration::from_millis(opts.timeout_millis);

    for statement in statements {
        let sql = statement.to_sql(dialect);
        if opts.statement_log {
            tracing::debug!(statement = %sql, label = statement.label(), "executing statement");
        }

        match tokio::time::timeout(timeout, tx.batch_execute(&sql)).await {
            Ok(Ok(())) => {}
            Ok(Err(source)) => return Err(WarehouseError::Sql { statement: sql, source }),
            Err(_) => {
                metrics.mark_timeout();
                if let Err(err) = cancel_token.cancel_query(NoTls).await {
                    tracing::warn!(%err, "failed to issue statement cancellation");
                }
                return Err(WarehouseError::Timeout { statement: sql, timeout_millis: opts.timeout_millis });
            }
        }
    }

    Ok(())
}

/// Opens a connection, runs `statements` inside a single transaction, and
/// commits or rolls back depending on the outcome. The open-connections
/// gauge is held for the whole call; exactly one of `mark_commit` /
/// `mark_rollback` fires.
pub async fn with_connection(
    jdbc_url: &str,
    username: &str,
    password: &str,
    statements: &[Statement],
    dialect: &dyn Dialect,
    opts: &ExecuteOpts,
    metrics: &Metrics,
) -> Result<(), WarehouseError> {
    let _open_guard = metrics.open_connection_guard();
    let mut client: Client = connection::connect(jdbc_url, username, password).await?;
    let cancel_token = client.cancel_token();

    let tx = client.transaction().await?;

    match execute(&tx, &cancel_token, statements, dialect, opts, metrics).await {
        Ok(()) => {
            tx.commit().await?;
            metrics.mark_commit();
            Ok(())
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(%rollback_err, "rollback after load failure also failed");
            }
            metrics.mark_rollback();
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `with_connection` against an unreachable host fails fast with a
    /// `Connect` error and never touches commit/rollback metrics.
    #[tokio::test]
    async fn with_connection_surfaces_connect_failure() {
        let metrics = Metrics::new();
        let opts = ExecuteOpts { timeout_millis: 100, statement_log: false };
        let dialect = wharf_query::dialect::Redshift;

        let result = with_connection(
            "jdbc:redshift://127.0.0.1:1/nonexistent",
            "u",
            "p",
            &[],
            &dialect,
            &opts,
            &metrics,
        )
        .await;

        assert!(result.is_err());
        let snap = metrics.snapshot();
        assert_eq!(snap.commits, 0);
        assert_eq!(snap.rollbacks, 0);
        assert_eq!(snap.open_connections, 0);
    }
}
