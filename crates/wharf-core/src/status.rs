//! The status-tracking side database: stamps each data file with a
//! lifecycle label (`pending`, `transferred`, `processing`, `upserted`,
//! `failed`) as the load cycle advances. Out of spec.md's core scope as a
//! collaborator, but its interface is specified in §6 ("exactly one row
//! updated per call") and implemented here, grounded on the teacher's
//! `connectors::sql::postgres` adapter.

use async_trait::async_trait;
use thiserror::Error;
use tokio_postgres::NoTls;
use wharf_model::status::StatusLabel;

#[derive(Debug, Error)]
pub enum StatusError {
    #[error("invalid status-db jdbc url `{0}`")]
    InvalidJdbcUrl(String),

    #[error("failed to connect to status database: {0}")]
    Connect(#[source] tokio_postgres::Error),

    #[error("status update failed: {0}")]
    Query(#[from] tokio_postgres::Error),

    #[error("expected exactly one row updated for `{file_url}`, got {rows}")]
    NotExactlyOneRow { file_url: String, rows: u64 },
}

/// Parses a `jdbc:<scheme>://host[:port]/dbname[?query]` URL into a
/// tokio-postgres `Config`. Duplicated in miniature from
/// `wharf-warehouse::connection::build_config` since wharf-core can't
/// depend on wharf-warehouse (the dependency runs the other way).
fn build_config(jdbc_url: &str, username: &str, password: &str) -> Result<tokio_postgres::Config, StatusError> {
    let invalid = || StatusError::InvalidJdbcUrl(jdbc_url.to_string());

    let rest = jdbc_url.strip_prefix("jdbc:").unwrap_or(jdbc_url);
    let after_scheme = rest.splitn(2, "://").nth(1).ok_or_else(invalid)?;
    let (hostport_and_db, _query) = match after_scheme.split_once('?') {
        Some((a, b)) => (a, Some(b)),
        None => (after_scheme, None),
    };
    let (hostport, dbname) = hostport_and_db.split_once('/').ok_or_else(invalid)?;
    if dbname.is_empty() {
        return Err(invalid());
    }
    let (host, port) = match hostport.split_once(':') {
        Some((h, p)) => (h, p.parse::<u16>().map_err(|_| invalid())?),
        None => (hostport, 5439),
    };
    if host.is_empty() {
        return Err(invalid());
    }

    let mut config = tokio_postgres::Config::new();
    config.host(host).port(port).dbname(dbname).user(username).password(password);
    Ok(config)
}

/// Stamps a file's lifecycle label in the status-tracking side database.
/// A no-op implementation is used when `status-db` is absent from config or
/// `add-status` is false on the descriptor.
#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn stamp(&self, file_url: &str, label: StatusLabel) -> Result<(), StatusError>;
}

/// Disables lifecycle stamping entirely. Used when the config's
/// `status-db` block is absent, per spec.md §6.
pub struct NoopStatusStore;

#[async_trait]
impl StatusStore for NoopStatusStore {
    async fn stamp(&self, _file_url: &str, _label: StatusLabel) -> Result<(), StatusError> {
        Ok(())
    }
}

pub struct PostgresStatusStore {
    client: tokio_postgres::Client,
    schema: String,
    table: String,
}

impl PostgresStatusStore {
    pub async fn connect(
        jdbc_url: &str,
        username: &str,
        password: &str,
        schema: &str,
        table: &str,
    ) -> Result<Self, StatusError> {
        let config = build_config(jdbc_url, username, password)?;
        let (client, connection) = config.connect(NoTls).await.map_err(StatusError::Connect)?;

        tokio::spawn(async move {
            if let Err(err) = connection.await {
                tracing::error!(%err, "status-db connection error");
            }
        });

        Ok(Self { client, schema: schema.to_string(), table: table.to_string() })
    }
}

#[async_trait]
impl StatusStore for PostgresStatusStore {
    async fn stamp(&self, file_url: &str, label: StatusLabel) -> Result<(), StatusError> {
        let statement = format!(
            "UPDATE {}.{} SET status = $1 WHERE file_url = $2",
            self.schema, self.table
        );
        let rows = self.client.execute(&statement, &[&label.as_str(), &file_url]).await?;
        if rows != 1 {
            return Err(StatusError::NotExactlyOneRow { file_url: file_url.to_string(), rows });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn noop_store_accepts_any_stamp() {
        let store = NoopStatusStore;
        assert!(store.stamp("s3://b/t/a.gz", StatusLabel::Processing).await.is_ok());
    }
}
