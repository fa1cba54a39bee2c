//! Connection acquisition. Descriptors carry a JDBC-style URL
//! (`jdbc:redshift://host:port/dbname`); this parses the piece tokio-postgres
//! needs and connects with `NoTls` — TLS termination is out of scope, the
//! original runs inside a VPC (see DESIGN.md).

use crate::error::WarehouseError;
use tokio_postgres::{Client, Config, NoTls};

/// Parses a `jdbc:<scheme>://host[:port]/dbname[?query]` URL into a
/// tokio-postgres `Config`, applying `username`/`password` separately since
/// the descriptor carries them as distinct fields.
pub fn build_config(jdbc_url: &str, username: &str, password: &str) -> Result<Config, WarehouseError> {
    let invalid = || WarehouseError::InvalidJdbcUrl(jdbc_url.to_string());

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

    let mut config = Config::new();
    config.host(host).port(port).dbname(dbname).user(username).password(password);
    Ok(config)
}

/// Opens a connection, spawning the driver's background I/O task. The
/// returned `Client` is used both to start the transaction and to obtain a
/// `CancelToken` for in-flight statement cancellation.
pub async fn connect(jdbc_url: &str, username: &str, password: &str) -> Result<Client, WarehouseError> {
    let config = build_config(jdbc_url, username, password)?;
    let (client, connection) = config.connect(NoTls).await?;

    tokio::spawn(async move {
        if let Err(err) = connection.await {
            tracing::error!(%err, "warehouse connection error");
        }
    });

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_host_port_and_dbname() {
        let config = build_config("jdbc:redshift://warehouse.example:5439/analytics", "u", "p").unwrap();
        assert_eq!(config.get_hosts().len(), 1);
        assert_eq!(config.get_ports(), &[5439]);
        assert_eq!(config.get_dbname(), Some("analytics"));
        assert_eq!(config.get_user(), Some("u"));
    }

    #[test]
    fn defaults_port_when_absent() {
        let config = build_config("jdbc:redshift://warehouse.example/analytics", "u", "p").unwrap();
        assert_eq!(config.get_ports(), &[5439]);
    }

    #[test]
    fn ignores_trailing_query_string() {
        let config = build_config("jdbc:redshift://h:5439/db?sslmode=require", "u", "p").unwrap();
        assert_eq!(config.get_dbname(), Some("db"));
    }

    #[test]
    fn rejects_missing_scheme() {
        assert!(build_config("not-a-url", "u", "p").is_err());
    }

    #[test]
    fn rejects_missing_dbname() {
        assert!(build_config("jdbc:redshift://host:5439/", "u", "p").is_err());
    }
}
