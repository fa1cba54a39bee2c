use thiserror::Error;

#[derive(Debug, Error)]
pub enum WarehouseError {
    #[error("malformed jdbc-url `{0}`: expected `jdbc:<scheme>://host[:port]/dbname[?opts]`")]
    InvalidJdbcUrl(String),

    #[error("failed to connect to warehouse: {0}")]
    Connect(#[from] tokio_postgres::Error),

    #[error("statement `{statement}` failed: {source}")]
    Sql {
        statement: String,
        #[source]
        source: tokio_postgres::Error,
    },

    #[error("statement `{statement}` timed out after {timeout_millis}ms")]
    Timeout { statement: String, timeout_millis: u64 },
}
