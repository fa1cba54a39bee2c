//! Queries the warehouse's `stl_load_errors` table, used by the directory
//! state machine's stl-load-error branch to locate the source files behind
//! a load failure that references it.

use crate::connection;
use crate::error::WarehouseError;

/// One row of `stl_load_errors`, the most recent (highest `query` id) entry
/// for a given filename.
#[derive(Debug, Clone)]
pub struct StlLoadError {
    pub filename: String,
    pub query: i64,
    pub line_number: i32,
    pub colname: String,
    pub err_reason: String,
}

/// Returns the most recent `stl_load_errors` row per filename in
/// `filenames`, one row per filename keyed by max query id.
pub async fn query_recent_errors(
    jdbc_url: &str,
    username: &str,
    password: &str,
    filenames: &[String],
) -> Result<Vec<StlLoadError>, WarehouseError> {
    let client = connection::connect(jdbc_url, username, password).await?;

    let rows = client
        .query(
            "SELECT DISTINCT ON (filename) filename, query, line_number, colname, err_reason \
             FROM stl_load_errors WHERE filename = ANY($1) ORDER BY filename, query DESC",
            &[&filenames],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| StlLoadError {
            filename: row.get("filename"),
            query: row.get("query"),
            line_number: row.get("line_number"),
            colname: row.get("colname"),
            err_reason: row.get("err_reason"),
        })
        .collect())
}
