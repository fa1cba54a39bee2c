#![allow(dead_code)]

use crate::warehouse_client;

/// DDL for the target table most scenarios load into.
pub const EVENTS_TABLE_DDL: &str = r#"
    CREATE TABLE public.events (
        id int PRIMARY KEY,
        v text,
        update_ts timestamp
    );
"#;

/// `stl_load_errors` isn't a real system table outside Redshift; tests that
/// exercise the S5 branch create a stand-in with the columns wharf-warehouse
/// queries.
pub const STL_LOAD_ERRORS_TABLE_DDL: &str = r#"
    CREATE TABLE stl_load_errors (
        query bigint,
        filename text,
        line_number int,
        colname text,
        err_reason text
    );
"#;

pub fn merge_descriptor_edn(jdbc_url: &str) -> String {
    format!(
        r#"{{:table "events" :schema "public" :jdbc-url "{jdbc_url}"
            :username "wharf" :password "wharf" :columns ["id" "v"] :full-columns ["id" "v"]
            :pk-columns ["id"] :pk-nulls [] :data-pattern ".*\\.gz" :strategy merge}}"#
    )
}

pub fn replace_descriptor_edn(jdbc_url: &str) -> String {
    format!(
        r#"{{:table "events" :schema "public" :jdbc-url "{jdbc_url}"
            :username "wharf" :password "wharf" :columns ["id" "v"] :full-columns ["id" "v"]
            :data-pattern ".*\\.gz" :strategy replace}}"#
    )
}

pub async fn row_count(table: &str) -> i64 {
    let client = warehouse_client().await;
    let row = client
        .query_one(&format!("SELECT count(*) FROM {table}"), &[])
        .await
        .expect("count rows");
    row.get(0)
}

pub async fn table_exists(table: &str) -> bool {
    let client = warehouse_client().await;
    let row = client
        .query_one(
            "SELECT EXISTS (SELECT 1 FROM information_schema.tables WHERE table_name = $1)",
            &[&table],
        )
        .await
        .expect("check table existence");
    row.get(0)
}
