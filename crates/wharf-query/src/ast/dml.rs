//! AST for the strategy-specific DML statements: row-number dedup delete,
//! the upsert `MERGE`, the null-hash delete variants, and the two
//! staging-to-target `INSERT` shapes (`append`'s anti-join, `add`'s
//! unconditional copy).

use crate::ast::common::TableRef;
use crate::ast::expr::Expr;

/// Deletes every row from the row-number dedup table except the one with
/// `MAX(row_num)` per `pk_columns` — keeping the last-encountered row for
/// each primary key within a single load.
#[derive(Debug, Clone)]
pub struct DeleteUsingMaxRowNum {
    pub table: TableRef,
    pub pk_columns: Vec<String>,
}

/// `WHEN MATCHED`/`WHEN NOT MATCHED` column assignment: `full_columns`
/// projected onto the source row, with `update_ts` substituted for
/// `getdate()` per spec.
#[derive(Debug, Clone)]
pub struct MergeColumn {
    pub name: String,
    pub source_expr: Expr,
}

#[derive(Debug, Clone)]
pub struct Merge {
    pub target: TableRef,
    pub target_alias: String,
    pub source: TableRef,
    pub source_alias: String,
    pub join_predicate: Expr,
    pub columns: Vec<MergeColumn>,
}

/// Deletes target rows sharing a grouping key with any staging row and
/// having `hash IS NULL`. `group_columns` is
/// `[report_date|partner_order_id, data_source, data_type, partner_company_id]`
/// depending on the variant; `data_sources` optionally restricts by
/// `data_source IN (…)`.
#[derive(Debug, Clone)]
pub struct DeleteNullHash {
    pub target: TableRef,
    pub staging: TableRef,
    pub group_columns: Vec<String>,
    pub data_sources: Option<Vec<String>>,
}

/// `append`: inserts staging rows whose `keys` do not already exist in the
/// target (anti-join).
#[derive(Debug, Clone)]
pub struct InsertAntiJoin {
    pub target: TableRef,
    pub staging: TableRef,
    pub columns: Vec<String>,
    pub keys: Vec<String>,
}

/// `add`: unconditional `INSERT INTO target SELECT <select_body>`.
#[derive(Debug, Clone)]
pub struct InsertUnconditional {
    pub target: TableRef,
    pub select_body: String,
}
