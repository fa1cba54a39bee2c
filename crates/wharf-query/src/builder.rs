//! Assembles AST nodes for the warehouse statement library from a
//! descriptor's fields. Credential resolution and manifest upload happen
//! upstream (in `wharf-store`/`wharf-loader`); everything here is pure.

use crate::ast::common::TableRef;
use crate::ast::copy::{Copy, CopyAuth};
use crate::ast::ddl::{AlterTableDropColumn, CreateTableAsSelect, CreateTableLike, DropTable, Truncate};
use crate::ast::dml::{DeleteNullHash, DeleteUsingMaxRowNum, InsertAntiJoin, InsertUnconditional, Merge, MergeColumn};
use crate::ast::expr::{and_all, qualified_ident, raw, BinaryOp, BinaryOperator, Expr, FunctionCall};
use wharf_model::descriptor::StagingSelect;

pub const STAGING_SUFFIX: &str = "_staging";
pub const RNUMS_SUFFIX: &str = "_rnums";

pub fn staging_table(target: &TableRef) -> TableRef {
    TableRef::new(format!("{}{STAGING_SUFFIX}", target.name))
}

pub fn rnums_table(target: &TableRef) -> TableRef {
    TableRef::new(format!("{}{RNUMS_SUFFIX}", target.name))
}

pub fn build_create_staging(target: &TableRef) -> CreateTableLike {
    CreateTableLike { table: staging_table(target), like: target.clone() }
}

pub fn build_copy(
    staging: &TableRef,
    columns: &[String],
    manifest_url: String,
    auth: CopyAuth,
    options: &[String],
) -> Copy {
    Copy {
        table: staging.clone(),
        columns: columns.to_vec(),
        manifest_url,
        auth,
        options: options.to_vec(),
    }
}

pub fn build_truncate(target: &TableRef) -> Truncate {
    Truncate { table: target.clone() }
}

pub fn build_drop(table: &TableRef) -> DropTable {
    DropTable { table: table.clone() }
}

/// Renders a `staging-select` policy into a `SELECT` body string usable as
/// the `CreateTableAsSelect`/`InsertUnconditional` select source.
pub fn render_staging_select(staging: &TableRef, policy: &StagingSelect) -> String {
    let table_literal = staging.name.clone();
    match policy {
        StagingSelect::Default => format!("SELECT * FROM {table_literal}"),
        StagingSelect::Distinct => format!("SELECT DISTINCT * FROM {table_literal}"),
        StagingSelect::DistinctHash => {
            format!("SELECT *, MAX(hash) AS hash FROM {table_literal} GROUP BY * EXCLUDING (hash)")
        }
        StagingSelect::Template(template) => template.replace("{{table}}", &table_literal),
    }
}

/// `CREATE TEMPORARY TABLE <t>_rnums AS SELECT row_number() OVER (PARTITION BY 1) AS row_num, <staging-select-body>`.
/// `staging_select` governs the body the row number is computed over, so a
/// `distinct`/`distinct-hash`/template policy on the descriptor reaches the
/// dedup pass rather than being silently dropped.
pub fn build_create_rnums(staging: &TableRef, target: &TableRef, staging_select: &StagingSelect) -> CreateTableAsSelect {
    let select_body = match staging_select {
        StagingSelect::Default => format!(
            "SELECT row_number() OVER (PARTITION BY 1) AS row_num, * FROM {}",
            staging.name
        ),
        other => {
            let body = render_staging_select(staging, other);
            format!(
                "SELECT row_number() OVER (PARTITION BY 1) AS row_num, * FROM ({body}) AS wharf_staging_select"
            )
        }
    };
    CreateTableAsSelect { table: rnums_table(target), select_body }
}

pub fn build_dedup_rnums(target: &TableRef, pk_columns: &[String]) -> DeleteUsingMaxRowNum {
    DeleteUsingMaxRowNum { table: rnums_table(target), pk_columns: pk_columns.to_vec() }
}

pub fn build_drop_row_num(target: &TableRef) -> AlterTableDropColumn {
    AlterTableDropColumn { table: rnums_table(target), column: "row_num".to_string() }
}

/// Builds the single `MERGE INTO <target> USING <rnums> ON …` statement.
/// For primary-key columns listed in `pk_nulls`, the join compares
/// `COALESCE(col, '')` on both sides rather than a direct equality, so that
/// two NULL keys are treated as equal. `update_ts`, if present in
/// `full_columns`, is projected as `getdate()` rather than copied from the
/// source row.
pub fn build_merge(target: &TableRef, pk_columns: &[String], pk_nulls: &[String], full_columns: &[String]) -> Merge {
    let rnums = rnums_table(target);

    let join_predicate = and_all(
        pk_columns
            .iter()
            .map(|col| {
                if pk_nulls.contains(col) {
                    Expr::BinaryOp(Box::new(BinaryOp {
                        left: Expr::FunctionCall(FunctionCall {
                            name: "COALESCE".into(),
                            args: vec![qualified_ident("t", col), Expr::StringLiteral(String::new())],
                        }),
                        op: BinaryOperator::Eq,
                        right: Expr::FunctionCall(FunctionCall {
                            name: "COALESCE".into(),
                            args: vec![qualified_ident("s", col), Expr::StringLiteral(String::new())],
                        }),
                    }))
                } else {
                    Expr::BinaryOp(Box::new(BinaryOp {
                        left: qualified_ident("t", col),
                        op: BinaryOperator::Eq,
                        right: qualified_ident("s", col),
                    }))
                }
            })
            .collect(),
    );

    let columns = full_columns
        .iter()
        .map(|col| MergeColumn {
            name: col.clone(),
            source_expr: if col == "update_ts" { raw("getdate()") } else { qualified_ident("s", col) },
        })
        .collect();

    Merge {
        target: target.clone(),
        target_alias: "t".to_string(),
        source: rnums,
        source_alias: "s".to_string(),
        join_predicate,
        columns,
    }
}

/// `-customer` variant groups on `partner_order_id` instead of `report_date`.
pub fn build_delete_null_hash(
    target: &TableRef,
    staging: &TableRef,
    customer_variant: bool,
    data_sources: Option<&[String]>,
) -> DeleteNullHash {
    let first_column = if customer_variant { "partner_order_id" } else { "report_date" };
    DeleteNullHash {
        target: target.clone(),
        staging: staging.clone(),
        group_columns: vec![
            first_column.to_string(),
            "data_source".to_string(),
            "data_type".to_string(),
            "partner_company_id".to_string(),
        ],
        data_sources: data_sources.map(|sources| sources.to_vec()),
    }
}

pub fn build_append(target: &TableRef, staging: &TableRef, columns: &[String], pk_columns: &[String]) -> InsertAntiJoin {
    InsertAntiJoin {
        target: target.clone(),
        staging: staging.clone(),
        columns: columns.to_vec(),
        keys: pk_columns.to_vec(),
    }
}

pub fn build_add(target: &TableRef, staging: &TableRef, staging_select: &StagingSelect) -> InsertUnconditional {
    InsertUnconditional {
        target: target.clone(),
        select_body: render_staging_select(staging, staging_select),
    }
}
