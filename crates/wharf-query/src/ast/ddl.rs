//! AST for the non-DML statements in a load-cycle's statement library:
//! staging creation, truncate, drop, and the row-number dedup table's
//! column drop.

use crate::ast::common::TableRef;

/// `CREATE TEMPORARY TABLE <staging> (LIKE <source> INCLUDING DEFAULTS)`.
#[derive(Debug, Clone)]
pub struct CreateTableLike {
    pub table: TableRef,
    pub like: TableRef,
}

/// `CREATE TEMPORARY TABLE <dest> AS <select_body>` — used for the
/// row-number dedup table (`<t>_rnums`).
#[derive(Debug, Clone)]
pub struct CreateTableAsSelect {
    pub table: TableRef,
    pub select_body: String,
}

/// `TRUNCATE TABLE <table>`.
#[derive(Debug, Clone)]
pub struct Truncate {
    pub table: TableRef,
}

/// `DROP TABLE <table>`.
#[derive(Debug, Clone)]
pub struct DropTable {
    pub table: TableRef,
}

/// `ALTER TABLE <table> DROP COLUMN <column>` — drops `row_num` from the
/// dedup table once it has served its purpose.
#[derive(Debug, Clone)]
pub struct AlterTableDropColumn {
    pub table: TableRef,
    pub column: String,
}
