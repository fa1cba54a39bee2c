//! A `Statement` wraps any renderable AST node so a strategy loader's
//! fixed sequence (create-staging, COPY, merge, drop-staging, …) can be
//! built as a single `Vec<Statement>` and rendered uniformly.

use crate::ast::copy::Copy;
use crate::ast::ddl::{AlterTableDropColumn, CreateTableAsSelect, CreateTableLike, DropTable, Truncate};
use crate::ast::dml::{DeleteNullHash, DeleteUsingMaxRowNum, InsertAntiJoin, InsertUnconditional, Merge};
use crate::dialect::Dialect;
use crate::renderer::{Render, Renderer};

#[derive(Debug, Clone)]
pub enum Statement {
    CreateStaging(CreateTableLike),
    Copy(Copy),
    Truncate(Truncate),
    Drop(DropTable),
    CreateRnums(CreateTableAsSelect),
    DedupRnums(DeleteUsingMaxRowNum),
    DropRowNum(AlterTableDropColumn),
    Merge(Merge),
    DeleteNullHash(DeleteNullHash),
    InsertAntiJoin(InsertAntiJoin),
    InsertUnconditional(InsertUnconditional),
}

impl Statement {
    pub fn to_sql(&self, dialect: &dyn Dialect) -> String {
        let mut r = Renderer::new(dialect);
        match self {
            Statement::CreateStaging(s) => s.render(&mut r),
            Statement::Copy(s) => s.render(&mut r),
            Statement::Truncate(s) => s.render(&mut r),
            Statement::Drop(s) => s.render(&mut r),
            Statement::CreateRnums(s) => s.render(&mut r),
            Statement::DedupRnums(s) => s.render(&mut r),
            Statement::DropRowNum(s) => s.render(&mut r),
            Statement::Merge(s) => s.render(&mut r),
            Statement::DeleteNullHash(s) => s.render(&mut r),
            Statement::InsertAntiJoin(s) => s.render(&mut r),
            Statement::InsertUnconditional(s) => s.render(&mut r),
        }
        r.finish()
    }

    /// A short label for logging (`create-staging`, `merge`, …) matching
    /// the statement-library names in the load-cycle spec.
    pub fn label(&self) -> &'static str {
        match self {
            Statement::CreateStaging(_) => "create-staging",
            Statement::Copy(_) => "copy-from-object-store",
            Statement::Truncate(_) => "truncate",
            Statement::Drop(_) => "drop",
            Statement::CreateRnums(_) => "create-rnums",
            Statement::DedupRnums(_) => "dedup-rnums",
            Statement::DropRowNum(_) => "drop-row-num",
            Statement::Merge(_) => "merge-from-rnums",
            Statement::DeleteNullHash(_) => "delete-null-hash",
            Statement::InsertAntiJoin(_) => "append-from-staging",
            Statement::InsertUnconditional(_) => "add-from-staging",
        }
    }
}

pub fn render_all(statements: &[Statement], dialect: &dyn Dialect) -> Vec<String> {
    statements.iter().map(|s| s.to_sql(dialect)).collect()
}
