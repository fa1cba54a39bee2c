//! Defines the core rendering trait and context for converting AST nodes
//! into SQL text.

use crate::ast::common::TableRef;
use crate::ast::expr::{BinaryOperator, Expr, FunctionCall};
use crate::dialect::Dialect;

pub mod copy;
pub mod ddl;
pub mod dml;

/// A trait for any AST node that can be rendered into SQL text.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates SQL text during rendering, with access to the dialect for
/// identifier quoting.
pub struct Renderer<'a> {
    pub sql: String,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self { sql: String::new(), dialect }
    }

    pub fn finish(self) -> String {
        self.sql
    }

    pub fn render_table_ref(&mut self, table: &TableRef) {
        if let Some(schema) = &table.schema {
            self.sql.push_str(&self.dialect.quote_identifier(schema));
            self.sql.push('.');
        }
        self.sql.push_str(&self.dialect.quote_identifier(&table.name));
    }

    pub fn render_column_list(&mut self, columns: &[String]) {
        self.sql.push('(');
        for (i, col) in columns.iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            self.sql.push_str(&self.dialect.quote_identifier(col));
        }
        self.sql.push(')');
    }
}

impl Render for Expr {
    fn render(&self, r: &mut Renderer) {
        match self {
            Expr::Identifier(id) => {
                if let Some(qualifier) = &id.qualifier {
                    r.sql.push_str(&r.dialect.quote_identifier(qualifier));
                    r.sql.push('.');
                }
                r.sql.push_str(&r.dialect.quote_identifier(&id.name));
            }
            Expr::StringLiteral(s) => {
                r.sql.push('\'');
                r.sql.push_str(&s.replace('\'', "''"));
                r.sql.push('\'');
            }
            Expr::Raw(fragment) => r.sql.push_str(fragment),
            Expr::BinaryOp(op) => {
                r.sql.push('(');
                op.left.render(r);
                r.sql.push_str(match op.op {
                    BinaryOperator::Eq => " = ",
                    BinaryOperator::NotEq => " <> ",
                    BinaryOperator::And => " AND ",
                    BinaryOperator::Or => " OR ",
                    BinaryOperator::In => " IN ",
                    BinaryOperator::Is => " IS ",
                });
                op.right.render(r);
                r.sql.push(')');
            }
            Expr::FunctionCall(FunctionCall { name, args }) => {
                r.sql.push_str(name);
                r.sql.push('(');
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        r.sql.push_str(", ");
                    }
                    arg.render(r);
                }
                r.sql.push(')');
            }
        }
    }
}
