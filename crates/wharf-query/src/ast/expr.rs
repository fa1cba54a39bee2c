//! A small expression AST — just enough to build the join predicates and
//! column lists the warehouse statement library needs. Unlike a general
//! query-builder, wharf never binds runtime parameters into these
//! statements (Redshift's `COPY`/`MERGE`/`DELETE` text is built fresh per
//! load cycle from descriptor data already in hand), so there is no
//! parameter placeholder machinery here — only literal rendering.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or table-qualified column identifier, e.g. `t.id`.
    Identifier(Ident),

    /// A single-quoted string literal, escaped on render.
    StringLiteral(String),

    /// A SQL fragment copied through verbatim, e.g. `getdate()` or `NULL`.
    Raw(String),

    /// A binary comparison or logical operation.
    BinaryOp(Box<BinaryOp>),

    /// A function call, e.g. `COALESCE(a, b)` or `MAX(row_num)`.
    FunctionCall(FunctionCall),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub qualifier: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOp {
    pub left: Expr,
    pub op: BinaryOperator,
    pub right: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: String,
    pub args: Vec<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Eq,
    NotEq,
    And,
    Or,
    In,
    Is,
}

pub fn ident(name: &str) -> Expr {
    Expr::Identifier(Ident { qualifier: None, name: name.to_string() })
}

pub fn qualified_ident(qualifier: &str, name: &str) -> Expr {
    Expr::Identifier(Ident { qualifier: Some(qualifier.to_string()), name: name.to_string() })
}

pub fn raw(fragment: impl Into<String>) -> Expr {
    Expr::Raw(fragment.into())
}

pub fn and_all(mut exprs: Vec<Expr>) -> Expr {
    let mut iter = exprs.drain(..);
    let Some(first) = iter.next() else {
        return raw("TRUE");
    };
    iter.fold(first, |acc, next| {
        Expr::BinaryOp(Box::new(BinaryOp { left: acc, op: BinaryOperator::And, right: next }))
    })
}
