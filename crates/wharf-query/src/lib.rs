//! Builds the warehouse SQL text for each primitive in wharf's statement
//! library (staging creation, `COPY`, row-number dedup, `MERGE`, the
//! `INSERT`/`DELETE` variants, `DROP`, `TRUNCATE`) from a table descriptor,
//! via an AST + renderer + dialect split.

pub mod ast;
pub mod builder;
pub mod dialect;
pub mod renderer;
pub mod statement;

pub use statement::Statement;
