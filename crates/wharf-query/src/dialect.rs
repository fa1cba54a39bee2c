//! Defines the `Dialect` trait for database-specific SQL syntax. wharf only
//! ever targets Redshift, but the trait is kept separate from the renderer
//! the way the teacher's query builder keeps it — a seam for the `Postgres`
//! dialect the warehouse's staging/status-db connections also speak.

pub trait Dialect: Send + Sync {
    /// Wraps an identifier (table, column, or alias) in the dialect's
    /// quoting convention.
    fn quote_identifier(&self, ident: &str) -> String;

    fn name(&self) -> &'static str;
}

/// Amazon Redshift, which is wire- and mostly syntax-compatible with
/// PostgreSQL but adds `COPY … manifest`, `MERGE`, and `getdate()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Redshift;

impl Dialect for Redshift {
    /// Returns `ident` unchanged. Per spec.md §9's design note on
    /// statement-identifier interpolation, the existing descriptor corpus
    /// expects bare identifiers in rendered SQL; quoting here would be a
    /// behavioral divergence, not a hardening.
    fn quote_identifier(&self, ident: &str) -> String {
        ident.to_string()
    }

    fn name(&self) -> &'static str {
        "Redshift"
    }
}
