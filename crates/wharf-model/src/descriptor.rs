//! The per-directory descriptor (`manifest.edn`) and its constituent types.

use serde::{Deserialize, Serialize};

/// Ingestion strategy named by a descriptor's `strategy` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    Merge,
    DeleteNullHashMerge,
    DeleteNullHashMergeCustomer,
    Replace,
    Append,
    Add,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Merge => "merge",
            Strategy::DeleteNullHashMerge => "delete-null-hash-merge",
            Strategy::DeleteNullHashMergeCustomer => "delete-null-hash-merge-customer",
            Strategy::Replace => "replace",
            Strategy::Append => "append",
            Strategy::Add => "add",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "merge" => Some(Strategy::Merge),
            "delete-null-hash-merge" => Some(Strategy::DeleteNullHashMerge),
            "delete-null-hash-merge-customer" => Some(Strategy::DeleteNullHashMergeCustomer),
            "replace" => Some(Strategy::Replace),
            "append" => Some(Strategy::Append),
            "add" => Some(Strategy::Add),
            _ => None,
        }
    }

    /// Whether this strategy requires at least one pk column.
    pub fn requires_pk(&self) -> bool {
        !matches!(self, Strategy::Replace | Strategy::Add)
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Merge
    }
}

/// The `staging-select` override controlling how rows are read back out of
/// the staging table before being merged/appended/added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StagingSelect {
    /// `SELECT * FROM <staging>`
    Default,
    /// `SELECT DISTINCT * FROM <staging>`
    Distinct,
    /// Group by every column except `hash`, taking `max(hash)`.
    DistinctHash,
    /// A literal template string containing `{{table}}`.
    Template(String),
}

impl Default for StagingSelect {
    fn default() -> Self {
        StagingSelect::Default
    }
}

/// Recognized fields of a descriptor's `execute-opts` block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteOpts {
    pub timeout_millis: u64,
    pub statement_log: bool,
}

impl Default for ExecuteOpts {
    fn default() -> Self {
        Self {
            timeout_millis: 3_600_000,
            statement_log: false,
        }
    }
}

/// A fully parsed, not-yet-validated descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Descriptor {
    pub table: String,
    pub schema: Option<String>,
    pub jdbc_url: String,
    pub username: String,
    pub password: String,
    pub columns: Vec<String>,
    pub full_columns: Vec<String>,
    pub pk_columns: Vec<String>,
    pub pk_nulls: Vec<String>,
    pub data_pattern: String,
    pub strategy: Strategy,
    pub options: Vec<String>,
    pub staging_select: StagingSelect,
    pub delete_null_hash_merge_data_sources: Option<Vec<String>>,
    pub add_status: bool,
    pub data_sources: Option<Vec<String>>,
    pub execute_opts: ExecuteOpts,
}

impl Descriptor {
    /// Fully-qualified target table, e.g. `public.events` or just `events`.
    pub fn qualified_table(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.table),
            None => self.table.clone(),
        }
    }

    /// `full_columns` defaults to `columns` when the descriptor omits it.
    pub fn full_columns_or_columns(&self) -> &[String] {
        if self.full_columns.is_empty() {
            &self.columns
        } else {
            &self.full_columns
        }
    }
}
