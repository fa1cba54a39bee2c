use crate::edn::EdnError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("malformed descriptor document: {0}")]
    Edn(#[from] EdnError),

    #[error("descriptor is missing required field `{0}`")]
    MissingField(&'static str),

    #[error("descriptor field `{field}` has the wrong shape: {detail}")]
    WrongShape { field: &'static str, detail: String },

    #[error("descriptor field `strategy` has unknown value `{0}`")]
    UnknownStrategy(String),

    #[error("strategy `{strategy}` requires at least one pk-column")]
    MissingPkColumns { strategy: &'static str },

    #[error("pk-nulls must be a subset of pk-columns; `{0}` is not a pk-column")]
    PkNullsNotSubset(String),

    #[error("data-pattern `{0}` does not compile as a regular expression: {1}")]
    InvalidRegex(String, String),

    #[error("`columns` must be non-empty")]
    EmptyColumns,
}
