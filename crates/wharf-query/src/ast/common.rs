//! Common, reusable AST nodes shared across statement kinds.

#[derive(Debug, Clone)]
pub struct TableRef {
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { schema: None, name: name.into() }
    }

    pub fn with_schema(schema: Option<&str>, name: impl Into<String>) -> Self {
        Self { schema: schema.map(str::to_string), name: name.into() }
    }

    /// Parses `schema.table` or `table` into a `TableRef`.
    pub fn qualified(qualified: &str) -> Self {
        match qualified.split_once('.') {
            Some((schema, name)) => Self::with_schema(Some(schema), name),
            None => Self::new(qualified),
        }
    }
}
