use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unknown strategy `{0}`")]
    UnknownStrategy(String),

    #[error("env-var templating failed for descriptor field `{field}`: {source}")]
    Template {
        field: &'static str,
        #[source]
        source: wharf_descriptor::template::TemplateError,
    },

    #[error("failed to resolve COPY credentials: {0}")]
    Credentials(#[from] wharf_store::StoreError),

    #[error(transparent)]
    Warehouse(#[from] wharf_warehouse::WarehouseError),
}
