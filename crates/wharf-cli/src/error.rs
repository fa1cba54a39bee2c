use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] wharf_config::ConfigError),

    #[error("failed to connect to object store: {0}")]
    Store(#[from] wharf_store::StoreError),

    #[error("failed to connect to status database: {0}")]
    Status(#[from] wharf_core::StatusError),

    #[error("failed to start watcher hierarchy: {0}")]
    Runtime(#[from] wharf_runtime::RuntimeError),

    #[error("shutdown requested")]
    ShutdownRequested,
}
