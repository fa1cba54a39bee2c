use thiserror::Error;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("actor mailbox closed")]
    MailboxClosed,

    #[error("object-store error: {0}")]
    Store(#[from] wharf_store::StoreError),

    #[error("descriptor error: {0}")]
    Descriptor(#[from] wharf_descriptor::error::DescriptorError),

    #[error("load error: {0}")]
    Load(#[from] wharf_loader::LoadError),

    #[error("status-store error: {0}")]
    Status(#[from] wharf_core::StatusError),

    #[error("invalid key-pattern regex `{0}`: {1}")]
    InvalidKeyPattern(String, String),
}
