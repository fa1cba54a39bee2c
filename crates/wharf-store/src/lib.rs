//! The object-store boundary: leaf-directory discovery, descriptor/data-file
//! reads, manifest upload, and the cleanup move/delete operations, plus COPY
//! credential resolution.

pub mod client;
pub mod credentials;
pub mod error;

pub use client::ObjectStore;
pub use credentials::{resolve_copy_auth, CopyAuthMode};
pub use error::StoreError;
