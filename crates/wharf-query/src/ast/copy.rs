//! AST for the warehouse's bulk-load statement:
//! `COPY <table>(<cols>) FROM '<manifest-url>' <AUTH> <options…> manifest`.

use crate::ast::common::TableRef;

#[derive(Debug, Clone)]
pub struct Copy {
    pub table: TableRef,
    pub columns: Vec<String>,
    pub manifest_url: String,
    pub auth: CopyAuth,
    /// Raw option tokens appended verbatim, in descriptor order.
    pub options: Vec<String>,
}

/// `IAM_ROLE '<role>'` when `BLUESHIFT_S3_IAM_ROLE` is set in the
/// environment, otherwise `CREDENTIALS 'aws_access_key_id=…;aws_secret_access_key=…'`
/// sourced from the credential-provider chain at call time.
#[derive(Debug, Clone)]
pub enum CopyAuth {
    IamRole(String),
    Credentials { access_key_id: String, secret_access_key: String },
}
