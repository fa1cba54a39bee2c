use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("object-store list failed: {0}")]
    List(String),

    #[error("object-store get failed for key `{key}`: {source}")]
    Get { key: String, source: String },

    #[error("object-store put failed for key `{key}`: {source}")]
    Put { key: String, source: String },

    #[error("object-store delete failed for key `{key}`: {source}")]
    Delete { key: String, source: String },

    #[error("object-store copy failed from `{src}` to `{dst}`: {source}")]
    Copy { src: String, dst: String, source: String },

    #[error("object body for key `{0}` was not valid UTF-8")]
    NotUtf8(String),

    #[error("failed to serialize COPY manifest: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(
        "no COPY auth source available: set BLUESHIFT_S3_IAM_ROLE, or both \
         AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY"
    )]
    MissingCredentials,
}
