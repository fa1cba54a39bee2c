//! The warehouse COPY manifest — a small JSON object uploaded to the object
//! store and referenced by a `COPY ... FROM '<url>' ... manifest` statement.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub url: String,
    pub mandatory: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyManifest {
    pub entries: Vec<ManifestEntry>,
}

impl CopyManifest {
    pub fn from_urls(urls: impl IntoIterator<Item = String>) -> Self {
        Self {
            entries: urls
                .into_iter()
                .map(|url| ManifestEntry {
                    url,
                    mandatory: true,
                })
                .collect(),
        }
    }
}

/// The result of uploading a `CopyManifest`: the object key (used to delete
/// it later) and the `s3://` URL the COPY statement consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedManifest {
    pub key: String,
    pub url: String,
}
