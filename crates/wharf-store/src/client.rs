//! Thin wrapper around `aws_sdk_s3::Client` providing the leaf-directory
//! discovery, manifest upload, and object move/delete operations wharf's
//! watcher and loader need.

use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;
use wharf_model::manifest::{CopyManifest, UploadedManifest};

use crate::error::StoreError;

/// A handle to a single S3-compatible bucket.
#[derive(Clone)]
pub struct ObjectStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl ObjectStore {
    /// Builds an `ObjectStore` against `bucket`, resolving credentials and
    /// region from the default `aws-config` provider chain (env vars,
    /// instance profile, shared config file, in that order).
    pub async fn connect(bucket: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = aws_sdk_s3::Client::new(&config);
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Builds an `ObjectStore` from an already-constructed SDK client, for
    /// tests that point at a local S3-compatible endpoint.
    pub fn from_client(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Lists the keys of every object directly under `prefix` (non-recursive
    /// — delimited on `/`), one page of common-prefixes and contents at a
    /// time.
    pub async fn list_under(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        let mut continuation_token = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .delimiter("/");
            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|err| StoreError::List(err.to_string()))?;

            for object in response.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }

            if response.is_truncated().unwrap_or(false) {
                continuation_token = response.next_continuation_token().map(str::to_string);
            } else {
                break;
            }
        }

        Ok(keys)
    }

    /// Walks the prefix tree rooted at `root_prefix` and returns every
    /// "leaf" directory — one with no sub-prefixes of its own — as a
    /// trailing-slash-terminated key. A load directory is always a leaf:
    /// producers never nest one load directory inside another.
    pub async fn find_leaf_directories(&self, root_prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut leaves = Vec::new();
        let mut frontier = vec![root_prefix.to_string()];

        while let Some(prefix) = frontier.pop() {
            let children = self.list_common_prefixes(&prefix).await?;
            if children.is_empty() {
                if prefix != root_prefix {
                    leaves.push(prefix);
                }
            } else {
                frontier.extend(children);
            }
        }

        Ok(leaves)
    }

    async fn list_common_prefixes(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut children = Vec::new();
        let mut continuation_token = None;

        loop {
            let mut request = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix)
                .delimiter("/");
            if let Some(token) = continuation_token.take() {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|err| StoreError::List(err.to_string()))?;

            for common_prefix in response.common_prefixes() {
                if let Some(p) = common_prefix.prefix() {
                    children.push(p.to_string());
                }
            }

            if response.is_truncated().unwrap_or(false) {
                continuation_token = response.next_continuation_token().map(str::to_string);
            } else {
                break;
            }
        }

        Ok(children)
    }

    /// Reads an object's body and decodes it as UTF-8, used for the
    /// `manifest.edn` descriptor file.
    pub async fn get_object_text(&self, key: &str) -> Result<String, StoreError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| StoreError::Get { key: key.to_string(), source: err.to_string() })?;

        let bytes = output
            .body
            .collect()
            .await
            .map_err(|err| StoreError::Get { key: key.to_string(), source: err.to_string() })?
            .into_bytes();

        String::from_utf8(bytes.to_vec()).map_err(|_| StoreError::NotUtf8(key.to_string()))
    }

    /// Uploads `content` as the body of `key`, overwriting anything already
    /// there. Used to place descriptors and data files ahead of a load
    /// cycle.
    pub async fn put_object_text(&self, key: &str, content: &str) -> Result<(), StoreError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(content.as_bytes().to_vec()))
            .send()
            .await
            .map_err(|err| StoreError::Put { key: key.to_string(), source: err.to_string() })?;
        Ok(())
    }

    pub async fn delete_object(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| StoreError::Delete { key: key.to_string(), source: err.to_string() })?;
        Ok(())
    }

    /// Copies `src_key` to `dst_key` within the same bucket, then deletes the
    /// source — used to move processed data files and descriptors out of a
    /// load directory on cleanup.
    pub async fn copy_object(&self, src_key: &str, dst_key: &str) -> Result<(), StoreError> {
        let copy_source = format!("{}/{}", self.bucket, src_key);
        self.client
            .copy_object()
            .bucket(&self.bucket)
            .copy_source(&copy_source)
            .key(dst_key)
            .send()
            .await
            .map_err(|err| StoreError::Copy {
                src: src_key.to_string(),
                dst: dst_key.to_string(),
                source: err.to_string(),
            })?;

        self.delete_object(src_key).await
    }

    /// Uploads a COPY manifest as a uniquely-keyed JSON object under
    /// `.manifests/` and returns both its key (for later deletion) and the
    /// `s3://` URL the `COPY ... manifest` statement should reference.
    pub async fn put_manifest(&self, manifest: &CopyManifest) -> Result<UploadedManifest, StoreError> {
        let key = format!(".manifests/{}.manifest", Uuid::new_v4());
        let body = serde_json::to_vec(manifest)?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|err| StoreError::Put { key: key.clone(), source: err.to_string() })?;

        let url = format!("s3://{}/{}", self.bucket, key);
        Ok(UploadedManifest { key, url })
    }
}
