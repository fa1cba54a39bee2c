#![allow(dead_code)]

//! Integration tests exercising the scenarios from spec.md §8 end to end:
//! a real warehouse connection plus a real S3-compatible object store.
//! Mirrors the teacher's `engine-tests` crate, which assumes a local
//! Postgres/MySQL are already running — here a Redshift-compatible
//! Postgres and a MinIO bucket, reachable at the URLs below unless
//! overridden by env vars.

pub mod scenarios;
pub mod utils;

use std::env;
use std::sync::Arc;
use tokio_postgres::Client;
use wharf_store::ObjectStore;

const DEFAULT_JDBC_URL: &str = "jdbc:redshift://localhost:5439/wharf_test";
const DEFAULT_USERNAME: &str = "wharf";
const DEFAULT_PASSWORD: &str = "wharf";
const DEFAULT_S3_ENDPOINT: &str = "http://localhost:9000";
const DEFAULT_BUCKET: &str = "wharf-test";

fn jdbc_url() -> String {
    env::var("WHARF_TEST_JDBC_URL").unwrap_or_else(|_| DEFAULT_JDBC_URL.to_string())
}

fn username() -> String {
    env::var("WHARF_TEST_USERNAME").unwrap_or_else(|_| DEFAULT_USERNAME.to_string())
}

fn password() -> String {
    env::var("WHARF_TEST_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string())
}

fn bucket() -> String {
    env::var("WHARF_TEST_BUCKET").unwrap_or_else(|_| DEFAULT_BUCKET.to_string())
}

fn s3_endpoint() -> String {
    env::var("WHARF_TEST_S3_ENDPOINT").unwrap_or_else(|_| DEFAULT_S3_ENDPOINT.to_string())
}

pub async fn warehouse_client() -> Arc<Client> {
    let client = wharf_warehouse::connection::connect(&jdbc_url(), &username(), &password())
        .await
        .expect("connect to test warehouse");
    Arc::new(client)
}

/// Drops and recreates the `public` schema so each scenario starts from a
/// clean target table set.
pub async fn reset_warehouse_schema() {
    let client = warehouse_client().await;
    client
        .batch_execute("DROP SCHEMA public CASCADE; CREATE SCHEMA public;")
        .await
        .expect("reset warehouse schema");
}

/// An `ObjectStore` pointed at the local MinIO bucket used for tests,
/// rather than the default credential provider chain `ObjectStore::connect`
/// uses in production.
pub async fn test_object_store() -> ObjectStore {
    let credentials = aws_credential_types::Credentials::new(
        env::var("WHARF_TEST_S3_ACCESS_KEY").unwrap_or_else(|_| "wharf".to_string()),
        env::var("WHARF_TEST_S3_SECRET_KEY").unwrap_or_else(|_| "wharfsecret".to_string()),
        None,
        None,
        "wharf-tests",
    );

    let config = aws_sdk_s3::config::Builder::new()
        .behavior_version(aws_config::BehaviorVersion::latest())
        .region(aws_sdk_s3::config::Region::new("us-east-1"))
        .endpoint_url(s3_endpoint())
        .credentials_provider(credentials)
        .force_path_style(true)
        .build();

    let client = aws_sdk_s3::Client::from_conf(config);
    ObjectStore::from_client(client, bucket())
}

/// Deletes every object under `bucket()` so each scenario starts empty.
pub async fn reset_bucket() {
    let store = test_object_store().await;
    for key in store.list_under("").await.expect("list test bucket") {
        store.delete_object(&key).await.expect("clear test bucket object");
    }
}
