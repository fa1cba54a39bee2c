//! The application config file's data shape (`config.edn`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct S3Config {
    pub bucket: String,
    pub key_pattern: String,
    pub poll_interval_seconds: u64,
    #[serde(default)]
    pub poll_interval_random_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusDbConfig {
    pub jdbc_url: String,
    pub username: String,
    pub password: String,
    pub schema: String,
    pub table: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub s3: S3Config,
    #[serde(default)]
    pub status_db: Option<StatusDbConfig>,
}
