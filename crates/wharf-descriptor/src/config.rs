//! Reads and validates the application `config.edn` document.

use crate::edn::{self, EdnValue};
use crate::error::DescriptorError;
use wharf_model::config::{Config, S3Config, StatusDbConfig};

pub fn parse_and_validate(input: &str) -> Result<Config, DescriptorError> {
    let root = edn::parse(input)?;

    let s3_block = root.get("s3").ok_or(DescriptorError::MissingField("s3"))?;
    let s3 = S3Config {
        bucket: required_str(s3_block, "bucket")?.to_string(),
        key_pattern: required_str(s3_block, "key-pattern")?.to_string(),
        poll_interval_seconds: required_u64(s3_block, "poll-interval-seconds")?,
        poll_interval_random_seconds: s3_block
            .get("poll-interval-random-seconds")
            .and_then(EdnValue::as_u64)
            .unwrap_or(0),
    };

    let status_db = match root.get("status-db").filter(|v| !v.is_nil()) {
        Some(block) => Some(StatusDbConfig {
            jdbc_url: required_str(block, "jdbc-url")?.to_string(),
            username: required_str(block, "username")?.to_string(),
            password: required_str(block, "password")?.to_string(),
            schema: required_str(block, "schema")?.to_string(),
            table: required_str(block, "table")?.to_string(),
        }),
        None => None,
    };

    Ok(Config { s3, status_db })
}

fn required_str<'a>(block: &'a EdnValue, field: &'static str) -> Result<&'a str, DescriptorError> {
    block.get(field).and_then(EdnValue::as_str).ok_or(DescriptorError::MissingField(field))
}

fn required_u64(block: &EdnValue, field: &'static str) -> Result<u64, DescriptorError> {
    block.get(field).and_then(EdnValue::as_u64).ok_or(DescriptorError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_config_without_status_db() {
        let doc = r#"{:s3 {:bucket "b" :key-pattern "k/*" :poll-interval-seconds 30}}"#;
        let cfg = parse_and_validate(doc).unwrap();
        assert_eq!(cfg.s3.bucket, "b");
        assert_eq!(cfg.s3.poll_interval_random_seconds, 0);
        assert!(cfg.status_db.is_none());
    }

    #[test]
    fn parses_config_with_status_db() {
        let doc = r#"{:s3 {:bucket "b" :key-pattern "k/*" :poll-interval-seconds 30
                :poll-interval-random-seconds 5}
              :status-db {:jdbc-url "u" :username "u" :password "p" :schema "s" :table "t"}}"#;
        let cfg = parse_and_validate(doc).unwrap();
        assert_eq!(cfg.s3.poll_interval_random_seconds, 5);
        assert_eq!(cfg.status_db.unwrap().table, "t");
    }

    #[test]
    fn rejects_missing_s3_block() {
        let err = parse_and_validate("{}").unwrap_err();
        assert!(matches!(err, DescriptorError::MissingField("s3")));
    }
}
