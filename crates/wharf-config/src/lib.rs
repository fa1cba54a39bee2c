//! Loads the application config file (`config.edn`, default
//! `./etc/config.edn`) via `wharf-descriptor`'s EDN reader, grounded on the
//! teacher's `cli::env::EnvManager` file-loading shape, generalized from
//! "parse `.env` KEY=VALUE lines" to "parse an EDN document".

pub mod error;

use std::path::Path;

pub use error::ConfigError;
use wharf_model::config::Config;

pub const DEFAULT_CONFIG_PATH: &str = "./etc/config.edn";

/// Reads and validates the config file at `path`, applying `{{NAME}}`
/// env-var templating to its contents first so placeholders referenced
/// anywhere in the document (the `status-db` connection fields, in
/// practice) resolve the same way a descriptor's do.
pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let env_vars: std::collections::HashMap<String, String> = std::env::vars().collect();
    let content = wharf_descriptor::template::render(&content, &env_vars).map_err(|source| ConfigError::Template {
        path: path.display().to_string(),
        source,
    })?;

    wharf_descriptor::config::parse_and_validate(&content).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn loads_a_well_formed_config_file() {
        let mut file = tempfile_with_content(
            r#"{:s3 {:bucket "b" :key-pattern "prod/.*" :poll-interval-seconds 30}}"#,
        );
        let config = load(file.path()).unwrap();
        assert_eq!(config.s3.bucket, "b");
        file.close().unwrap();
    }

    #[test]
    fn surfaces_a_read_error_for_a_missing_path() {
        let err = load("/nonexistent/path/config.edn").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn renders_env_var_placeholders_before_parsing() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("WHARF_TEST_BUCKET", "prod-events");
        }

        let mut file = tempfile_with_content(
            r#"{:s3 {:bucket "{{WHARF_TEST_BUCKET}}" :key-pattern "prod/.*" :poll-interval-seconds 30}}"#,
        );
        let config = load(file.path()).unwrap();
        assert_eq!(config.s3.bucket, "prod-events");
        file.close().unwrap();

        unsafe {
            std::env::remove_var("WHARF_TEST_BUCKET");
        }
    }

    #[test]
    fn surfaces_a_template_error_for_an_undefined_placeholder() {
        let _guard = ENV_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var("WHARF_TEST_UNDEFINED");
        }

        let mut file = tempfile_with_content(
            r#"{:s3 {:bucket "{{WHARF_TEST_UNDEFINED}}" :key-pattern "prod/.*" :poll-interval-seconds 30}}"#,
        );
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Template { .. }));
        file.close().unwrap();
    }

    fn tempfile_with_content(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }
}
