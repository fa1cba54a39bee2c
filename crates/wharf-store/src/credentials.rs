//! COPY auth resolution: the warehouse's `COPY ... IAM_ROLE '...'` /
//! `COPY ... CREDENTIALS '...'` clause needs a credential of its own,
//! independent of whatever credentials the object-store client itself used to
//! list/read/write objects.

use std::env;

use crate::error::StoreError;

const IAM_ROLE_VAR: &str = "BLUESHIFT_S3_IAM_ROLE";
const ACCESS_KEY_VAR: &str = "AWS_ACCESS_KEY_ID";
const SECRET_KEY_VAR: &str = "AWS_SECRET_ACCESS_KEY";

/// The auth mode a `COPY` statement should use, resolved from the process
/// environment at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyAuthMode {
    IamRole(String),
    StaticCredentials {
        access_key_id: String,
        secret_access_key: String,
    },
}

/// Resolves the COPY auth mode: an IAM role ARN takes priority over static
/// credentials, matching the two-link chain spec.md §6 describes.
pub fn resolve_copy_auth() -> Result<CopyAuthMode, StoreError> {
    if let Ok(role) = env::var(IAM_ROLE_VAR) {
        if !role.is_empty() {
            return Ok(CopyAuthMode::IamRole(role));
        }
    }

    match (env::var(ACCESS_KEY_VAR), env::var(SECRET_KEY_VAR)) {
        (Ok(access_key_id), Ok(secret_access_key))
            if !access_key_id.is_empty() && !secret_access_key.is_empty() =>
        {
            Ok(CopyAuthMode::StaticCredentials {
                access_key_id,
                secret_access_key,
            })
        }
        _ => Err(StoreError::MissingCredentials),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn clear_all() {
        unsafe {
            env::remove_var(IAM_ROLE_VAR);
            env::remove_var(ACCESS_KEY_VAR);
            env::remove_var(SECRET_KEY_VAR);
        }
    }

    #[test]
    fn iam_role_takes_priority_over_static_credentials() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        unsafe {
            env::set_var(IAM_ROLE_VAR, "arn:aws:iam::123:role/wharf");
            env::set_var(ACCESS_KEY_VAR, "AKIA");
            env::set_var(SECRET_KEY_VAR, "secret");
        }

        let mode = resolve_copy_auth().unwrap();
        assert_eq!(mode, CopyAuthMode::IamRole("arn:aws:iam::123:role/wharf".to_string()));
        clear_all();
    }

    #[test]
    fn falls_back_to_static_credentials_when_no_iam_role() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        unsafe {
            env::set_var(ACCESS_KEY_VAR, "AKIA");
            env::set_var(SECRET_KEY_VAR, "secret");
        }

        let mode = resolve_copy_auth().unwrap();
        assert_eq!(
            mode,
            CopyAuthMode::StaticCredentials {
                access_key_id: "AKIA".to_string(),
                secret_access_key: "secret".to_string(),
            }
        );
        clear_all();
    }

    #[test]
    fn missing_both_sources_is_an_error() {
        let _guard = ENV_LOCK.lock().unwrap();
        clear_all();
        assert!(matches!(resolve_copy_auth(), Err(StoreError::MissingCredentials)));
    }
}
