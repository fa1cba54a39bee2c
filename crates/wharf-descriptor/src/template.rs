//! `{{ENV_VAR}}` placeholder substitution — the templating helper spec.md §6
//! marks as an out-of-scope collaborator but trivial to implement directly.

use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("undefined environment variable referenced in template: {0}")]
    UndefinedVar(String),
    #[error("unterminated `{{{{` placeholder in template: {0}")]
    Unterminated(String),
}

/// Replaces every `{{NAME}}` occurrence in `input` with the value of `NAME`
/// looked up in `env`. Fails if a referenced variable is undefined or a
/// placeholder is never closed.
pub fn render(input: &str, env: &HashMap<String, String>) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            return Err(TemplateError::Unterminated(input.to_string()));
        };
        let name = after_open[..end].trim();
        let value = env
            .get(name)
            .ok_or_else(|| TemplateError::UndefinedVar(name.to_string()))?;
        out.push_str(value);
        rest = &after_open[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn substitutes_single_placeholder() {
        let out = render("postgres://{{HOST}}/db", &env(&[("HOST", "warehouse.local")])).unwrap();
        assert_eq!(out, "postgres://warehouse.local/db");
    }

    #[test]
    fn substitutes_multiple_placeholders() {
        let out = render(
            "{{USER}}:{{PASS}}@host",
            &env(&[("USER", "a"), ("PASS", "b")]),
        )
        .unwrap();
        assert_eq!(out, "a:b@host");
    }

    #[test]
    fn passes_through_plain_text() {
        let out = render("no placeholders here", &env(&[])).unwrap();
        assert_eq!(out, "no placeholders here");
    }

    #[test]
    fn errors_on_undefined_var() {
        let err = render("{{MISSING}}", &env(&[])).unwrap_err();
        assert_eq!(err, TemplateError::UndefinedVar("MISSING".to_string()));
    }

    #[test]
    fn errors_on_unterminated_placeholder() {
        let err = render("{{OPEN", &env(&[])).unwrap_err();
        assert!(matches!(err, TemplateError::Unterminated(_)));
    }
}
