//! Reads and validates a `manifest.edn` descriptor document.

use crate::edn::{self, EdnValue};
use crate::error::DescriptorError;
use regex::Regex;
use wharf_model::descriptor::{Descriptor, ExecuteOpts, StagingSelect, Strategy};

/// Parses and validates a descriptor document, applying the invariants from
/// spec.md §3: non-empty `columns`, `pk-columns` required for merge-family
/// strategies and `append`, `pk-nulls ⊆ pk-columns`, and a compiling
/// `data-pattern` regex.
pub fn parse_and_validate(input: &str) -> Result<Descriptor, DescriptorError> {
    let root = edn::parse(input)?;

    let table = required_str(&root, "table")?.to_string();
    let schema = optional_str(&root, "schema").map(str::to_string);
    let jdbc_url = required_str(&root, "jdbc-url")?.to_string();
    let username = required_str(&root, "username")?.to_string();
    let password = required_str(&root, "password")?.to_string();

    let columns = string_vec(&root, "columns").unwrap_or_default();
    if columns.is_empty() {
        return Err(DescriptorError::EmptyColumns);
    }
    let full_columns = string_vec(&root, "full-columns").unwrap_or_default();
    let pk_columns = string_vec(&root, "pk-columns").unwrap_or_default();
    let pk_nulls = string_vec(&root, "pk-nulls").unwrap_or_default();

    for col in &pk_nulls {
        if !pk_columns.contains(col) {
            return Err(DescriptorError::PkNullsNotSubset(col.clone()));
        }
    }

    let data_pattern = required_str(&root, "data-pattern")?.to_string();
    Regex::new(&data_pattern)
        .map_err(|e| DescriptorError::InvalidRegex(data_pattern.clone(), e.to_string()))?;

    let strategy = match root.get("strategy") {
        Some(v) => {
            let name = v.as_str().ok_or_else(|| DescriptorError::WrongShape {
                field: "strategy",
                detail: "expected a keyword or symbol".into(),
            })?;
            Strategy::from_str(name).ok_or_else(|| DescriptorError::UnknownStrategy(name.to_string()))?
        }
        None => Strategy::default(),
    };

    if strategy.requires_pk() && pk_columns.is_empty() {
        return Err(DescriptorError::MissingPkColumns {
            strategy: strategy.as_str(),
        });
    }

    let options = string_vec(&root, "options").unwrap_or_default();
    let staging_select = parse_staging_select(&root)?;
    let delete_null_hash_merge_data_sources = root
        .get("delete-null-hash-merge-data-sources")
        .filter(|v| !v.is_nil())
        .map(|v| {
            v.as_string_vec().ok_or_else(|| DescriptorError::WrongShape {
                field: "delete-null-hash-merge-data-sources",
                detail: "expected a vector of strings".into(),
            })
        })
        .transpose()?;
    let add_status = root.get("add-status").and_then(|v| v.as_bool()).unwrap_or(false);
    let data_sources = root
        .get("data-sources")
        .filter(|v| !v.is_nil())
        .map(|v| {
            v.as_string_vec().ok_or_else(|| DescriptorError::WrongShape {
                field: "data-sources",
                detail: "expected a vector of strings".into(),
            })
        })
        .transpose()?;

    let execute_opts = parse_execute_opts(&root);

    Ok(Descriptor {
        table,
        schema,
        jdbc_url,
        username,
        password,
        columns,
        full_columns,
        pk_columns,
        pk_nulls,
        data_pattern,
        strategy,
        options,
        staging_select,
        delete_null_hash_merge_data_sources,
        add_status,
        data_sources,
        execute_opts,
    })
}

fn parse_staging_select(root: &EdnValue) -> Result<StagingSelect, DescriptorError> {
    match root.get("staging-select") {
        None => Ok(StagingSelect::Default),
        Some(v) if v.is_nil() => Ok(StagingSelect::Default),
        Some(EdnValue::String(s)) => Ok(StagingSelect::Template(s.clone())),
        Some(EdnValue::Symbol(s)) if s == "distinct" => Ok(StagingSelect::Distinct),
        Some(EdnValue::Symbol(s)) if s == "distinct-hash" => Ok(StagingSelect::DistinctHash),
        Some(_) => Err(DescriptorError::WrongShape {
            field: "staging-select",
            detail: "expected a template string, `distinct`, or `distinct-hash`".into(),
        }),
    }
}

fn parse_execute_opts(root: &EdnValue) -> ExecuteOpts {
    let mut opts = ExecuteOpts::default();
    if let Some(block) = root.get("execute-opts") {
        if let Some(ms) = block.get("timeout-millis").and_then(|v| v.as_u64()) {
            opts.timeout_millis = ms;
        }
        if let Some(log) = block.get("statement-log").and_then(|v| v.as_bool()) {
            opts.statement_log = log;
        }
    }
    opts
}

fn required_str<'a>(root: &'a EdnValue, field: &'static str) -> Result<&'a str, DescriptorError> {
    root.get(field)
        .and_then(EdnValue::as_str)
        .ok_or(DescriptorError::MissingField(field))
}

fn optional_str<'a>(root: &'a EdnValue, field: &'static str) -> Option<&'a str> {
    root.get(field).filter(|v| !v.is_nil()).and_then(EdnValue::as_str)
}

fn string_vec(root: &EdnValue, field: &'static str) -> Option<Vec<String>> {
    root.get(field).and_then(EdnValue::as_string_vec)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(strategy: &str) -> String {
        format!(
            r#"{{:table "events" :schema "public" :jdbc-url "jdbc:redshift://{{{{HOST}}}}/db"
                :username "u" :password "p" :columns ["id" "v"] :full-columns ["id" "v"]
                :pk-columns ["id"] :pk-nulls [] :data-pattern ".*\\.gz" :strategy {strategy}
                :options [] :add-status true}}"#
        )
    }

    #[test]
    fn parses_valid_merge_descriptor() {
        let d = parse_and_validate(&sample("merge")).unwrap();
        assert_eq!(d.strategy, Strategy::Merge);
        assert_eq!(d.qualified_table(), "public.events");
        assert!(d.add_status);
    }

    #[test]
    fn defaults_strategy_to_merge_when_absent() {
        let doc = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :pk-columns ["id"] :data-pattern ".*"}"#;
        let d = parse_and_validate(doc).unwrap();
        assert_eq!(d.strategy, Strategy::Merge);
    }

    #[test]
    fn rejects_merge_without_pk_columns() {
        let doc = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :pk-columns [] :data-pattern ".*" :strategy merge}"#;
        let err = parse_and_validate(doc).unwrap_err();
        assert!(matches!(err, DescriptorError::MissingPkColumns { .. }));
    }

    #[test]
    fn rejects_pk_nulls_not_subset_of_pk_columns() {
        let doc = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :pk-columns ["id"] :pk-nulls ["other"] :data-pattern ".*" :strategy merge}"#;
        let err = parse_and_validate(doc).unwrap_err();
        assert!(matches!(err, DescriptorError::PkNullsNotSubset(_)));
    }

    #[test]
    fn rejects_invalid_regex() {
        let doc = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :pk-columns ["id"] :data-pattern "(" :strategy merge}"#;
        let err = parse_and_validate(doc).unwrap_err();
        assert!(matches!(err, DescriptorError::InvalidRegex(_, _)));
    }

    #[test]
    fn replace_and_add_do_not_require_pk_columns() {
        let doc = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :data-pattern ".*" :strategy replace}"#;
        assert!(parse_and_validate(doc).is_ok());
    }

    #[test]
    fn parses_staging_select_variants() {
        let distinct = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :pk-columns ["id"] :data-pattern ".*" :staging-select distinct}"#;
        assert_eq!(
            parse_and_validate(distinct).unwrap().staging_select,
            StagingSelect::Distinct
        );

        let templ = r#"{:table "t" :jdbc-url "u" :username "u" :password "p"
            :columns ["id"] :pk-columns ["id"] :data-pattern ".*" :staging-select "SELECT * FROM {{table}}"}"#;
        assert_eq!(
            parse_and_validate(templ).unwrap().staging_select,
            StagingSelect::Template("SELECT * FROM {{table}}".to_string())
        );
    }
}
