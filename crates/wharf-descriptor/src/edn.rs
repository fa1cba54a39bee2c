//! A minimal EDN reader: parses the subset of EDN that wharf's descriptor and
//! config documents use into an untyped [`EdnValue`] tree. Typed conversion
//! happens in [`crate::descriptor`] and [`crate::config`].

use pest::Parser;
use pest::iterators::Pair;
use pest_derive::Parser;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Parser)]
#[grammar = "grammar/edn.pest"]
struct EdnParser;

#[derive(Debug, Error)]
pub enum EdnError {
    #[error("failed to parse EDN document: {0}")]
    Parse(String),
    #[error("unexpected EDN value shape: {0}")]
    Shape(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum EdnValue {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    Keyword(String),
    Symbol(String),
    Vector(Vec<EdnValue>),
    /// Preserves insertion order via a side vector of keys; `BTreeMap`-backed
    /// lookups are still available through [`EdnValue::get`].
    Map(Vec<(EdnValue, EdnValue)>),
}

impl EdnValue {
    /// Look up a map value by keyword key name (without the leading `:`).
    pub fn get(&self, key: &str) -> Option<&EdnValue> {
        match self {
            EdnValue::Map(entries) => entries.iter().find_map(|(k, v)| match k {
                EdnValue::Keyword(name) if name == key => Some(v),
                _ => None,
            }),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            EdnValue::String(s) | EdnValue::Symbol(s) | EdnValue::Keyword(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            EdnValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self {
            EdnValue::Number(n) if *n >= 0.0 => Some(*n as u64),
            _ => None,
        }
    }

    pub fn as_vector(&self) -> Option<&[EdnValue]> {
        match self {
            EdnValue::Vector(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_string_vec(&self) -> Option<Vec<String>> {
        self.as_vector()?
            .iter()
            .map(|v| v.as_str().map(str::to_string))
            .collect()
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, EdnValue::Nil)
    }

    /// A flattened `BTreeMap<String, EdnValue>` view, for callers that don't
    /// care about key ordering or non-keyword keys.
    pub fn as_map(&self) -> Option<BTreeMap<String, EdnValue>> {
        match self {
            EdnValue::Map(entries) => Some(
                entries
                    .iter()
                    .filter_map(|(k, v)| k.as_str().map(|name| (name.to_string(), v.clone())))
                    .collect(),
            ),
            _ => None,
        }
    }
}

pub fn parse(input: &str) -> Result<EdnValue, EdnError> {
    let mut pairs =
        EdnParser::parse(Rule::program, input).map_err(|e| EdnError::Parse(e.to_string()))?;
    let program = pairs.next().ok_or_else(|| EdnError::Parse("empty document".into()))?;
    let value_pair = program
        .into_inner()
        .find(|p| p.as_rule() == Rule::value)
        .ok_or_else(|| EdnError::Parse("missing top-level value".into()))?;
    build_value(value_pair)
}

fn build_value(pair: Pair<Rule>) -> Result<EdnValue, EdnError> {
    debug_assert_eq!(pair.as_rule(), Rule::value);
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| EdnError::Shape("value with no inner pair".into()))?;

    match inner.as_rule() {
        Rule::map => {
            let mut entries = Vec::new();
            for pair_rule in inner.into_inner() {
                let mut parts = pair_rule.into_inner();
                let key = build_value(parts.next().ok_or_else(|| EdnError::Shape("map pair missing key".into()))?)?;
                let val = build_value(parts.next().ok_or_else(|| EdnError::Shape("map pair missing value".into()))?)?;
                entries.push((key, val));
            }
            Ok(EdnValue::Map(entries))
        }
        Rule::vector => {
            let items = inner
                .into_inner()
                .map(build_value)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(EdnValue::Vector(items))
        }
        Rule::string => {
            let raw = inner.into_inner().next().map(|p| p.as_str()).unwrap_or("");
            Ok(EdnValue::String(unescape(raw)))
        }
        Rule::keyword => Ok(EdnValue::Keyword(inner.as_str()[1..].to_string())),
        Rule::boolean => Ok(EdnValue::Bool(inner.as_str() == "true")),
        Rule::nil => Ok(EdnValue::Nil),
        Rule::number => inner
            .as_str()
            .parse::<f64>()
            .map(EdnValue::Number)
            .map_err(|e| EdnError::Shape(format!("invalid number literal: {e}"))),
        Rule::symbol => Ok(EdnValue::Symbol(inner.as_str().to_string())),
        other => Err(EdnError::Shape(format!("unexpected rule: {other:?}"))),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => {}
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flat_map() {
        let v = parse(r#"{:table "events" :columns ["id" "v"] :add-status true}"#).unwrap();
        assert_eq!(v.get("table").unwrap().as_str(), Some("events"));
        assert_eq!(
            v.get("columns").unwrap().as_string_vec().unwrap(),
            vec!["id".to_string(), "v".to_string()]
        );
        assert_eq!(v.get("add-status").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn parses_nested_map_and_nil() {
        let v = parse(r#"{:execute-opts {:timeout-millis 5000} :schema nil}"#).unwrap();
        let opts = v.get("execute-opts").unwrap();
        assert_eq!(opts.get("timeout-millis").unwrap().as_u64(), Some(5000));
        assert!(v.get("schema").unwrap().is_nil());
    }

    #[test]
    fn parses_bare_symbol() {
        let v = parse(r#"{:staging-select distinct-hash}"#).unwrap();
        assert_eq!(v.get("staging-select").unwrap().as_str(), Some("distinct-hash"));
    }

    #[test]
    fn rejects_malformed_document() {
        assert!(parse("{:table").is_err());
    }
}
