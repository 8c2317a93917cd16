//! Optional-criteria filters rendered as `WHERE` fragments.
//!
//! A filter evaluates its criteria in a fixed order. Each active criterion adds
//! one condition, and criteria that bind a value take the next placeholder, so
//! `$i` always binds `values[i - 1]` no matter which criteria are present.

mod company;
mod job;


pub use company::CompanyFilter;
pub use job::{JobFilter, build_job_filter};

use crate::error::{JoblyError, JoblyResult};
use crate::value::Value;

/// A rendered `WHERE` fragment and the values bound to its placeholders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WhereClause {
    /// `" WHERE a AND b"`, or empty when no criteria apply.
    pub fragment: String,
    pub values: Vec<Value>,
}

impl WhereClause {
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }
}

/// Collects conditions and their bound values in evaluation order.
#[derive(Debug, Default)]
struct WhereBuilder {
    conditions: Vec<String>,
    values: Vec<Value>,
}

impl WhereBuilder {
    /// Add `<lhs> $n`, binding `value` to the next placeholder.
    fn push_bound(&mut self, lhs: &str, value: impl Into<Value>) {
        self.values.push(value.into());
        self.conditions.push(format!("{lhs} ${}", self.values.len()));
    }

    /// Add a condition that binds nothing.
    fn push_raw(&mut self, condition: &str) {
        self.conditions.push(condition.to_string());
    }

    fn finish(self) -> WhereClause {
        if self.conditions.is_empty() {
            return WhereClause::default();
        }
        WhereClause {
            fragment: format!(" WHERE {}", self.conditions.join(" AND ")),
            values: self.values,
        }
    }
}

/// Wrap a substring for `ILIKE` matching.
fn contains_pattern(s: &str) -> String {
    format!("%{s}%")
}

/// Parse a non-negative `INTEGER` from query-string text.
fn parse_count(name: &str, raw: &str) -> JoblyResult<i32> {
    let n: i64 = raw
        .trim()
        .parse()
        .map_err(|_| JoblyError::invalid_input(format!("{name} must be a number, got {raw:?}")))?;
    check_count(name, n)
}

/// Accept a JSON number, or a string holding one.
fn json_count(name: &str, json: &serde_json::Value) -> JoblyResult<i32> {
    match json {
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(n) => check_count(name, n),
            None => Err(JoblyError::invalid_input(format!(
                "{name} must be a whole number, got {n}"
            ))),
        },
        serde_json::Value::String(s) => parse_count(name, s),
        other => Err(JoblyError::invalid_input(format!(
            "{name} must be a number, got {other}"
        ))),
    }
}

fn check_count(name: &str, n: i64) -> JoblyResult<i32> {
    if n < 0 {
        return Err(JoblyError::invalid_input(format!(
            "{name} must not be negative, got {n}"
        )));
    }
    i32::try_from(n)
        .map_err(|_| JoblyError::invalid_input(format!("{name} is too large: {n}")))
}

fn parse_flag(name: &str, raw: &str) -> JoblyResult<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(JoblyError::invalid_input(format!(
            "{name} must be true or false, got {other:?}"
        ))),
    }
}

fn json_flag(name: &str, json: &serde_json::Value) -> JoblyResult<bool> {
    match json {
        serde_json::Value::Bool(b) => Ok(*b),
        serde_json::Value::String(s) => parse_flag(name, s),
        other => Err(JoblyError::invalid_input(format!(
            "{name} must be true or false, got {other}"
        ))),
    }
}

fn json_text(name: &str, json: &serde_json::Value) -> JoblyResult<String> {
    match json {
        serde_json::Value::String(s) => Ok(s.clone()),
        other => Err(JoblyError::invalid_input(format!(
            "{name} must be a string, got {other}"
        ))),
    }
}

/// The object form of a filter; `null` means "no criteria".
fn json_object(
    json: &serde_json::Value,
) -> JoblyResult<Option<&serde_json::Map<String, serde_json::Value>>> {
    match json {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::Object(map) => Ok(Some(map)),
        other => Err(JoblyError::invalid_input(format!(
            "filter must be an object, got {other}"
        ))),
    }
}

fn unknown_filter(key: &str) -> JoblyError {
    JoblyError::invalid_input(format!("unknown filter: {key}"))
}
