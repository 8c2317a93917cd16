//! Validation helpers used by model input structs.

use crate::error::{JoblyError, JoblyResult};
use std::sync::OnceLock;

/// Best-effort email validation.
///
/// This is intentionally not fully RFC-compliant.
pub fn is_email(s: &str) -> bool {
    static EMAIL_RE: OnceLock<regex::Regex> = OnceLock::new();
    EMAIL_RE
        .get_or_init(|| {
            regex::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid built-in email regex")
        })
        .is_match(s)
}

pub fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok()
}

/// Require a non-blank string.
pub(crate) fn require_non_blank(field: &str, value: &str) -> JoblyResult<()> {
    if value.trim().is_empty() {
        return Err(JoblyError::invalid_input(format!("{field} must not be empty")));
    }
    Ok(())
}

pub(crate) fn require_non_negative(field: &str, value: Option<i32>) -> JoblyResult<()> {
    match value {
        Some(n) if n < 0 => Err(JoblyError::invalid_input(format!(
            "{field} must not be negative, got {n}"
        ))),
        _ => Ok(()),
    }
}

pub(crate) fn require_email(field: &str, value: &str) -> JoblyResult<()> {
    if !is_email(value) {
        return Err(JoblyError::invalid_input(format!(
            "{field} is not a valid email: {value:?}"
        )));
    }
    Ok(())
}

pub(crate) fn require_url(field: &str, value: &str) -> JoblyResult<()> {
    if !is_url(value) {
        return Err(JoblyError::invalid_input(format!(
            "{field} is not a valid url: {value:?}"
        )));
    }
    Ok(())
}
