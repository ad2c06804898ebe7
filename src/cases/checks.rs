//! Validation helpers shared by the case modules.
//!
//! Every helper returns `Err(CaseFailure)` with the message that ends up in
//! the recorded `TestResult` details.

use reqwest::StatusCode;
use serde_json::{Map, Value};
use std::ops::RangeInclusive;
use thiserror::Error;

use crate::client::{ApiResponse, TransportError};

/// Longest slice of a response body quoted in a failure message
const BODY_EXCERPT_LEN: usize = 200;

/// Why a case did not pass
#[derive(Debug, Error)]
pub enum CaseFailure {
    /// Nothing usable came back
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A body that should have been JSON was not
    #[error("malformed response body: {0}")]
    Decode(String),

    #[error("Expected HTTP {expected}, got {actual}{}", excerpt_suffix(.body))]
    UnexpectedStatus {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("{0}")]
    Assertion(String),
}

impl CaseFailure {
    pub fn assertion(message: impl Into<String>) -> Self {
        CaseFailure::Assertion(message.into())
    }

    /// Transport and decode faults, as opposed to a backend that answered wrongly
    pub fn is_fault(&self) -> bool {
        matches!(self, CaseFailure::Transport(_) | CaseFailure::Decode(_))
    }
}

fn excerpt_suffix(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    let excerpt: String = body.chars().take(BODY_EXCERPT_LEN).collect();
    if body.chars().count() > BODY_EXCERPT_LEN {
        format!(": {}...", excerpt)
    } else {
        format!(": {}", excerpt)
    }
}

/// A passing case: what to print and what to keep in the log
#[derive(Debug, Clone)]
pub struct Verdict {
    pub details: String,
    pub response_data: Option<Value>,
}

impl Verdict {
    pub fn new(details: impl Into<String>) -> Self {
        Self {
            details: details.into(),
            response_data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.response_data = Some(data);
        self
    }
}

pub type CaseResult = Result<Verdict, CaseFailure>;

/// Loose JSON truthiness: `null`, `false`, `0`, `""`, `[]` and `{}` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Truthiness of `value[key]`; a missing key is falsy
pub fn truthy_key(value: &Value, key: &str) -> bool {
    value.get(key).map_or(false, is_truthy)
}

/// Require `expected` status, then parse the body as JSON
pub fn expect_json(response: &ApiResponse, expected: StatusCode) -> Result<Value, CaseFailure> {
    expect_status(response, expected)?;
    response
        .json()
        .map_err(|e| CaseFailure::Decode(e.to_string()))
}

pub fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<(), CaseFailure> {
    if response.status != expected {
        return Err(CaseFailure::UnexpectedStatus {
            expected: expected.as_u16(),
            actual: response.status.as_u16(),
            body: response.body.clone(),
        });
    }
    Ok(())
}

/// Require a truthy `success` flag and truthy `key`, returning `body[key]`
pub fn envelope<'a>(body: &'a Value, key: &str) -> Result<&'a Value, CaseFailure> {
    if !truthy_key(body, "success") || !truthy_key(body, key) {
        return Err(CaseFailure::assertion("Invalid response structure"));
    }
    Ok(&body[key])
}

/// Names from `fields` that `object` does not carry
pub fn missing_fields(object: &Value, fields: &[&str]) -> Vec<String> {
    fields
        .iter()
        .filter(|f| object.get(**f).is_none())
        .map(|f| f.to_string())
        .collect()
}

/// Require every key in `fields`; `what` names the object in the message
pub fn require_fields(object: &Value, fields: &[&str], what: &str) -> Result<(), CaseFailure> {
    let missing = missing_fields(object, fields);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CaseFailure::assertion(format!(
            "Missing {} fields: {:?}",
            what, missing
        )))
    }
}

/// Require an array with at least `min` items
pub fn require_min_items<'a>(
    value: &'a Value,
    min: usize,
    what: &str,
) -> Result<&'a Vec<Value>, CaseFailure> {
    let items = value
        .as_array()
        .ok_or_else(|| CaseFailure::assertion(format!("Expected {} to be a list", what)))?;
    if items.len() < min {
        return Err(CaseFailure::assertion(format!(
            "Expected >={} {}, got {}",
            min,
            what,
            items.len()
        )));
    }
    Ok(items)
}

/// Length of an array value, 0 for anything else
pub fn array_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}

pub fn is_non_empty_array(value: &Value) -> bool {
    value.as_array().map_or(false, |a| !a.is_empty())
}

pub fn non_empty_object(value: &Value) -> Option<&Map<String, Value>> {
    value.as_object().filter(|o| !o.is_empty())
}

/// Require a number inside `range`
pub fn require_in_range(
    value: &Value,
    range: RangeInclusive<f64>,
    what: &str,
) -> Result<f64, CaseFailure> {
    match value.as_f64() {
        Some(v) if range.contains(&v) => Ok(v),
        _ => Err(CaseFailure::assertion(format!("Invalid {}: {}", what, value))),
    }
}

/// Negative-path contract: 404 with a falsy `success` flag
pub fn expect_not_found(response: &ApiResponse, what: &str) -> CaseResult {
    if response.status != StatusCode::NOT_FOUND {
        return Err(CaseFailure::assertion(format!(
            "Expected 404, got {}",
            response.status.as_u16()
        )));
    }
    let body = response
        .json()
        .map_err(|e| CaseFailure::Decode(e.to_string()))?;
    if truthy_key(&body, "success") {
        return Err(CaseFailure::assertion(format!(
            "Should return success=false for {}",
            what
        )));
    }
    Ok(Verdict::new(format!("Correctly returned 404 for {}", what)).with_data(body))
}

/// Render a JSON scalar without quotes for details lines
pub fn text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
