use serde_json::Value;
use thiserror::Error;

use crate::const_config::error::NON_FIELD_ERRORS_KEY;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Empty not allowed")]
    Empty,
    #[error("Maximum length exceeded. {max} allowed but found {actual}")]
    MaxExceeded { max: usize, actual: usize },
}

#[derive(Debug, Error)]
#[error("The user has not logged in")]
pub struct NotLoggedInError;

/// Turns an error body returned by the API into a single string for display
///
/// - A string is returned as is
/// - A list is joined with one item per line
/// - A map (per field validation errors) produces one line per field in the
///   order the API sent them, formatted as `field: msg1, msg2`. Messages under
///   `non_field_errors` are shown without the field prefix.
///
/// If nothing usable is found `fallback` is returned instead
pub fn flatten_error_body(body: &Value, fallback: &str) -> String {
    let result = match body {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                let text = match value {
                    Value::Array(msgs) => msgs
                        .iter()
                        .map(value_to_text)
                        .collect::<Vec<_>>()
                        .join(", "),
                    other => value_to_text(other),
                };
                if key == NON_FIELD_ERRORS_KEY {
                    text
                } else {
                    format!("{key}: {text}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Null | Value::Bool(_) | Value::Number(_) => String::new(),
    };
    if result.is_empty() {
        fallback.to_string()
    } else {
        result
    }
}

/// Same as [`flatten_error_body`] but starting from the raw response text
///
/// Text that is not valid JSON is returned as is (after trimming) unless empty
pub fn flatten_error_text(body: &str, fallback: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => flatten_error_body(&value, fallback),
        Err(_) if body.trim().is_empty() => fallback.to_string(),
        Err(_) => body.trim().to_string(),
    }
}

/// Extracts the `detail` field if the body is an object that has one
pub fn error_detail(body: &Value) -> Option<String> {
    match body.get("detail")? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::String(_) | Value::Null => None,
        other => Some(value_to_text(other)),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
