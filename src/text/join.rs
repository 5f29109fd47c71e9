use serde_json::Value;

use super::{value_kind, TextError};

/// Join a list of string responses with single spaces.
pub fn join_responses(responses: &[Value]) -> Result<String, TextError> {
    let mut parts = Vec::with_capacity(responses.len());
    for (index, item) in responses.iter().enumerate() {
        match item {
            Value::String(part) => parts.push(part.as_str()),
            other => {
                return Err(TextError::TypeMismatch(format!(
                    "expected a list of strings, element {} is a {}",
                    index,
                    value_kind(other)
                )))
            }
        }
    }
    Ok(parts.join(" "))
}

/// Accept either a single string or a list of strings from the service.
pub fn coerce_to_string(value: &Value) -> Result<String, TextError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Array(items) => join_responses(items),
        other => Err(TextError::TypeMismatch(format!(
            "expected a string or a list of strings, got {}",
            value_kind(other)
        ))),
    }
}
