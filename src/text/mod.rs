//! Text normalization
//!
//! Pure string transforms applied to prompts before they are sent and to
//! model output before it is returned.

mod join;
mod prompt;
mod response;

pub use join::{coerce_to_string, join_responses};
pub use prompt::{normalize_prompt, normalize_prompt_value, PROMPT_TERMINATORS};
pub use response::{
    clean_whitespace_and_punctuation, strip_leading_artifacts, truncate_at_turn_keyword,
    TURN_KEYWORDS,
};

use serde_json::Value;
use thiserror::Error;

/// Text normalization errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TextError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

/// Short JSON type name used in error messages
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
