use serde_json::Value;

use super::{value_kind, TextError};
use crate::types::generation::Prompt;

/// Characters a prompt may already end with
pub const PROMPT_TERMINATORS: &[char] = &['.', '\n', '?', '!', ':'];

/// Normalize a prompt before it is sent to the model.
///
/// Surrounding whitespace is trimmed, except that trailing whitespace
/// containing a newline collapses to a single `\n` terminator. Text that does
/// not end in a terminator gets a `.` appended. Applying this twice gives the
/// same result as applying it once.
pub fn normalize_prompt(text: &str) -> Result<Prompt, TextError> {
    let body = text.trim_start();
    let trimmed = body.trim_end();
    if trimmed.is_empty() {
        return Err(TextError::InvalidInput("prompt is empty".into()));
    }

    let mut prompt = trimmed.to_string();
    if body[trimmed.len()..].contains('\n') {
        prompt.push('\n');
    } else if !prompt.ends_with(PROMPT_TERMINATORS) {
        prompt.push('.');
    }

    Ok(Prompt::new_unchecked(prompt))
}

/// Normalize an untyped prompt, rejecting anything that is not a string.
pub fn normalize_prompt_value(value: &Value) -> Result<Prompt, TextError> {
    match value {
        Value::String(text) => normalize_prompt(text),
        other => Err(TextError::InvalidInput(format!(
            "prompt must be a string, got {}",
            value_kind(other)
        ))),
    }
}
