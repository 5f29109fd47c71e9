//! Generation wire types
//!
//! Request and response shapes of the inference service's `/generate` and
//! `/health` endpoints.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A normalized prompt
///
/// Only produced by [`crate::text::normalize_prompt`], so it is always
/// non-empty and ends in terminal punctuation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Prompt(String);

impl Prompt {
    pub(crate) fn new_unchecked(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of `POST /generate`
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest<'a> {
    pub text: &'a Prompt,
}

/// Decoded body of a `/generate` response
///
/// The service answers `{"text": ...}` on success and `{"detail": ...}` when
/// it reports an error. Both are kept as raw JSON until the pipeline decides
/// which one to use.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GenerationResult {
    #[serde(default)]
    pub text: Option<Value>,
    #[serde(default)]
    pub detail: Option<Value>,
}

impl GenerationResult {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(Value::String(text.into())),
            detail: None,
        }
    }

    pub fn from_detail(detail: impl Into<String>) -> Self {
        Self {
            text: None,
            detail: Some(Value::String(detail.into())),
        }
    }
}

/// Health state reported by `GET /health`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthState {
    Healthy,
    Unhealthy,
}

/// Body of a `/health` response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: HealthState,
    #[serde(default)]
    pub message: String,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthState::Healthy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let prompt = Prompt::new_unchecked("What is the capital of France?".to_string());
        let body = serde_json::to_value(GenerationRequest { text: &prompt }).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"text": "What is the capital of France?"})
        );
    }

    #[test]
    fn test_result_shapes() {
        let ok: GenerationResult = serde_json::from_str(r#"{"text": "Paris."}"#).unwrap();
        assert_eq!(ok, GenerationResult::from_text("Paris."));

        let err: GenerationResult =
            serde_json::from_str(r#"{"detail": "No text provided for generation."}"#).unwrap();
        assert_eq!(
            err,
            GenerationResult::from_detail("No text provided for generation.")
        );

        let empty: GenerationResult = serde_json::from_str("{}").unwrap();
        assert!(empty.text.is_none() && empty.detail.is_none());
    }

    #[test]
    fn test_health_status() {
        let status: HealthStatus = serde_json::from_str(
            r#"{"status": "unhealthy", "message": "LLM is not initialized. GPU may not be available."}"#,
        )
        .unwrap();
        assert_eq!(status.status, HealthState::Unhealthy);
        assert!(!status.is_healthy());
    }
}
