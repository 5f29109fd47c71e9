//! Prompt pipeline
//!
//! Drives one prompt through normalization, the inference call, response
//! validation, cleaning and throughput measurement.
//!
//! Callers get a fail-soft contract from [`PromptPipeline::process`]: any
//! failure is logged and turned into `None` so an interactive loop keeps
//! running. [`PromptPipeline::try_process`] exposes the typed error instead.

mod options;

pub use options::PipelineOptions;

use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

use crate::inference::{error_chain, InferenceError, TextGenerator};
use crate::performance::{PerformanceMeter, PerformanceSample};
use crate::text::{self, TextError};
use crate::types::generation::{GenerationResult, Prompt};

/// Lifecycle of a single request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PipelineState {
    Received,
    Normalized,
    Sent,
    ResponseReceived,
    Validated,
    Cleaned,
    Measured,
    Done,
    Failed,
}

impl PipelineState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }
}

/// Pipeline errors
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Network(#[from] InferenceError),
    #[error("Unexpected LLM response format")]
    UnexpectedFormat,
    #[error("Empty LLM response content")]
    EmptyResponse,
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),
}

impl From<TextError> for PipelineError {
    fn from(error: TextError) -> Self {
        match error {
            TextError::InvalidInput(msg) => Self::InvalidInput(msg),
            TextError::TypeMismatch(msg) => Self::TypeMismatch(msg),
        }
    }
}

/// Raw prompt as handed in by a caller
#[derive(Clone, Copy, Debug)]
pub enum PromptInput<'a> {
    Text(&'a str),
    Value(&'a Value),
}

impl<'a> From<&'a str> for PromptInput<'a> {
    fn from(text: &'a str) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a String> for PromptInput<'a> {
    fn from(text: &'a String) -> Self {
        Self::Text(text)
    }
}

impl<'a> From<&'a Value> for PromptInput<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Value(value)
    }
}

/// Validated, cleaned model output
#[derive(Clone, Debug, Serialize)]
pub struct CleanedResponse {
    pub request_id: Uuid,
    pub text: String,
    /// Missing when the request finished too fast to time
    pub performance: Option<PerformanceSample>,
}

/// Per-request bookkeeping
struct PipelineRun {
    request_id: Uuid,
    state: PipelineState,
}

impl PipelineRun {
    fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            state: PipelineState::Received,
        }
    }

    fn advance(&mut self, to: PipelineState) {
        tracing::debug!(
            request_id = %self.request_id,
            from = ?self.state,
            to = ?to,
            "Pipeline state changed"
        );
        self.state = to;
    }
}

pub struct PromptPipeline {
    generator: Arc<dyn TextGenerator>,
    meter: Arc<PerformanceMeter>,
    options: PipelineOptions,
}

impl PromptPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        meter: Arc<PerformanceMeter>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            generator,
            meter,
            options,
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run a prompt and return the cleaned response, or `None` on any failure.
    pub async fn process<'a>(&self, input: impl Into<PromptInput<'a>>) -> Option<CleanedResponse> {
        let mut run = PipelineRun::new();
        match self.execute(&mut run, input.into()).await {
            Ok(response) => Some(response),
            Err(error) => {
                tracing::error!(
                    request_id = %run.request_id,
                    state = ?run.state,
                    "An error occurred: {}",
                    error_chain(&error)
                );
                run.advance(PipelineState::Failed);
                None
            }
        }
    }

    /// Run a prompt and return the typed failure instead of swallowing it.
    pub async fn try_process<'a>(
        &self,
        input: impl Into<PromptInput<'a>>,
    ) -> Result<CleanedResponse, PipelineError> {
        let mut run = PipelineRun::new();
        let outcome = self.execute(&mut run, input.into()).await;
        if outcome.is_err() {
            run.advance(PipelineState::Failed);
        }
        outcome
    }

    async fn execute(
        &self,
        run: &mut PipelineRun,
        input: PromptInput<'_>,
    ) -> Result<CleanedResponse, PipelineError> {
        let prompt: Prompt = match input {
            PromptInput::Text(raw) => text::normalize_prompt(raw)?,
            PromptInput::Value(raw) => text::normalize_prompt_value(raw)?,
        };
        run.advance(PipelineState::Normalized);

        let start = Instant::now();
        run.advance(PipelineState::Sent);
        let result = self.generator.generate(&prompt).await?;
        let end = Instant::now();
        run.advance(PipelineState::ResponseReceived);

        let raw = extract_response_text(result)?;
        run.advance(PipelineState::Validated);

        let cleaned = self.options.apply(&raw);
        if cleaned.is_empty() {
            return Err(PipelineError::EmptyResponse);
        }
        run.advance(PipelineState::Cleaned);

        let performance = match self.meter.measure_throughput(start, end, &cleaned) {
            Ok(sample) => {
                tracing::info!(
                    request_id = %run.request_id,
                    tokens = sample.token_count,
                    elapsed_seconds = sample.elapsed_seconds,
                    "{}",
                    sample
                );
                Some(sample)
            }
            Err(e) => {
                tracing::warn!(request_id = %run.request_id, "Throughput not measured: {}", e);
                None
            }
        };
        run.advance(PipelineState::Measured);

        run.advance(PipelineState::Done);
        Ok(CleanedResponse {
            request_id: run.request_id,
            text: cleaned,
            performance,
        })
    }
}

/// Pick the response text out of a generation result.
///
/// `text` wins over `detail`; a service-reported `detail` is returned as
/// content so the message reaches the operator.
pub fn extract_response_text(result: GenerationResult) -> Result<String, PipelineError> {
    let payload = match (result.text, result.detail) {
        (Some(text), _) => text,
        (None, Some(detail)) => detail,
        (None, None) => return Err(PipelineError::UnexpectedFormat),
    };

    let response = text::coerce_to_string(&payload)?;
    if response.is_empty() {
        return Err(PipelineError::EmptyResponse);
    }
    Ok(response)
}
