//! Inference service client
//!
//! This module handles the HTTP round trip to the text-generation service.

pub mod client;
#[cfg(test)]
pub(crate) mod testing;

pub use client::InferenceClient;

use async_trait::async_trait;
use thiserror::Error;

use crate::types::generation::{GenerationResult, Prompt};

/// Anything that can turn a prompt into a generation result
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &Prompt) -> Result<GenerationResult, InferenceError>;
}

/// Inference client errors
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

/// Render an error with its whole `source()` chain.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut out = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !out.contains(&text) {
            out.push_str(": ");
            out.push_str(&text);
        }
        source = cause.source();
    }
    out
}
