//! Throughput measurement
//!
//! Counts response tokens with a BPE encoding and turns request timings into
//! tokens-per-second samples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;
use thiserror::Error;
use tiktoken_rs::CoreBPE;

/// Performance measurement errors
#[derive(Debug, Error)]
pub enum MeterError {
    #[error("Failed to load encoding {0}: {1}")]
    Encoding(EncodingScheme, String),
    #[error("Unknown encoding: {0}")]
    UnknownEncoding(String),
    #[error("Elapsed time must be positive")]
    NonPositiveElapsed,
}

/// Subword encodings available for token counting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncodingScheme {
    #[default]
    #[serde(rename = "cl100k_base")]
    Cl100kBase,
    #[serde(rename = "o200k_base")]
    O200kBase,
    #[serde(rename = "p50k_base")]
    P50kBase,
    #[serde(rename = "r50k_base")]
    R50kBase,
}

impl EncodingScheme {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cl100kBase => "cl100k_base",
            Self::O200kBase => "o200k_base",
            Self::P50kBase => "p50k_base",
            Self::R50kBase => "r50k_base",
        }
    }

    fn load(&self) -> Result<CoreBPE, MeterError> {
        let bpe = match self {
            Self::Cl100kBase => tiktoken_rs::cl100k_base(),
            Self::O200kBase => tiktoken_rs::o200k_base(),
            Self::P50kBase => tiktoken_rs::p50k_base(),
            Self::R50kBase => tiktoken_rs::r50k_base(),
        };
        bpe.map_err(|e| MeterError::Encoding(*self, e.to_string()))
    }
}

impl fmt::Display for EncodingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EncodingScheme {
    type Err = MeterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "cl100k_base" => Ok(Self::Cl100kBase),
            "o200k_base" => Ok(Self::O200kBase),
            "p50k_base" => Ok(Self::P50kBase),
            "r50k_base" => Ok(Self::R50kBase),
            other => Err(MeterError::UnknownEncoding(other.to_string())),
        }
    }
}

/// Timing and token count of one response
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PerformanceSample {
    pub elapsed_seconds: f64,
    pub token_count: usize,
    pub tokens_per_second: f64,
}

impl fmt::Display for PerformanceSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tokens per second: {:.2} t/s", self.tokens_per_second)
    }
}

/// Token counter bound to one encoding, loaded once and shared
pub struct PerformanceMeter {
    scheme: EncodingScheme,
    bpe: CoreBPE,
}

impl PerformanceMeter {
    pub fn new(scheme: EncodingScheme) -> Result<Self, MeterError> {
        let bpe = scheme.load()?;
        tracing::debug!("Loaded token encoding {}", scheme);
        Ok(Self { scheme, bpe })
    }

    pub fn scheme(&self) -> EncodingScheme {
        self.scheme
    }

    /// Number of tokens in `text`. Special-token markup is counted as plain text.
    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_ordinary(text).len()
    }

    /// Tokens per second for `text` produced between `start` and `end`.
    pub fn measure_throughput(
        &self,
        start: Instant,
        end: Instant,
        text: &str,
    ) -> Result<PerformanceSample, MeterError> {
        let elapsed_seconds = end.saturating_duration_since(start).as_secs_f64();
        if elapsed_seconds <= 0.0 {
            return Err(MeterError::NonPositiveElapsed);
        }

        let token_count = self.count_tokens(text);
        Ok(PerformanceSample {
            elapsed_seconds,
            token_count,
            tokens_per_second: token_count as f64 / elapsed_seconds,
        })
    }
}

impl fmt::Debug for PerformanceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PerformanceMeter")
            .field("scheme", &self.scheme)
            .finish()
    }
}
