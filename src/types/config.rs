//! Configuration types
//!
//! Endpoint, model and generation parameters. Built once at startup and
//! handed by reference to the client and the pipeline.

use serde::{Deserialize, Serialize};

use crate::performance::EncodingScheme;

/// Known model identifiers served by the inference service
pub mod models {
    pub const OPT_125M: &str = "facebook/opt-125m";
    pub const MISTRAL_V2: &str = "mistralai/Mistral-7B-Instruct-v0.2";
    pub const MISTRAL_V2_AWQ: &str = "TheBloke/Mistral-7B-Instruct-v0.2-AWQ";
    pub const MISTRAL_V2_GPTQ: &str = "TheBloke/Mistral-7B-Instruct-v0.2-GPTQ";
    pub const MIXTRAL_GPTQ: &str = "TheBloke/Mixtral-8x7B-v0.1-GPTQ";
    pub const ZEPHYR_7B: &str = "HuggingFaceH4/zephyr-7b-beta";
    pub const HERMES_2_5: &str = "teknium/OpenHermes-2.5-Mistral-7B";
    pub const HERMES_AWQ: &str = "TheBloke/OpenHermes-2.5-Mistral-7B-AWQ";
    pub const HERMES_GPTQ: &str = "TheBloke/OpenHermes-2.5-Mistral-7B-GPTQ";
    pub const PHI_2: &str = "microsoft/phi-2";
    pub const PHI_2_GPTQ: &str = "TheBloke/phi-2-GPTQ";

    /// Models that emit Mistral-style answer preambles
    pub const MISTRAL_MODELS: &[&str] = &[
        "mistralai/Mistral-7B-Instruct-v0.2",
        "TheBloke/Mistral-7B-Instruct-v0.2-AWQ",
        "TheBloke/Mistral-7B-Instruct-v0.2-GPTQ",
        "mistralai/Mistral-7B-Instruct-v0.1",
        "TheBloke/Mistral-7B-Instruct-v0.1-AWQ",
        "TheBloke/Mistral-7B-v0.1-GPTQ",
    ];
}

pub const DEFAULT_API_URL: &str = "http://localhost:8888";

/// Weight quantization mode, derived from the model name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantization {
    Gptq,
    Awq,
}

/// Process-wide settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Model identifier served by the inference process
    pub default_model: String,
    /// Base URL of the inference service
    pub api_url: String,
    pub num_gpus: u32,
    pub num_responses: u32,
    /// Maximum number of tokens to generate
    pub max_tokens: u32,
    /// Maximum sequence length
    pub max_seq_len: u32,
    /// Sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Top-p (nucleus sampling) parameter (0.0 - 1.0)
    pub top_p: f32,
    /// GPU memory fraction for unquantized models
    pub default_gpu_util: f32,
    pub awq_gpu_util: f32,
    pub gptq_gpu_util: f32,
    /// Transport timeout for a single request, none by default
    pub request_timeout_secs: Option<u64>,
    /// Encoding used for throughput token counts
    pub encoding: EncodingScheme,
    /// Cut the response at the first turn-delimiter keyword
    pub truncate_turn_keywords: bool,
    /// Collapse whitespace and tidy punctuation in the response
    pub clean_whitespace: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_model: models::MISTRAL_V2_GPTQ.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            num_gpus: 1,
            num_responses: 1,
            max_tokens: 512,
            max_seq_len: 16384,
            temperature: 0.0,
            top_p: 0.95,
            default_gpu_util: 1.0,
            awq_gpu_util: 1.0,
            gptq_gpu_util: 1.0,
            request_timeout_secs: None,
            encoding: EncodingScheme::default(),
            truncate_turn_keywords: false,
            clean_whitespace: false,
        }
    }
}

impl Settings {
    /// Validate settings values
    ///
    /// Clamps sampling parameters and GPU fractions into range and keeps the
    /// token budget inside the sequence length.
    pub fn validate(&mut self) {
        self.temperature = self.temperature.clamp(0.0, 2.0);
        self.top_p = self.top_p.clamp(0.0, 1.0);

        for util in [
            &mut self.default_gpu_util,
            &mut self.awq_gpu_util,
            &mut self.gptq_gpu_util,
        ] {
            if !(*util > 0.0 && *util <= 1.0) {
                *util = 1.0;
            }
        }

        if self.num_gpus == 0 {
            self.num_gpus = 1;
        }
        if self.num_responses == 0 {
            self.num_responses = 1;
        }
        if self.max_seq_len == 0 {
            self.max_seq_len = 16384;
        }
        self.max_tokens = self.max_tokens.clamp(1, self.max_seq_len);

        let trimmed = self.api_url.trim().trim_end_matches('/');
        self.api_url = if trimmed.is_empty() {
            DEFAULT_API_URL.to_string()
        } else {
            trimmed.to_string()
        };

        if self.request_timeout_secs == Some(0) {
            self.request_timeout_secs = None;
        }
    }

    /// Quantization implied by the model name
    pub fn quantization(&self) -> Option<Quantization> {
        if self.default_model.contains("GPTQ") {
            Some(Quantization::Gptq)
        } else if self.default_model.contains("AWQ") {
            Some(Quantization::Awq)
        } else {
            None
        }
    }

    /// GPU memory fraction for the configured model
    pub fn gpu_utilization(&self) -> f32 {
        match self.quantization() {
            Some(Quantization::Gptq) => self.gptq_gpu_util,
            Some(Quantization::Awq) => self.awq_gpu_util,
            None => self.default_gpu_util,
        }
    }

    pub fn uses_mistral(&self) -> bool {
        models::MISTRAL_MODELS.contains(&self.default_model.as_str())
    }

    /// Full URL of the generation endpoint
    pub fn generate_url(&self) -> String {
        format!("{}/generate", self.api_url)
    }

    pub fn health_url(&self) -> String {
        format!("{}/health", self.api_url)
    }
}
