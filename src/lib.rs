//! Promptline Library
//!
//! Prompt lifecycle pipeline for a locally hosted LLM inference service:
//! prompt normalization, the HTTP round trip, response validation and
//! cleaning, and throughput measurement.

pub mod inference;
pub mod performance;
pub mod pipeline;
pub mod storage;
pub mod text;
pub mod types;
