//! Shared type definitions
//!
//! This module contains the configuration value and the wire types exchanged
//! with the inference service.

pub mod config;
pub mod generation;
