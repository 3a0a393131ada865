//! Shared library for the site data pipeline.
//!
//! This crate provides common functionality used by the sync tool:
//! - Configuration management
//! - Output record models
//! - Data file path utilities
//! - Logging infrastructure

pub mod config;
pub mod logging;
pub mod models;
pub mod paths;

// Re-export commonly used types
pub use config::{Config, SourceMode};
pub use logging::LogConfig;
pub use models::*;
pub use paths::DataPaths;
