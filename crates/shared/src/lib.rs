//! Shared types, errors, and configuration for Meridian.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management
//! - Client for the hosted language model used by issue drafting

pub mod config;
pub mod error;
pub mod gemini;
pub mod types;

pub use config::{AppConfig, ExportConfig, GeminiConfig};
pub use error::{AppError, AppResult};
pub use gemini::{GeminiClient, GeminiError};
