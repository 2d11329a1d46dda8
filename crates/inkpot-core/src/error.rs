use thiserror::Error;

use crate::template::TemplateError;

/// Unified error type for the entire Inkpot configuration system.
#[derive(Error, Debug)]
pub enum InkpotError {
    // ── Config errors ──────────────────────────────────────────
    #[error("config error: {0}")]
    Config(String),

    #[error("config validation failed: {field}: {reason}")]
    ConfigValidation { field: String, reason: String },

    // ── Template errors ────────────────────────────────────────
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    // ── Generic wrappers ───────────────────────────────────────
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, InkpotError>;
