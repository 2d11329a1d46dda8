//! # inkpot-core
//!
//! Core types and primitives for the Inkpot publishing-server configuration.
//! This crate defines the shared vocabulary used by every other crate in the
//! workspace, including the path/URL template grammar and the unified error
//! type.

pub mod error;
pub mod template;
pub mod types;

pub use error::{InkpotError, Result};
pub use template::{Template, TemplateError, recognized_tokens};
pub use types::{PluginId, PostKind};
