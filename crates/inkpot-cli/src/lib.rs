//! # inkpot-cli
//!
//! Command-line interface for the Inkpot configuration system.
//!
//! ## Commands
//!
//! - `inkpot init` — Write a commented starter inkpot.toml
//! - `inkpot config` — Show the resolved configuration
//! - `inkpot export` — Emit the settings as JSON for the publishing server
//! - `inkpot doctor` — Audit the configuration for structural issues
//! - `inkpot set` — Change one value in inkpot.toml
//! - `inkpot post-types` / `inkpot plugins` — Inspect the publication setup

pub mod commands;

pub use commands::Cli;
