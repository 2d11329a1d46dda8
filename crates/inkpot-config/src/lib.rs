//! # inkpot-config
//!
//! Configuration system for the Inkpot publishing server. Reads from
//! `inkpot.toml` and environment variables, validates the structure, and
//! hands the server one read-only settings object.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::Settings;
pub use schema::{
    ApplicationConfig, ConfigWarning, GithubStoreConfig, LoggingConfig, MastodonSyndicatorConfig,
    PluginTable, PostType, PublicationConfig, StorageTarget, WarningSeverity,
};
