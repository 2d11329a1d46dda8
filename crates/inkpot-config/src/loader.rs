use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::schema::Settings;

/// Loads the Inkpot configuration.
///
/// The settings object is built once, from the file plus environment, and is
/// read-only for the lifetime of the process. Changing `inkpot.toml` means
/// restarting the server.
#[derive(Debug)]
pub struct ConfigLoader {
    settings: Settings,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > INKPOT_CONFIG env > ~/.inkpot/inkpot.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("INKPOT_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".inkpot")
            .join("inkpot.toml")
    }

    /// Load the settings from disk, falling back to defaults.
    /// Validation warnings are logged; validation errors fail the load.
    pub fn load(path: Option<&Path>) -> inkpot_core::Result<Self> {
        let loader = Self::load_lenient(path)?;
        loader.check()?;
        Ok(loader)
    }

    /// Gate the loaded settings on validation: warnings are logged, any
    /// Error-severity finding fails with the joined report.
    pub fn check(&self) -> inkpot_core::Result<()> {
        match self.settings.validate() {
            Ok(warnings) => {
                for w in &warnings {
                    warn!("{}", w);
                }
                Ok(())
            }
            Err(e) => Err(inkpot_core::InkpotError::Config(e)),
        }
    }

    /// Load without the validation gate. `inkpot doctor` audits
    /// configurations that `load` would reject, and the other commands
    /// initialise tracing from the logging section before running `check`.
    pub fn load_lenient(path: Option<&Path>) -> inkpot_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let settings = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<Settings>(&raw).map_err(|e| {
                inkpot_core::InkpotError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            Settings::default()
        };

        // Apply environment variable overrides
        let settings = Self::apply_env_overrides(settings);

        Ok(Self {
            settings,
            config_path,
        })
    }

    /// The loaded settings.
    pub fn get(&self) -> &Settings {
        &self.settings
    }

    /// Take ownership of the settings.
    pub fn into_settings(self) -> Settings {
        self.settings
    }

    /// Path the configuration was resolved from.
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides. Secrets never live in committed files, so
    /// for MONGO_URL, GITHUB_TOKEN, and MASTODON_ACCESS_TOKEN the environment
    /// wins over any file-provided value, passed through verbatim. A token
    /// override never creates a missing settings record.
    fn apply_env_overrides(mut settings: Settings) -> Settings {
        if let Ok(v) = std::env::var("MONGO_URL") {
            settings.application.mongodb_url = Some(v);
        }
        if let Ok(v) = std::env::var("GITHUB_TOKEN") {
            if let Some(github) = settings.plugin.store_github.as_mut() {
                github.token = Some(v);
            }
        }
        if let Ok(v) = std::env::var("MASTODON_ACCESS_TOKEN") {
            if let Some(mastodon) = settings.plugin.syndicator_mastodon.as_mut() {
                mastodon.access_token = Some(v);
            }
        }
        if let Ok(v) = std::env::var("INKPOT_LOG_LEVEL") {
            settings.logging.level = v;
        }
        settings
    }
}
