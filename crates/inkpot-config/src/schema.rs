use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use url::Url;

use inkpot_core::template::Template;
use inkpot_core::types::{PluginId, PostKind};

/// Identifier of the GitHub content-store plugin.
pub const STORE_GITHUB: &str = "store-github";
/// Identifier of the Mastodon syndicator plugin.
pub const SYNDICATOR_MASTODON: &str = "syndicator-mastodon";

/// Root settings — maps to `inkpot.toml`.
///
/// Built once by [`crate::ConfigLoader`] from the file plus environment and
/// handed to the server as a single read-only object. Loading the same file
/// twice yields structurally equal settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Plugin load order. Settings records live under `[plugin.<id>]`,
    /// keyed by the same identifier.
    pub plugins: Vec<PluginId>,
    pub application: ApplicationConfig,
    pub publication: PublicationConfig,
    pub plugin: PluginTable,
    pub logging: LoggingConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plugins: vec![],
            application: ApplicationConfig::default(),
            publication: PublicationConfig::default(),
            plugin: PluginTable::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ── Application ────────────────────────────────────────────────

/// Options for the server process itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Base URL the application is served from.
    pub url: Option<Url>,
    /// MongoDB connection string. Read from the MONGO_URL environment
    /// variable; committed files never carry it.
    pub mongodb_url: Option<String>,
}

// ── Publication ────────────────────────────────────────────────

/// Options describing the publication the server writes to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublicationConfig {
    /// Canonical identity URL of the publication's author.
    pub me: Option<Url>,
    /// BCP 47 locale tag, e.g. "en" or "bg".
    pub locale: String,
    /// IANA time zone name used when date tokens are resolved.
    pub time_zone: String,
    /// URL of a category index offered for tagging posts.
    pub categories: Option<Url>,
    /// Character placed between words when a title is slugged.
    pub slug_separator: char,
    /// Fetch referenced URLs and enrich post data before storing.
    pub enrich_post_data: bool,
    /// Ordered post-type descriptors. Order is preserved verbatim; the
    /// server routes incoming content to the first matching descriptor.
    pub post_types: Vec<PostType>,
}

impl Default for PublicationConfig {
    fn default() -> Self {
        Self {
            me: None,
            locale: "en".into(),
            time_zone: "UTC".into(),
            categories: None,
            slug_separator: '-',
            enrich_post_data: false,
            post_types: vec![],
        }
    }
}

// ── Post types ─────────────────────────────────────────────────

/// A post-type descriptor: where one kind of content is stored and the URL
/// it is served from.
///
/// A descriptor without a `type` tag is the catch-all media descriptor. At
/// most one may appear, and it carries only a `media` target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostType {
    /// Post kind. `None` marks the catch-all media descriptor.
    #[serde(default, rename = "type")]
    pub kind: Option<PostKind>,
    /// Display name. Falls back to the kind's label.
    #[serde(default)]
    pub name: Option<String>,
    /// Where post files are written and served.
    #[serde(default)]
    pub post: Option<StorageTarget>,
    /// Where media attached to this kind of post is written and served.
    #[serde(default)]
    pub media: Option<StorageTarget>,
}

impl PostType {
    /// Display name, falling back to the kind's label, or "Media" for the
    /// catch-all descriptor.
    pub fn display_name(&self) -> &str {
        match (&self.name, &self.kind) {
            (Some(name), _) => name,
            (None, Some(kind)) => kind.display_name(),
            (None, None) => "Media",
        }
    }

    /// Whether this is the untyped catch-all media descriptor.
    pub fn is_catch_all(&self) -> bool {
        self.kind.is_none()
    }
}

/// A storage target: the path template a file is written to, and optionally
/// the URL template it is served from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageTarget {
    pub path: Template,
    #[serde(default)]
    pub url: Option<Template>,
}

// ── Plugins ────────────────────────────────────────────────────

/// Per-plugin settings records, keyed by the identifier used in `plugins`.
///
/// The two plugins the server wires credentials through are typed; records
/// for any other plugin are kept verbatim for that plugin to interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct PluginTable {
    #[serde(rename = "store-github")]
    pub store_github: Option<GithubStoreConfig>,
    #[serde(rename = "syndicator-mastodon")]
    pub syndicator_mastodon: Option<MastodonSyndicatorConfig>,
    /// Settings for plugins this crate has no schema for.
    #[serde(flatten)]
    pub other: BTreeMap<PluginId, serde_json::Value>,
}

impl PluginTable {
    /// Whether a settings record exists for this identifier.
    pub fn has_settings(&self, id: &str) -> bool {
        match id {
            STORE_GITHUB => self.store_github.is_some(),
            SYNDICATOR_MASTODON => self.syndicator_mastodon.is_some(),
            _ => self.other.contains_key(id),
        }
    }

    /// Identifiers of every settings record present, typed and untyped.
    pub fn ids(&self) -> Vec<PluginId> {
        let mut ids = Vec::new();
        if self.store_github.is_some() {
            ids.push(STORE_GITHUB.to_string());
        }
        if self.syndicator_mastodon.is_some() {
            ids.push(SYNDICATOR_MASTODON.to_string());
        }
        ids.extend(self.other.keys().cloned());
        ids
    }
}

/// GitHub content-store settings (`[plugin.store-github]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GithubStoreConfig {
    /// Account that owns the content repository.
    pub user: String,
    /// Repository posts and media are committed into.
    pub repo: String,
    /// Branch commits land on.
    pub branch: String,
    /// Personal access token. Read from the GITHUB_TOKEN environment
    /// variable.
    pub token: Option<String>,
}

impl Default for GithubStoreConfig {
    fn default() -> Self {
        Self {
            user: String::new(),
            repo: String::new(),
            branch: "main".into(),
            token: None,
        }
    }
}

/// Mastodon syndicator settings (`[plugin.syndicator-mastodon]`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MastodonSyndicatorConfig {
    /// Server the syndicated status is posted to.
    pub url: Option<Url>,
    /// Account name on that server, without the leading @.
    pub user: String,
    /// Pre-select this target when a client lists syndication options.
    pub checked: bool,
    /// Syndicate even when the client named no target.
    pub forced: bool,
    /// OAuth access token. Read from the MASTODON_ACCESS_TOKEN environment
    /// variable.
    pub access_token: Option<String>,
}

// ── Logging ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    pub level: String,
    /// Output format: "pretty", "compact", "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "pretty".into(),
        }
    }
}

// ── Validation ─────────────────────────────────────────────────

/// A single config validation issue.
#[derive(Debug)]
pub struct ConfigWarning {
    pub field: String,
    pub message: String,
    pub severity: WarningSeverity,
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let icon = match self.severity {
            WarningSeverity::Error => "❌",
            WarningSeverity::Warning => "⚠️ ",
            WarningSeverity::Info => "💡",
        };
        write!(f, "{} {}: {}", icon, self.field, self.message)?;
        if let Some(ref h) = self.hint {
            write!(f, "\n   ↳ {}", h)?;
        }
        Ok(())
    }
}

impl Settings {
    /// Collect every validation finding, at every severity. `inkpot doctor`
    /// prints this list in full; [`Settings::validate`] gates on it.
    pub fn findings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // ── Application ───
        if self.application.url.is_none() {
            warnings.push(ConfigWarning {
                field: "application.url".into(),
                message: "no base URL set".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Set to the URL the server is reachable at, e.g. 'https://kit.example.net'".into()),
            });
        }
        match &self.application.mongodb_url {
            None => {
                warnings.push(ConfigWarning {
                    field: "application.mongodb_url".into(),
                    message: "no database connection string — posts won't persist".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some("Set the MONGO_URL environment variable".into()),
                });
            }
            Some(url) if url.is_empty() => {
                warnings.push(ConfigWarning {
                    field: "application.mongodb_url".into(),
                    message: "connection string is empty".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some("Set the MONGO_URL environment variable".into()),
                });
            }
            Some(_) => {}
        }

        // ── Publication ───
        if self.publication.me.is_none() {
            warnings.push(ConfigWarning {
                field: "publication.me".into(),
                message: "no identity URL set".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Set to your canonical URL, e.g. 'https://example.net'".into()),
            });
        }
        if self.publication.locale.is_empty() {
            warnings.push(ConfigWarning {
                field: "publication.locale".into(),
                message: "locale is empty".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Use a BCP 47 tag, e.g. 'en' or 'bg'".into()),
            });
        }
        if self.publication.time_zone.is_empty() {
            warnings.push(ConfigWarning {
                field: "publication.time_zone".into(),
                message: "time zone is empty".into(),
                severity: WarningSeverity::Warning,
                hint: Some("Use an IANA name, e.g. 'UTC' or 'Europe/Sofia'".into()),
            });
        }

        // ── Post types ───
        self.validate_post_types(&mut warnings);

        // ── Plugins ───
        self.validate_plugins(&mut warnings);

        // ── Logging ───
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.level".into(),
                message: format!("unknown log level '{}'", self.logging.level),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_levels.join(", "))),
            });
        }
        let valid_formats = ["pretty", "compact", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            warnings.push(ConfigWarning {
                field: "logging.format".into(),
                message: format!("unknown log format '{}'", self.logging.format),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Valid values: {}", valid_formats.join(", "))),
            });
        }

        warnings
    }

    /// Validate the settings and return a list of warnings/errors.
    /// Returns `Err` with all messages joined if any severity is Error.
    pub fn validate(&self) -> Result<Vec<ConfigWarning>, String> {
        let warnings = self.findings();

        // Check for hard errors
        let errors: Vec<String> = warnings
            .iter()
            .filter(|w| w.severity == WarningSeverity::Error)
            .map(|w| format!("{}: {}", w.field, w.message))
            .collect();

        if !errors.is_empty() {
            return Err(format!("Configuration errors:\n  • {}", errors.join("\n  • ")));
        }

        Ok(warnings)
    }

    fn validate_post_types(&self, warnings: &mut Vec<ConfigWarning>) {
        let types = &self.publication.post_types;
        if types.is_empty() {
            warnings.push(ConfigWarning {
                field: "publication.post_types".into(),
                message: "no post types configured".into(),
                severity: WarningSeverity::Info,
                hint: Some("The publication preset's default paths apply".into()),
            });
            return;
        }

        let mut seen: Vec<PostKind> = Vec::new();
        let mut catch_alls = 0usize;

        for (i, pt) in types.iter().enumerate() {
            let field = format!("publication.post_types[{i}]");

            match pt.kind {
                Some(kind) => {
                    if seen.contains(&kind) {
                        warnings.push(ConfigWarning {
                            field: field.clone(),
                            message: format!("duplicate post type '{kind}'"),
                            severity: WarningSeverity::Error,
                            hint: Some("Each post type may be described at most once".into()),
                        });
                    }
                    seen.push(kind);
                    if pt.post.is_none() {
                        warnings.push(ConfigWarning {
                            field: field.clone(),
                            message: format!("post type '{kind}' has no post target"),
                            severity: WarningSeverity::Warning,
                            hint: Some("The publication preset's default paths apply".into()),
                        });
                    }
                }
                None => {
                    catch_alls += 1;
                    if catch_alls > 1 {
                        warnings.push(ConfigWarning {
                            field: field.clone(),
                            message: "more than one catch-all media descriptor".into(),
                            severity: WarningSeverity::Error,
                            hint: Some("At most one descriptor may omit 'type'".into()),
                        });
                    }
                    if pt.post.is_some() {
                        warnings.push(ConfigWarning {
                            field: field.clone(),
                            message: "catch-all media descriptor has a post target".into(),
                            severity: WarningSeverity::Error,
                            hint: Some("The untyped descriptor only routes media uploads; give it a 'media' target".into()),
                        });
                    }
                    if pt.media.is_none() {
                        warnings.push(ConfigWarning {
                            field: field.clone(),
                            message: "catch-all media descriptor has no media target".into(),
                            severity: WarningSeverity::Error,
                            hint: Some("Add e.g. media = { path = \"src/media/{filename}\" }".into()),
                        });
                    }
                }
            }

            for (target_name, target) in [("post", &pt.post), ("media", &pt.media)] {
                let Some(target) = target else { continue };
                if let Err(e) = target.path.validate() {
                    warnings.push(ConfigWarning {
                        field: format!("{field}.{target_name}.path"),
                        message: e.to_string(),
                        severity: WarningSeverity::Error,
                        hint: Some("Tokens are case-sensitive; run 'inkpot doctor --tokens' for the full set".into()),
                    });
                }
                if let Some(url) = &target.url {
                    if let Err(e) = url.validate() {
                        warnings.push(ConfigWarning {
                            field: format!("{field}.{target_name}.url"),
                            message: e.to_string(),
                            severity: WarningSeverity::Error,
                            hint: Some("Tokens are case-sensitive; run 'inkpot doctor --tokens' for the full set".into()),
                        });
                    }
                }
            }
        }
    }

    fn validate_plugins(&self, warnings: &mut Vec<ConfigWarning>) {
        if self.plugins.is_empty() {
            warnings.push(ConfigWarning {
                field: "plugins".into(),
                message: "no plugins configured".into(),
                severity: WarningSeverity::Info,
                hint: Some("Without plugins the server has no store, preset, or syndication targets".into()),
            });
        }

        let mut seen: Vec<&str> = Vec::new();
        for id in &self.plugins {
            if seen.contains(&id.as_str()) {
                warnings.push(ConfigWarning {
                    field: "plugins".into(),
                    message: format!("duplicate plugin id '{id}'"),
                    severity: WarningSeverity::Warning,
                    hint: Some("Each plugin is loaded once; remove the repeat".into()),
                });
            }
            seen.push(id);
        }

        // Settings records for plugins that are not in the load order
        for id in self.plugin.ids() {
            if !self.plugins.contains(&id) {
                warnings.push(ConfigWarning {
                    field: format!("plugin.{id}"),
                    message: "settings record for a plugin that is not listed".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some(format!("Add '{id}' to plugins, or remove the record")),
                });
            }
        }

        // ── store-github ───
        if self.plugins.iter().any(|id| id == STORE_GITHUB) && self.plugin.store_github.is_none() {
            warnings.push(ConfigWarning {
                field: format!("plugin.{STORE_GITHUB}"),
                message: "listed in plugins but has no settings record".into(),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Add a [plugin.{STORE_GITHUB}] table with user and repo")),
            });
        }
        if let Some(github) = &self.plugin.store_github {
            let field = format!("plugin.{STORE_GITHUB}");
            if github.user.is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.user"),
                    message: "no account name".into(),
                    severity: WarningSeverity::Error,
                    hint: Some("Set to the account that owns the content repository".into()),
                });
            }
            if github.repo.is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.repo"),
                    message: "no repository name".into(),
                    severity: WarningSeverity::Error,
                    hint: Some("Set to the repository posts are committed into".into()),
                });
            }
            if github.branch.is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.branch"),
                    message: "branch is empty".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some("Commits land on 'main' unless set".into()),
                });
            }
            if github.token.as_deref().unwrap_or("").is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.token"),
                    message: "no access token — commits will be rejected".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some("Set the GITHUB_TOKEN environment variable".into()),
                });
            }
        }

        // ── syndicator-mastodon ───
        if self.plugins.iter().any(|id| id == SYNDICATOR_MASTODON)
            && self.plugin.syndicator_mastodon.is_none()
        {
            warnings.push(ConfigWarning {
                field: format!("plugin.{SYNDICATOR_MASTODON}"),
                message: "listed in plugins but has no settings record".into(),
                severity: WarningSeverity::Warning,
                hint: Some(format!("Add a [plugin.{SYNDICATOR_MASTODON}] table with url and user")),
            });
        }
        if let Some(mastodon) = &self.plugin.syndicator_mastodon {
            let field = format!("plugin.{SYNDICATOR_MASTODON}");
            if mastodon.url.is_none() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.url"),
                    message: "no server URL".into(),
                    severity: WarningSeverity::Error,
                    hint: Some("Set to the Mastodon server statuses are posted to, e.g. 'https://mastodon.example'".into()),
                });
            }
            if mastodon.user.is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.user"),
                    message: "no account name".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some("Set to the account statuses are posted as, without the leading @".into()),
                });
            }
            if mastodon.access_token.as_deref().unwrap_or("").is_empty() {
                warnings.push(ConfigWarning {
                    field: format!("{field}.access_token"),
                    message: "no access token — syndication will fail".into(),
                    severity: WarningSeverity::Warning,
                    hint: Some("Set the MASTODON_ACCESS_TOKEN environment variable".into()),
                });
            }
        }
    }
}
