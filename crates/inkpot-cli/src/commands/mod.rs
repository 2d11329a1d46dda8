use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use inkpot_config::schema::WarningSeverity;
use inkpot_config::{ConfigLoader, Settings};

mod init;

pub use init::STARTER_CONFIG;

/// 🖋 Inkpot — IndieWeb publishing server configuration
#[derive(Parser)]
#[command(name = "inkpot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to inkpot.toml config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level override (e.g. debug, info, warn, error)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all log output (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new inkpot.toml in the home config directory
    Init {
        /// Create in current directory instead of ~/.inkpot/
        #[arg(long)]
        local: bool,
    },
    /// Show the resolved configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Emit the resolved settings as JSON for the publishing server
    Export {
        /// Single-line output
        #[arg(long)]
        compact: bool,
    },
    /// Audit the configuration for structural issues
    Doctor {
        /// List the recognized template tokens and exit
        #[arg(long)]
        tokens: bool,
    },
    /// Set a config value in inkpot.toml (dot-notation key)
    Set {
        /// Config key in dot notation (e.g. publication.locale)
        key: String,
        /// Value to set
        value: String,
    },
    /// List the configured post types and their storage targets
    PostTypes,
    /// List the plugin load order and settings records
    Plugins,
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Show version and build info
    Version,
}

impl Cli {
    pub fn run(self) -> inkpot_core::Result<()> {
        // Resolve log level: --verbose > --quiet > --log-level > default
        let log_level = if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            self.log_level.clone().unwrap_or_else(|| "info".to_string())
        };
        let config_path = self.config.clone();

        match self.command {
            Commands::Init { local } => init::cmd_init(local),
            Commands::Completions { shell } => Self::cmd_completions(shell),
            Commands::Version => Self::cmd_version(),
            Commands::Set { key, value } => Self::cmd_set(config_path.as_deref(), &key, &value),
            Commands::Doctor { tokens } => {
                if tokens {
                    return Self::cmd_doctor_tokens();
                }
                // Lenient load: doctor must report on configs that fail
                // validation instead of dying on them.
                let loader = ConfigLoader::load_lenient(config_path.as_deref())?;
                init_tracing(&log_level, &loader.get().logging.format);
                Self::cmd_doctor(&loader)
            }
            Commands::Config { json } => {
                let loader = Self::load_traced(config_path.as_deref(), &log_level)?;
                Self::cmd_config(loader.get(), json)
            }
            Commands::Export { compact } => {
                let loader = Self::load_traced(config_path.as_deref(), &log_level)?;
                Self::cmd_export(loader.get(), compact)
            }
            Commands::PostTypes => {
                let loader = Self::load_traced(config_path.as_deref(), &log_level)?;
                Self::cmd_post_types(loader.get())
            }
            Commands::Plugins => {
                let loader = Self::load_traced(config_path.as_deref(), &log_level)?;
                Self::cmd_plugins(loader.get())
            }
        }
    }

    fn load_traced(path: Option<&Path>, log_level: &str) -> inkpot_core::Result<ConfigLoader> {
        // Tracing must be live before `check` logs the validation findings.
        let loader = ConfigLoader::load_lenient(path)?;
        init_tracing(log_level, &loader.get().logging.format);
        loader.check()?;
        Ok(loader)
    }

    fn cmd_config(settings: &Settings, json: bool) -> inkpot_core::Result<()> {
        if json {
            println!("{}", serde_json::to_string_pretty(settings)?);
        } else {
            println!(
                "{}",
                toml::to_string_pretty(settings)
                    .map_err(|e| inkpot_core::InkpotError::Config(e.to_string()))?
            );
        }
        Ok(())
    }

    fn cmd_export(settings: &Settings, compact: bool) -> inkpot_core::Result<()> {
        let json = if compact {
            serde_json::to_string(settings)?
        } else {
            serde_json::to_string_pretty(settings)?
        };
        println!("{json}");
        Ok(())
    }

    fn cmd_set(config_path: Option<&Path>, key: &str, value: &str) -> inkpot_core::Result<()> {
        let path = ConfigLoader::resolve_path(config_path);
        match set_value(&path, key, value)? {
            Some(old) => println!("✅ {} = {} (was {})", key, value, old.trim()),
            None => println!("✅ {key} = {value} (new)"),
        }
        Ok(())
    }

    fn cmd_doctor(loader: &ConfigLoader) -> inkpot_core::Result<()> {
        println!("🩺 Inkpot Doctor — Configuration Audit");
        println!();

        if !loader.path().exists() {
            println!(
                "  💡 no config file at {} — auditing defaults",
                loader.path().display()
            );
            println!("     Run 'inkpot init' to write a starter file.");
            println!();
        }

        let findings = loader.get().findings();

        let mut error_count = 0;
        let mut warn_count = 0;
        let mut info_count = 0;

        for w in &findings {
            println!("  {w}");
            match w.severity {
                WarningSeverity::Error => error_count += 1,
                WarningSeverity::Warning => warn_count += 1,
                WarningSeverity::Info => info_count += 1,
            }
        }

        let sections = ["application", "publication", "plugins", "plugin", "logging"];
        let flagged: BTreeSet<&str> = findings
            .iter()
            .filter_map(|w| w.field.split(['.', '[']).next())
            .collect();
        let passed = sections.into_iter().filter(|s| !flagged.contains(*s)).count();

        println!();
        println!(
            "  ✅ {passed} sections clean, ❌ {error_count} errors, ⚠️  {warn_count} warnings, 💡 {info_count} suggestions"
        );

        Ok(())
    }

    fn cmd_doctor_tokens() -> inkpot_core::Result<()> {
        println!("Recognized template tokens (case-sensitive):");
        for chunk in inkpot_core::recognized_tokens().chunks(8) {
            let row: Vec<String> = chunk.iter().map(|t| format!("{{{t}}}")).collect();
            println!("  {}", row.join(" "));
        }
        Ok(())
    }

    fn cmd_post_types(settings: &Settings) -> inkpot_core::Result<()> {
        let types = &settings.publication.post_types;
        if types.is_empty() {
            println!("No post types configured. The publication preset's defaults apply.");
            return Ok(());
        }

        println!("\x1b[1mPost Types\x1b[0m ({})", types.len());
        println!("{}", "-".repeat(80));

        for pt in types {
            let tag = pt
                .kind
                .map(|k| k.as_str())
                .unwrap_or("media catch-all");
            println!("  \x1b[36m{tag:<16}\x1b[0m {}", pt.display_name());
            if let Some(ref post) = pt.post {
                print_target("post", post);
            }
            if let Some(ref media) = pt.media {
                print_target("media", media);
            }
        }

        Ok(())
    }

    fn cmd_plugins(settings: &Settings) -> inkpot_core::Result<()> {
        if settings.plugins.is_empty() {
            println!("No plugins configured.");
            return Ok(());
        }

        println!(
            "\x1b[1mPlugins\x1b[0m ({} in load order)",
            settings.plugins.len()
        );
        println!("{}", "-".repeat(80));

        for id in &settings.plugins {
            let marker = if settings.plugin.has_settings(id) {
                "\x1b[32m●\x1b[0m"
            } else {
                "\x1b[90m○\x1b[0m"
            };
            println!("  {marker} {id}");
        }
        println!("  \x1b[90m● has a settings record, ○ none\x1b[0m");

        let orphans: Vec<String> = settings
            .plugin
            .ids()
            .into_iter()
            .filter(|id| !settings.plugins.contains(id))
            .collect();
        if !orphans.is_empty() {
            println!();
            println!(
                "  ⚠️  settings records not in the load order: {}",
                orphans.join(", ")
            );
        }

        Ok(())
    }

    fn cmd_version() -> inkpot_core::Result<()> {
        println!("🖋 Inkpot v{}", env!("CARGO_PKG_VERSION"));
        println!("   Rust edition: 2024");
        println!("   Target: {}", std::env::consts::ARCH);
        println!("   OS: {}", std::env::consts::OS);
        #[cfg(debug_assertions)]
        println!("   Profile: debug");
        #[cfg(not(debug_assertions))]
        println!("   Profile: release");
        Ok(())
    }

    fn cmd_completions(shell: Shell) -> inkpot_core::Result<()> {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "inkpot", &mut std::io::stdout());
        Ok(())
    }
}

fn print_target(label: &str, target: &inkpot_config::StorageTarget) {
    match &target.url {
        Some(url) => println!("      {label:<6} {}  \x1b[90m→ {url}\x1b[0m", target.path),
        None => println!("      {label:<6} {}", target.path),
    }
}

fn init_tracing(log_level: &str, format: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));
    match format {
        "json" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .with_target(true)
            .init(),
        "compact" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .compact()
            .with_target(false)
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init(),
    }
}

/// Edit a single value in the config file, preserving comments and layout.
/// Returns the previous rendering of the value when the key already existed.
pub fn set_value(path: &Path, key: &str, value: &str) -> inkpot_core::Result<Option<String>> {
    if !path.exists() {
        return Err(inkpot_core::InkpotError::Config(format!(
            "{} not found. Run 'inkpot init' first.",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        inkpot_core::InkpotError::Config(format!("Cannot read {}: {}", path.display(), e))
    })?;

    let mut doc = content.parse::<toml_edit::DocumentMut>().map_err(|e| {
        inkpot_core::InkpotError::Config(format!("Invalid TOML in {}: {}", path.display(), e))
    })?;

    // Parse dot-notation key into a table path, e.g. "publication.locale"
    // → ["publication", "locale"]
    let parts: Vec<&str> = key.split('.').collect();
    if key.is_empty() || parts.iter().any(|p| p.is_empty()) {
        return Err(inkpot_core::InkpotError::Config(format!(
            "invalid key '{key}'"
        )));
    }

    let table_parts = &parts[..parts.len() - 1];
    let leaf_key = parts[parts.len() - 1];

    // Navigate to the right table, creating intermediate tables as needed
    let mut table: &mut toml_edit::Item = doc.as_item_mut();
    for (depth, part) in table_parts.iter().enumerate() {
        if table.get(part).is_none() {
            table[part] = toml_edit::Item::Table(toml_edit::Table::new());
        } else if !table[part].is_table_like() {
            return Err(inkpot_core::InkpotError::ConfigValidation {
                field: table_parts[..=depth].join("."),
                reason: "not a table".into(),
            });
        }
        table = &mut table[part];
    }

    // Infer the value type: bool, integer, float, or string
    let toml_value = if value == "true" {
        toml_edit::value(true)
    } else if value == "false" {
        toml_edit::value(false)
    } else if let Ok(i) = value.parse::<i64>() {
        toml_edit::value(i)
    } else if let Ok(f) = value.parse::<f64>() {
        toml_edit::value(f)
    } else {
        toml_edit::value(value)
    };

    let old_value = table.get(leaf_key).map(|v| v.to_string());
    table[leaf_key] = toml_value;

    std::fs::write(path, doc.to_string()).map_err(|e| {
        inkpot_core::InkpotError::Config(format!("Cannot write {}: {}", path.display(), e))
    })?;

    Ok(old_value)
}
