#[cfg(test)]
mod tests {
    use clap::Parser;
    use inkpot_cli::Cli;
    use inkpot_cli::commands::{STARTER_CONFIG, set_value};
    use inkpot_config::{Settings, WarningSeverity};

    // ── Starter config tests ───────────────────────────────────

    #[test]
    fn test_starter_config_parses_and_validates() {
        let settings: Settings = toml::from_str(STARTER_CONFIG).unwrap();
        let warnings = settings.validate().unwrap();
        assert!(
            warnings
                .iter()
                .all(|w| w.severity != WarningSeverity::Error)
        );
        assert_eq!(settings.publication.post_types.len(), 5);
        assert_eq!(settings.plugins.len(), 4);
        assert!(settings.plugin.store_github.is_some());
        assert!(settings.plugin.syndicator_mastodon.is_some());
    }

    #[test]
    fn test_starter_config_has_one_catch_all() {
        let settings: Settings = toml::from_str(STARTER_CONFIG).unwrap();
        let catch_alls: Vec<_> = settings
            .publication
            .post_types
            .iter()
            .filter(|pt| pt.is_catch_all())
            .collect();
        assert_eq!(catch_alls.len(), 1);
        assert!(catch_alls[0].post.is_none());
        assert!(catch_alls[0].media.is_some());
    }

    // ── set_value tests ────────────────────────────────────────

    #[test]
    fn test_set_value_updates_and_preserves_comments() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpot.toml");
        std::fs::write(&path, STARTER_CONFIG).unwrap();

        let old = set_value(&path, "publication.locale", "bg").unwrap();
        assert!(old.unwrap().contains("en"));

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("locale = \"bg\""));
        assert!(content.contains("# 🖋 Inkpot Configuration"));
        assert!(content.contains("# token is read from the GITHUB_TOKEN environment variable"));

        let settings: Settings = toml::from_str(&content).unwrap();
        assert_eq!(settings.publication.locale, "bg");
        assert_eq!(settings.publication.post_types.len(), 5);
    }

    #[test]
    fn test_set_value_reports_new_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpot.toml");
        std::fs::write(&path, STARTER_CONFIG).unwrap();

        // format is only a comment in the starter, so this key is new
        let old = set_value(&path, "logging.format", "json").unwrap();
        assert!(old.is_none());

        let settings: Settings =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_set_value_creates_intermediate_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpot.toml");
        std::fs::write(&path, "plugins = []\n").unwrap();

        set_value(&path, "plugin.store-github.branch", "publish").unwrap();

        let settings: Settings =
            toml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let github = settings.plugin.store_github.unwrap();
        assert_eq!(github.branch, "publish");
        assert!(github.user.is_empty());
    }

    #[test]
    fn test_set_value_infers_value_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpot.toml");
        std::fs::write(&path, STARTER_CONFIG).unwrap();

        set_value(&path, "publication.enrich_post_data", "true").unwrap();
        set_value(&path, "publication.slug_separator", "_").unwrap();
        set_value(&path, "application.port", "8080").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("enrich_post_data = true"));
        assert!(content.contains("port = 8080"));

        let settings: Settings = toml::from_str(&content).unwrap();
        assert!(settings.publication.enrich_post_data);
        assert_eq!(settings.publication.slug_separator, '_');
    }

    #[test]
    fn test_set_value_requires_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = set_value(&path, "publication.locale", "bg").unwrap_err();
        assert!(err.to_string().contains("inkpot init"));
    }

    #[test]
    fn test_set_value_rejects_non_table_intermediate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpot.toml");
        std::fs::write(&path, "plugins = []\n").unwrap();

        let err = set_value(&path, "plugins.first", "x").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("config validation failed"));
        assert!(msg.contains("plugins"));
        assert!(msg.contains("not a table"));
    }

    #[test]
    fn test_set_value_rejects_malformed_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inkpot.toml");
        std::fs::write(&path, STARTER_CONFIG).unwrap();

        assert!(set_value(&path, "", "x").is_err());
        assert!(set_value(&path, "publication..locale", "x").is_err());
    }

    // ── Argument parsing tests ─────────────────────────────────

    #[test]
    fn test_cli_parses_subcommands() {
        assert!(Cli::try_parse_from(["inkpot", "doctor"]).is_ok());
        assert!(Cli::try_parse_from(["inkpot", "doctor", "--tokens"]).is_ok());
        assert!(Cli::try_parse_from(["inkpot", "set", "publication.locale", "bg"]).is_ok());
        assert!(Cli::try_parse_from(["inkpot", "config", "--json"]).is_ok());
        assert!(Cli::try_parse_from(["inkpot", "export", "--compact"]).is_ok());
        assert!(Cli::try_parse_from(["inkpot", "post-types"]).is_ok());
        assert!(Cli::try_parse_from(["inkpot", "completions", "zsh"]).is_ok());
        assert!(
            Cli::try_parse_from(["inkpot", "--config", "/tmp/other.toml", "plugins"]).is_ok()
        );
    }

    #[test]
    fn test_cli_rejects_bad_invocations() {
        assert!(Cli::try_parse_from(["inkpot"]).is_err());
        assert!(Cli::try_parse_from(["inkpot", "-v", "-q", "doctor"]).is_err());
        assert!(Cli::try_parse_from(["inkpot", "set", "only-a-key"]).is_err());
    }
}
