#[cfg(test)]
mod tests {
    use inkpot_core::*;
    use inkpot_core::template::TemplateError;

    // ── Template tests ─────────────────────────────────────────

    #[test]
    fn test_template_tokens_in_order() {
        let t = Template::new("src/articles/{yyyy}-{MM}-{dd}-{slug}.md");
        assert_eq!(t.tokens(), vec!["yyyy", "MM", "dd", "slug"]);
    }

    #[test]
    fn test_template_tokens_with_repeats() {
        let t = Template::new("media/{t}.{ext}/{t}");
        assert_eq!(t.tokens(), vec!["t", "ext", "t"]);
    }

    #[test]
    fn test_template_without_tokens() {
        let t = Template::new("src/media/static.bin");
        assert!(t.tokens().is_empty());
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_template_valid_paths() {
        for raw in [
            "src/articles/{yyyy}-{MM}-{dd}-{slug}.md",
            "src/notes/{t}.md",
            "src/media/{t}.{ext}",
            "src/media/{filename}",
            "articles/{slug}/",
            "{uuid}",
        ] {
            assert!(Template::new(raw).validate().is_ok(), "rejected {raw}");
        }
    }

    #[test]
    fn test_template_unknown_token() {
        let t = Template::new("src/{year}/{slug}.md");
        assert_eq!(
            t.validate(),
            Err(TemplateError::UnknownToken {
                token: "year".into(),
                position: 4,
            })
        );
    }

    #[test]
    fn test_template_tokens_are_case_sensitive() {
        assert!(Template::new("{MM}-{mm}").validate().is_ok());
        let err = Template::new("{SLUG}").validate().unwrap_err();
        assert!(matches!(err, TemplateError::UnknownToken { ref token, .. } if token == "SLUG"));
    }

    #[test]
    fn test_template_empty_token() {
        assert_eq!(
            Template::new("src/{}.md").validate(),
            Err(TemplateError::EmptyToken { position: 4 })
        );
    }

    #[test]
    fn test_template_unclosed_brace() {
        assert_eq!(
            Template::new("src/{slug").validate(),
            Err(TemplateError::UnclosedBrace { position: 4 })
        );
    }

    #[test]
    fn test_template_nested_brace_is_unclosed() {
        assert_eq!(
            Template::new("{a{b}}").validate(),
            Err(TemplateError::UnclosedBrace { position: 0 })
        );
    }

    #[test]
    fn test_template_stray_closing_brace() {
        assert_eq!(
            Template::new("notes}/{t}").validate(),
            Err(TemplateError::StrayBrace { position: 5 })
        );
    }

    #[test]
    fn test_template_tokens_skip_malformed_spans() {
        let t = Template::new("{slug}/{broken");
        assert_eq!(t.tokens(), vec!["slug"]);
    }

    #[test]
    fn test_template_serde_is_transparent() {
        let t = Template::new("notes/{t}/");
        let json = serde_json::to_string(&t).unwrap();
        assert_eq!(json, "\"notes/{t}/\"");
        let back: Template = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }

    #[test]
    fn test_template_display_is_verbatim() {
        let t = Template::new("media/{t}.{ext}");
        assert_eq!(t.to_string(), "media/{t}.{ext}");
        assert_eq!(t.as_str(), "media/{t}.{ext}");
    }

    // ── Token set tests ────────────────────────────────────────

    #[test]
    fn test_recognized_tokens_cover_documented_set() {
        let tokens = recognized_tokens();
        for name in [
            "y", "yyyy", "MM", "dd", "HH", "mm", "ss", "t", "T", "uuid", "slug", "n", "filename",
            "basename", "ext", "md5", "sha",
        ] {
            assert!(tokens.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_recognized_tokens_have_no_duplicates() {
        let tokens = recognized_tokens();
        let mut seen = std::collections::BTreeSet::new();
        for name in tokens {
            assert!(seen.insert(name), "duplicate {name}");
        }
    }

    // ── PostKind tests ─────────────────────────────────────────

    #[test]
    fn test_post_kind_serde_lowercase() {
        for kind in PostKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: PostKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn test_post_kind_rejects_unknown_tag() {
        assert!(serde_json::from_str::<PostKind>("\"recipe\"").is_err());
    }

    #[test]
    fn test_post_kind_display_names() {
        assert_eq!(PostKind::Article.display_name(), "Article");
        assert_eq!(PostKind::Bookmark.as_str(), "bookmark");
        assert_eq!(PostKind::Note.to_string(), "note");
    }

    // ── Error tests ────────────────────────────────────────────

    #[test]
    fn test_error_display() {
        let err = InkpotError::Config("bad section".into());
        assert!(err.to_string().contains("bad section"));
    }

    #[test]
    fn test_error_validation_fields() {
        let err = InkpotError::ConfigValidation {
            field: "publication.post_types[1]".into(),
            reason: "duplicate post type".into(),
        };
        let s = err.to_string();
        assert!(s.contains("publication.post_types[1]"));
        assert!(s.contains("duplicate post type"));
    }

    #[test]
    fn test_error_from_template_error() {
        let err: InkpotError = Template::new("{nope}").validate().unwrap_err().into();
        let s = err.to_string();
        assert!(s.contains("template error"));
        assert!(s.contains("nope"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: InkpotError = io_err.into();
        assert!(err.to_string().contains("file not found"));
    }
}
