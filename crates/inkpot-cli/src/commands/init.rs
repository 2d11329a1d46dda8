use std::path::PathBuf;

/// Starter configuration written by `inkpot init`.
pub const STARTER_CONFIG: &str = r#"# 🖋 Inkpot Configuration
# Path and URL templates use placeholder tokens like {yyyy}, {MM}, {dd},
# {slug}, {t}, {ext}, and {filename}; the server resolves them when a post
# is published. Run 'inkpot doctor --tokens' for the full set.

# Plugin load order. Each plugin's settings live under [plugin.<id>].
plugins = [
    "endpoint-json-feed",
    "preset-jekyll",
    "store-github",
    "syndicator-mastodon",
]

[application]
url = "https://kit.example.net"
# mongodb_url is read from the MONGO_URL environment variable

[publication]
me = "https://example.net"
locale = "en"
time_zone = "UTC"
slug_separator = "-"
# categories = "https://example.net/categories/index.json"
# enrich_post_data = true

[[publication.post_types]]
type = "article"
post = { path = "src/articles/{yyyy}-{MM}-{dd}-{slug}.md", url = "articles/{slug}/" }

[[publication.post_types]]
type = "note"
post = { path = "src/notes/{t}.md", url = "notes/{t}/" }

[[publication.post_types]]
type = "photo"
post = { path = "src/photos/{t}.md", url = "photos/{t}/" }
media = { path = "src/media/{t}.{ext}", url = "media/{t}.{ext}" }

[[publication.post_types]]
type = "bookmark"
post = { path = "src/bookmarks/{yyyy}-{MM}-{dd}-{slug}.md", url = "bookmarks/{slug}/" }

# The untyped descriptor catches media uploads that belong to no post type.
[[publication.post_types]]
media = { path = "src/media/{filename}" }

[plugin.store-github]
user = "your-github-account"
repo = "your-site-repo"
branch = "main"
# token is read from the GITHUB_TOKEN environment variable

[plugin.syndicator-mastodon]
url = "https://mastodon.example"
user = "your-mastodon-account"
checked = true
forced = false
# access_token is read from the MASTODON_ACCESS_TOKEN environment variable

[logging]
level = "info"
# format = "pretty"
"#;

/// Initialize a new inkpot configuration with a commented starter file.
pub(super) fn cmd_init(local: bool) -> inkpot_core::Result<()> {
    let dir = if local {
        std::env::current_dir()?
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".inkpot")
    };

    std::fs::create_dir_all(&dir)?;
    let config_path = dir.join("inkpot.toml");

    if config_path.exists() {
        println!("⚠️  {} already exists", config_path.display());
        println!("   Edit it directly, or change one value with 'inkpot set KEY VALUE'.");
        return Ok(());
    }

    std::fs::write(&config_path, STARTER_CONFIG)?;
    println!("✅ Created {}", config_path.display());
    println!("   Set MONGO_URL, GITHUB_TOKEN, and MASTODON_ACCESS_TOKEN in the environment,");
    println!("   then run: inkpot doctor");

    Ok(())
}
