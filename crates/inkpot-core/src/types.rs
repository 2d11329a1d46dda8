use serde::{Deserialize, Serialize};

/// Unique identifier for a plugin, as listed in the plugin load order.
pub type PluginId = String;

/// The closed set of typed posts the publishing server accepts.
///
/// A post-type descriptor that carries no kind tag is the catch-all media
/// descriptor, which routes uploads that belong to no typed post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostKind {
    Article,
    Note,
    Photo,
    Bookmark,
}

impl PostKind {
    pub const ALL: [PostKind; 4] = [
        PostKind::Article,
        PostKind::Note,
        PostKind::Photo,
        PostKind::Bookmark,
    ];

    /// Stable lowercase tag, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PostKind::Article => "article",
            PostKind::Note => "note",
            PostKind::Photo => "photo",
            PostKind::Bookmark => "bookmark",
        }
    }

    /// Label shown when a descriptor has no explicit name.
    pub fn display_name(&self) -> &'static str {
        match self {
            PostKind::Article => "Article",
            PostKind::Note => "Note",
            PostKind::Photo => "Photo",
            PostKind::Bookmark => "Bookmark",
        }
    }
}

impl std::fmt::Display for PostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
