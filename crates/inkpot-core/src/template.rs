use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder tokens the server resolves when a post or media file is
/// written. Names are case-sensitive: `{MM}` is the zero-padded month,
/// `{mm}` the zero-padded minute.
const RECOGNIZED_TOKENS: &[&str] = &[
    // Date and time of publication
    "y", "yyyy", "M", "MM", "MMM", "MMMM", "w", "D", "DD", "d", "dd", "H", "HH", "h", "hh", "m",
    "mm", "s", "ss",
    // Timestamps
    "t", "T",
    // Post identity
    "uuid", "slug", "n",
    // Media files
    "filename", "basename", "ext", "md5", "sha",
];

/// The full placeholder-token set, in documentation order.
pub fn recognized_tokens() -> &'static [&'static str] {
    RECOGNIZED_TOKENS
}

/// Lexical defects in a path or URL template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown token '{{{token}}}' at byte {position}")]
    UnknownToken { token: String, position: usize },

    #[error("empty token '{{}}' at byte {position}")]
    EmptyToken { position: usize },

    #[error("unclosed '{{' at byte {position}")]
    UnclosedBrace { position: usize },

    #[error("unmatched '}}' at byte {position}")]
    StrayBrace { position: usize },
}

/// A path or URL template containing `{token}` placeholders, such as
/// `src/articles/{yyyy}-{MM}-{dd}-{slug}.md`.
///
/// The text is stored verbatim. Token substitution happens in the server at
/// publish time; this type only knows how to recognize the placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Template(String);

impl Template {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Token names in order of appearance, including repeats. Malformed
    /// spans are skipped here; [`Template::validate`] surfaces them.
    pub fn tokens(&self) -> Vec<&str> {
        let bytes = self.0.as_bytes();
        let mut out = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            if bytes[i] != b'{' {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            while j < bytes.len() && !matches!(bytes[j], b'{' | b'}') {
                j += 1;
            }
            if j < bytes.len() && bytes[j] == b'}' {
                if j > i + 1 {
                    out.push(&self.0[i + 1..j]);
                }
                i = j + 1;
            } else {
                // unclosed span; resume at the next opener, if any
                i = j;
            }
        }
        out
    }

    /// Check every placeholder against the recognized token set, reporting
    /// the first lexical defect. Braces never nest and never appear as
    /// literal text in a well-formed template.
    pub fn validate(&self) -> Result<(), TemplateError> {
        let bytes = self.0.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'{' => {
                    let start = i;
                    let mut j = i + 1;
                    loop {
                        if j >= bytes.len() || bytes[j] == b'{' {
                            return Err(TemplateError::UnclosedBrace { position: start });
                        }
                        if bytes[j] == b'}' {
                            break;
                        }
                        j += 1;
                    }
                    let token = &self.0[start + 1..j];
                    if token.is_empty() {
                        return Err(TemplateError::EmptyToken { position: start });
                    }
                    if !RECOGNIZED_TOKENS.contains(&token) {
                        return Err(TemplateError::UnknownToken {
                            token: token.to_string(),
                            position: start,
                        });
                    }
                    i = j + 1;
                }
                b'}' => return Err(TemplateError::StrayBrace { position: i }),
                _ => i += 1,
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Template {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for Template {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}
