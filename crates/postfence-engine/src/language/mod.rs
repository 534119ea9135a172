pub mod alias;
pub mod rules;

use std::fmt;

use serde::{Serialize, Serializer};

pub use alias::resolve_alias;
pub use rules::{Rule, matching_rule, rules};

/// Canonical lowercase language token handed to a highlighting surface.
///
/// Known grammars get their own variant; anything else is carried verbatim
/// in [`Language::Other`] so an unknown fence tag never becomes an error.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Language {
    Php,
    Html,
    Python,
    Java,
    TypeScript,
    JavaScript,
    Jsx,
    Tsx,
    Css,
    Sql,
    Bash,
    Json,
    Ruby,
    Go,
    C,
    Cpp,
    CSharp,
    /// No language: plain text display.
    Text,
    Other(String),
}

impl Language {
    /// Maps an exact canonical name to its variant. Aliases such as `js` are
    /// not resolved here; see [`resolve_alias`].
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "php" => Language::Php,
            "html" => Language::Html,
            "python" => Language::Python,
            "java" => Language::Java,
            "typescript" => Language::TypeScript,
            "javascript" => Language::JavaScript,
            "jsx" => Language::Jsx,
            "tsx" => Language::Tsx,
            "css" => Language::Css,
            "sql" => Language::Sql,
            "bash" => Language::Bash,
            "json" => Language::Json,
            "ruby" => Language::Ruby,
            "go" => Language::Go,
            "c" => Language::C,
            "cpp" => Language::Cpp,
            "csharp" => Language::CSharp,
            "text" => Language::Text,
            other => Language::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Language::Php => "php",
            Language::Html => "html",
            Language::Python => "python",
            Language::Java => "java",
            Language::TypeScript => "typescript",
            Language::JavaScript => "javascript",
            Language::Jsx => "jsx",
            Language::Tsx => "tsx",
            Language::Css => "css",
            Language::Sql => "sql",
            Language::Bash => "bash",
            Language::Json => "json",
            Language::Ruby => "ruby",
            Language::Go => "go",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::CSharp => "csharp",
            Language::Text => "text",
            Language::Other(tag) => tag,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Best-effort language detection for syntax highlighting.
///
/// An explicit hint always wins. Without one, the ordered rule table runs
/// against the code and the first matching rule decides; if nothing matches
/// the classifier's fallback is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    fallback: Language,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(Language::TypeScript)
    }
}

impl Classifier {
    pub fn new(fallback: Language) -> Self {
        Self { fallback }
    }

    pub fn classify(&self, hint: Option<&str>, code: &str) -> Language {
        if let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) {
            return Language::from_tag(&hint.to_lowercase());
        }

        match matching_rule(code) {
            Some(rule) => {
                log::debug!("language rule '{}' matched -> {}", rule.name, rule.language);
                rule.language.clone()
            }
            None => {
                log::debug!("no language rule matched, falling back to {}", self.fallback);
                self.fallback.clone()
            }
        }
    }
}

/// Classifies with the default TypeScript fallback.
pub fn classify(hint: Option<&str>, code: &str) -> Language {
    Classifier::default().classify(hint, code)
}
