use std::borrow::Cow;

use serde::Deserialize;
use thiserror::Error;

use crate::render::{RenderBlock, RenderOptions, render_content};

pub const TITLE_MIN_CHARS: usize = 5;
pub const TITLE_MAX_CHARS: usize = 100;
pub const CONTENT_MIN_CHARS: usize = 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("Title is required")]
    MissingTitle,
    #[error("Title must be at least 5 characters")]
    TitleTooShort,
    #[error("Title must be at most 100 characters")]
    TitleTooLong,
    #[error("Content is required")]
    MissingContent,
    #[error("Content must be at least 20 characters")]
    ContentTooShort,
}

/// A post as submitted from the editor, before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    /// Comma-separated tag input, as typed.
    #[serde(default)]
    pub hashtags: Option<String>,
}

impl PostDraft {
    /// Checks the field limits the editor enforces. Reports the first
    /// problem found, title before content. Only an empty field counts as
    /// missing; whitespace is measured like any other character.
    pub fn validate(&self) -> Result<(), DraftError> {
        let title_len = self.title.chars().count();
        if self.title.is_empty() {
            return Err(DraftError::MissingTitle);
        }
        if title_len < TITLE_MIN_CHARS {
            return Err(DraftError::TitleTooShort);
        }
        if title_len > TITLE_MAX_CHARS {
            return Err(DraftError::TitleTooLong);
        }

        if self.content.is_empty() {
            return Err(DraftError::MissingContent);
        }
        if self.content.chars().count() < CONTENT_MIN_CHARS {
            return Err(DraftError::ContentTooShort);
        }

        Ok(())
    }

    pub fn hashtags(&self) -> Vec<String> {
        self.hashtags.as_deref().map(parse_hashtags).unwrap_or_default()
    }

    pub fn render(&self, options: &RenderOptions) -> Vec<RenderBlock> {
        render_content(&self.content, options)
    }
}

/// Splits comma-separated tag input into trimmed, lowercased tags.
pub fn parse_hashtags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|tag| tag.trim().to_lowercase())
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Shortens `text` to `max_chars` characters with a `...` suffix.
///
/// Counts chars rather than bytes so multi-byte text is never cut mid
/// character.
pub fn excerpt(text: &str, max_chars: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((cut, _)) => Cow::Owned(format!("{}...", &text[..cut])),
    }
}
