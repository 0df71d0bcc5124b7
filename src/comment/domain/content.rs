//! Comment text sanitising and validation.

use super::CommentDomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::LazyLock;

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"<[^>]*>").ok());

static WHITESPACE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Strips HTML tags and collapses whitespace runs into single spaces.
///
/// A tag is a `<` followed by any characters up to the next `>`. A `<` with no
/// closing `>` is kept as text.
#[must_use]
pub fn sanitize_content(raw: &str) -> String {
    let stripped = TAG
        .as_ref()
        .map_or(Cow::Borrowed(raw), |tag| tag.replace_all(raw, ""));
    let text: &str = &stripped;
    let collapsed = WHITESPACE
        .as_ref()
        .map_or(Cow::Borrowed(text), |whitespace| {
            whitespace.replace_all(text, " ")
        });
    collapsed.trim().to_owned()
}

/// Sanitised comment text of 1 to `max` characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentContent(String);

impl CommentContent {
    /// Sanitises `raw` and checks its length against `max` characters.
    ///
    /// # Errors
    ///
    /// Returns [`CommentDomainError::EmptyContent`] when nothing remains after
    /// sanitising, or [`CommentDomainError::ContentTooLong`] when the result
    /// exceeds `max` characters.
    pub fn new(raw: &str, max: usize) -> Result<Self, CommentDomainError> {
        let clean = sanitize_content(raw);
        if clean.is_empty() {
            return Err(CommentDomainError::EmptyContent);
        }
        if clean.chars().count() > max {
            return Err(CommentDomainError::ContentTooLong { max });
        }
        Ok(Self(clean))
    }

    /// Returns the content as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
