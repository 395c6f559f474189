//! Blog post domain model.
//!
//! # Responsibility
//! - Define the canonical post record and the editable draft shape.
//! - Own slug derivation and tag-list normalization.
//!
//! # Invariants
//! - `slug` is derived from `title`; callers never supply it.
//! - `id` and `published_at` are assigned by the store, never by drafts.
//! - `tags` keep first-seen order and contain no case-insensitive duplicates.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static SLUG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug separator regex"));

/// Slug used when a title contains no slug-safe characters at all.
pub const FALLBACK_SLUG: &str = "post";

/// Store-assigned post identifier. Monotonic and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub i64);

impl Display for PostId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stored blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    /// URL-safe, unique across the collection.
    pub slug: String,
    pub title: String,
    pub author: String,
    /// Unix epoch milliseconds of the last create/edit.
    pub published_at: i64,
    /// Single category name, compared case-insensitively by queries.
    pub category: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    /// Rich-text markup; rendered by callers, opaque to core.
    pub content: String,
    /// Cover image URL or `data:` URI.
    pub image_url: String,
    pub featured: bool,
    pub views: u64,
}

/// Editable post fields submitted by the admin form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDraft {
    pub title: String,
    /// Blank author falls back to the configured default author.
    pub author: String,
    pub category: String,
    pub tags: Vec<String>,
    pub excerpt: String,
    pub content: String,
    /// Blank image falls back to the configured default cover.
    pub image_url: String,
    pub featured: bool,
}

impl PostDraft {
    /// Creates a draft with a title and category and every other field empty.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Self::default()
        }
    }

    /// Builder-style tag assignment.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Builder-style excerpt/content assignment.
    pub fn with_body(mut self, excerpt: impl Into<String>, content: impl Into<String>) -> Self {
        self.excerpt = excerpt.into();
        self.content = content.into();
        self
    }

    /// Checks draft invariants required before any write.
    pub fn validate(&self) -> Result<(), PostValidationError> {
        if self.title.trim().is_empty() {
            return Err(PostValidationError::EmptyTitle);
        }
        Ok(())
    }
}

/// Post draft validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostValidationError {
    EmptyTitle,
}

impl Display for PostValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "post title must not be empty"),
        }
    }
}

impl Error for PostValidationError {}

/// Derives the URL slug for a title.
///
/// Lowercases, collapses every run of characters outside `[a-z0-9]` into a
/// single `-`, then trims leading/trailing separators. Returns an empty
/// string when nothing slug-safe remains.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SLUG_SEPARATOR_RE
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Returns the slug base for a title, substituting [`FALLBACK_SLUG`] when empty.
pub fn slug_base(title: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// Trims tags, drops blanks and removes case-insensitive duplicates.
///
/// First occurrence wins, both for position and for display casing.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut seen = Vec::<String>::new();
    let mut normalized = Vec::new();
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            continue;
        }
        let folded = trimmed.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        normalized.push(trimmed.to_string());
    }
    normalized
}
