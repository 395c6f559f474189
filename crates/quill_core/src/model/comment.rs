//! Reader comment model.
//!
//! # Invariants
//! - A comment always references an existing post (cascade on post delete).
//! - New comments start unapproved; only moderation flips `approved`.

use crate::model::post::PostId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Store-assigned comment identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(pub i64);

impl Display for CommentId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub content: String,
    pub approved: bool,
}

/// Reader-submitted comment input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentDraft {
    /// Blank author is replaced by the configured guest name.
    pub author: String,
    pub content: String,
}

impl CommentDraft {
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }

    /// Anonymous submission.
    pub fn guest(content: impl Into<String>) -> Self {
        Self::new(String::new(), content)
    }

    pub fn validate(&self) -> Result<(), CommentValidationError> {
        if self.content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommentValidationError {
    EmptyContent,
}

impl Display for CommentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyContent => write!(f, "comment cannot be empty"),
        }
    }
}

impl Error for CommentValidationError {}
