//! Catalog runtime configuration.
//!
//! # Responsibility
//! - Hold the few tunables the catalog needs (page size, featured list,
//!   fallback names/images).
//! - Parse JSON overrides on top of built-in defaults.
//!
//! # Invariants
//! - `page_size` is never zero once `validate()` passed.

use crate::model::post::PostId;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::NonZeroUsize;

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_POST_AUTHOR: &str = "Admin User";
pub const DEFAULT_GUEST_AUTHOR: &str = "Guest User";
pub const DEFAULT_COVER_IMAGE: &str = "https://picsum.photos/1200/600";

/// Catalog configuration. Missing JSON fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Posts per public listing page.
    pub page_size: usize,
    /// Allow-list for the featured strip, independent of filters.
    pub featured_post_ids: Vec<PostId>,
    /// Author stored when a post draft leaves it blank.
    pub default_post_author: String,
    /// Author stored when a comment is submitted anonymously.
    pub guest_comment_author: String,
    /// Cover stored when a post draft leaves it blank.
    pub default_cover_image: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            featured_post_ids: vec![PostId(1), PostId(3), PostId(5)],
            default_post_author: DEFAULT_POST_AUTHOR.to_string(),
            guest_comment_author: DEFAULT_GUEST_AUTHOR.to_string(),
            default_cover_image: DEFAULT_COVER_IMAGE.to_string(),
        }
    }
}

impl CatalogConfig {
    /// Parses a JSON document and validates the result.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or unknown fields.
    /// - `ZeroPageSize` when `page_size` is `0`.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }

    /// Page size as a non-zero value, clamped to 1 for unvalidated configs.
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(NonZeroUsize::MIN)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Parse(String),
    ZeroPageSize,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(message) => write!(f, "invalid catalog config: {message}"),
            Self::ZeroPageSize => write!(f, "page_size must be greater than zero"),
        }
    }
}

impl Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::{CatalogConfig, ConfigError};
    use crate::model::post::PostId;

    #[test]
    fn defaults_match_public_listing_contract() {
        let config = CatalogConfig::default();
        assert_eq!(config.page_size().get(), 6);
        assert_eq!(
            config.featured_post_ids,
            vec![PostId(1), PostId(3), PostId(5)]
        );
    }

    #[test]
    fn json_overrides_merge_with_defaults() {
        let config = CatalogConfig::from_json_str(r#"{"page_size": 10, "featured_post_ids": [2]}"#)
            .expect("config should parse");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.featured_post_ids, vec![PostId(2)]);
        assert_eq!(config.guest_comment_author, "Guest User");
    }

    #[test]
    fn rejects_zero_page_size_and_unknown_fields() {
        assert_eq!(
            CatalogConfig::from_json_str(r#"{"page_size": 0}"#),
            Err(ConfigError::ZeroPageSize)
        );
        let err = CatalogConfig::from_json_str(r#"{"theme": "dark"}"#)
            .expect_err("unknown field must fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
