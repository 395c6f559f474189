//! Media library asset model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for an uploaded or generated asset.
pub type MediaId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaAsset {
    pub id: MediaId,
    pub name: String,
    /// Remote URL or `data:` URI.
    pub url: String,
    /// Unix epoch milliseconds.
    pub uploaded_at: i64,
}

impl MediaAsset {
    /// Creates an asset with a fresh random id.
    pub fn new(name: impl Into<String>, url: impl Into<String>, uploaded_at: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            url: url.into(),
            uploaded_at,
        }
    }
}
