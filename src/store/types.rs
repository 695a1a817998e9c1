use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

use crate::storage::StorageError;

// ============================================================================
// Error Types
// ============================================================================

/// Failures reading or writing the category document
#[derive(Debug, Error)]
pub enum StoreError {
    /// The key/value backend failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The persisted value is not a JSON array of categories
    #[error("Stored category data is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The in-memory categories could not be serialized
    #[error("Failed to serialize categories: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Category name is empty after sanitization
    #[error("Category name cannot be empty or whitespace-only")]
    InvalidName,
}

/// Why a video was not added. The `Display` text is meant for end users.
#[derive(Debug, Error)]
pub enum AddVideoError {
    #[error("This YouTube video URL is not valid.")]
    InvalidUrl,

    #[error("This YouTube video is already saved in this category.")]
    Duplicate,

    #[error("Category '{0}' does not exist.")]
    CategoryNotFound(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<StorageError> for AddVideoError {
    fn from(err: StorageError) -> Self {
        AddVideoError::Store(StoreError::Storage(err))
    }
}

// ============================================================================
// Data Structures
// ============================================================================

/// A named group of video ids.
///
/// Serialized as `{"name": ..., "videos": [...]}`; the field names are the
/// persisted format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub videos: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            videos: Vec::new(),
        }
    }

    pub fn contains(&self, video_id: &str) -> bool {
        self.videos.iter().any(|v| v == video_id)
    }

    /// Drop repeated ids, keeping the first occurrence of each.
    pub(crate) fn dedup_videos(&mut self) {
        let mut seen = HashSet::with_capacity(self.videos.len());
        self.videos.retain(|v| seen.insert(v.clone()));
    }
}
