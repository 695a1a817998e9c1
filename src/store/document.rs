use super::types::{Category, StoreError};
use crate::storage::KeyValueStore;

/// Storage key the category document lives under unless configured otherwise.
pub const CATEGORIES_KEY: &str = "CATEGORIES";

/// Category/video collection persisted as one JSON value in a [`KeyValueStore`].
///
/// The store holds no cached state: each call reads the current document,
/// so two handles over the same backend always agree after a write.
#[derive(Debug, Clone)]
pub struct CategoryStore<S> {
    storage: S,
    key: String,
}

impl<S> CategoryStore<S> {
    /// Store using the default [`CATEGORIES_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CATEGORIES_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: KeyValueStore> CategoryStore<S> {
    // ========================================================================
    // Whole-document Operations
    // ========================================================================

    /// The persisted document exactly as stored, or `None` if never written.
    pub async fn categories_raw(&self) -> Result<Option<String>, StoreError> {
        Ok(self.storage.get_item(&self.key).await?)
    }

    /// All categories in stored order.
    ///
    /// An absent key yields an empty list. So does a value that fails to
    /// parse; that case is logged, and the bad value is left in place.
    pub async fn categories(&self) -> Result<Vec<Category>, StoreError> {
        match self.load().await {
            Err(StoreError::Corrupt(e)) => {
                tracing::warn!(key = %self.key, error = %e, "Ignoring unparseable category data");
                Ok(Vec::new())
            }
            other => other,
        }
    }

    /// Replace the whole document with `categories`.
    pub async fn set_categories(&self, categories: &[Category]) -> Result<(), StoreError> {
        self.save(categories).await
    }

    /// Strict read used by every mutation, so a corrupt document is never
    /// overwritten by a partial view of it.
    pub(super) async fn load(&self) -> Result<Vec<Category>, StoreError> {
        match self.storage.get_item(&self.key).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(StoreError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    pub(super) async fn save(&self, categories: &[Category]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(categories).map_err(StoreError::Serialize)?;
        self.storage.set_item(&self.key, &raw).await?;
        tracing::trace!(key = %self.key, categories = categories.len(), "Persisted category document");
        Ok(())
    }
}
