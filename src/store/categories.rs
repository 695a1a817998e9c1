use super::document::CategoryStore;
use super::types::{Category, StoreError};
use crate::storage::KeyValueStore;
use crate::util::strip_control_chars;

impl<S: KeyValueStore> CategoryStore<S> {
    // ========================================================================
    // Category Operations
    // ========================================================================

    /// Names of all categories, in stored order.
    pub async fn category_names(&self) -> Result<Vec<String>, StoreError> {
        Ok(self
            .categories()
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect())
    }

    /// First category whose name is exactly `name`.
    pub async fn find_category(&self, name: &str) -> Result<Option<Category>, StoreError> {
        Ok(self.categories().await?.into_iter().find(|c| c.name == name))
    }

    /// Strip control characters (ANSI escape injection) and trim whitespace,
    /// rejecting names that end up empty.
    fn sanitize_category_name(name: &str) -> Result<String, StoreError> {
        let sanitized = strip_control_chars(name);
        let trimmed = sanitized.trim();
        if trimmed.is_empty() {
            return Err(StoreError::InvalidName);
        }
        Ok(trimmed.to_owned())
    }

    /// Create an empty category named `name.to_lowercase()`.
    ///
    /// Returns `Ok(false)` without writing when a category named exactly
    /// `name`, or exactly its lowercased form, already exists.
    ///
    /// # Errors
    ///
    /// [`StoreError::InvalidName`] if the sanitized name is empty; backend and
    /// corrupt-document errors are propagated.
    pub async fn add_category(&self, name: &str) -> Result<bool, StoreError> {
        let name = Self::sanitize_category_name(name)?;
        let lowered = name.to_lowercase();

        let mut categories = self.load().await?;
        if categories
            .iter()
            .any(|c| c.name == name || c.name == lowered)
        {
            tracing::debug!(category = %name, "Category already exists");
            return Ok(false);
        }

        categories.push(Category::new(lowered));
        self.save(&categories).await?;
        tracing::debug!(category = %name, total = categories.len(), "Added category");
        Ok(true)
    }

    /// Remove every category named exactly `name`.
    ///
    /// Returns `true` once the document is rewritten, even if nothing matched.
    /// Read and write failures are logged and reported as `false`.
    pub async fn delete_category(&self, name: &str) -> bool {
        match self.remove_categories_named(name).await {
            Ok(removed) => {
                tracing::debug!(category = %name, removed, "Deleted category");
                true
            }
            Err(e) => {
                tracing::error!(category = %name, error = %e, "Failed to delete category");
                false
            }
        }
    }

    async fn remove_categories_named(&self, name: &str) -> Result<usize, StoreError> {
        let mut categories = self.load().await?;
        let before = categories.len();
        categories.retain(|c| c.name != name);
        self.save(&categories).await?;
        Ok(before - categories.len())
    }
}

#[cfg(test)]
mod tests {
    use crate::storage::{KeyValueStore, MemoryStorage, StorageError};
    use crate::store::{Category, CategoryStore, StoreError, CATEGORIES_KEY};
    use pretty_assertions::assert_eq;

    fn test_store() -> CategoryStore<MemoryStorage> {
        CategoryStore::new(MemoryStorage::new())
    }

    /// Backend whose reads succeed and writes always fail.
    struct ReadOnlyStorage(MemoryStorage);

    impl KeyValueStore for ReadOnlyStorage {
        async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get_item(key).await
        }

        async fn set_item(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }

        async fn remove_item(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn test_add_category() {
        let store = test_store();

        assert!(store.add_category("music").await.unwrap());

        let categories = store.categories().await.unwrap();
        assert_eq!(categories, vec![Category::new("music")]);
    }

    #[tokio::test]
    async fn test_add_category_lowercases() {
        let store = test_store();

        assert!(store.add_category("Lo-Fi Beats").await.unwrap());
        assert_eq!(store.category_names().await.unwrap(), vec!["lo-fi beats"]);
    }

    #[tokio::test]
    async fn test_add_category_twice_returns_false() {
        let store = test_store();

        assert!(store.add_category("music").await.unwrap());
        assert!(!store.add_category("music").await.unwrap());
        assert_eq!(store.categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_add_category_blocks_lowercase_twin() {
        let store = test_store();

        assert!(store.add_category("music").await.unwrap());
        assert!(!store.add_category("Music").await.unwrap());
        assert_eq!(store.category_names().await.unwrap(), vec!["music"]);
    }

    #[tokio::test]
    async fn test_add_category_preserves_order() {
        let store = test_store();

        for name in ["zebra", "alpha", "middle"] {
            store.add_category(name).await.unwrap();
        }

        assert_eq!(
            store.category_names().await.unwrap(),
            vec!["zebra", "alpha", "middle"]
        );
    }

    #[tokio::test]
    async fn test_add_category_strips_control_chars() {
        let store = test_store();

        store.add_category("\x1b[31mNews\x1b[0m").await.unwrap();
        assert_eq!(store.category_names().await.unwrap(), vec!["news"]);
    }

    #[tokio::test]
    async fn test_add_category_trims_whitespace() {
        let store = test_store();

        store.add_category("  padded  ").await.unwrap();
        assert_eq!(store.category_names().await.unwrap(), vec!["padded"]);
    }

    #[tokio::test]
    async fn test_add_category_rejects_empty_name() {
        let store = test_store();

        for name in ["", "   ", "\x1b[31m\x1b[0m"] {
            let result = store.add_category(name).await;
            assert!(matches!(result, Err(StoreError::InvalidName)), "{name:?}");
        }
        assert_eq!(store.categories_raw().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_category_does_not_clobber_corrupt_document() {
        let storage = MemoryStorage::new();
        storage.set_item(CATEGORIES_KEY, "oops").await.unwrap();
        let store = CategoryStore::new(&storage);

        assert!(matches!(
            store.add_category("music").await,
            Err(StoreError::Corrupt(_))
        ));
        assert_eq!(
            storage.get_item(CATEGORIES_KEY).await.unwrap().as_deref(),
            Some("oops")
        );
    }

    #[tokio::test]
    async fn test_find_category_is_exact() {
        let store = test_store();
        store.add_category("music").await.unwrap();

        let found = store.find_category("music").await.unwrap();
        assert_eq!(found, Some(Category::new("music")));
        assert_eq!(store.find_category("Music").await.unwrap(), None);
        assert_eq!(store.find_category("mus").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_category_names_empty_store() {
        let store = test_store();
        assert!(store.category_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_category() {
        let store = test_store();
        store.add_category("music").await.unwrap();
        store.add_category("talks").await.unwrap();

        assert!(store.delete_category("music").await);
        assert_eq!(store.category_names().await.unwrap(), vec!["talks"]);
    }

    #[tokio::test]
    async fn test_delete_category_removes_all_exact_matches() {
        let store = test_store();
        store
            .set_categories(&[
                Category::new("music"),
                Category::new("talks"),
                Category::new("music"),
                Category::new("Music"),
            ])
            .await
            .unwrap();

        assert!(store.delete_category("music").await);
        assert_eq!(store.category_names().await.unwrap(), vec!["talks", "Music"]);
    }

    #[tokio::test]
    async fn test_delete_missing_category_still_succeeds() {
        let store = test_store();
        store.add_category("music").await.unwrap();

        assert!(store.delete_category("jazz").await);
        assert_eq!(store.category_names().await.unwrap(), vec!["music"]);
    }

    #[tokio::test]
    async fn test_delete_category_reports_write_failure() {
        let inner = MemoryStorage::new();
        inner
            .set_item(CATEGORIES_KEY, r#"[{"name":"music","videos":[]}]"#)
            .await
            .unwrap();
        let store = CategoryStore::new(ReadOnlyStorage(inner));

        assert!(!store.delete_category("music").await);
        assert_eq!(store.category_names().await.unwrap(), vec!["music"]);
    }

    #[tokio::test]
    async fn test_delete_category_reports_corrupt_document() {
        let storage = MemoryStorage::new();
        storage.set_item(CATEGORIES_KEY, "[").await.unwrap();
        let store = CategoryStore::new(&storage);

        assert!(!store.delete_category("music").await);
    }

    #[tokio::test]
    async fn test_add_category_propagates_write_failure() {
        let store = CategoryStore::new(ReadOnlyStorage(MemoryStorage::new()));

        let result = store.add_category("music").await;
        assert!(matches!(
            result,
            Err(StoreError::Storage(StorageError::Unavailable(_)))
        ));
    }
}
