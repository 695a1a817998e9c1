use super::schema::Database;
use super::types::StorageError;
use super::KeyValueStore;

impl Database {
    // ========================================================================
    // Key/Value Operations
    // ========================================================================

    /// Get the value stored under `key`.
    ///
    /// # Returns
    ///
    /// The value if the key exists, or `None` if it was never set.
    pub async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM local_storage WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;

        Ok(row.map(|(value,)| value))
    }

    /// Set a value (UPSERT).
    ///
    /// Inserts the pair if the key doesn't exist, otherwise replaces the value
    /// and bumps `updated_at`.
    pub async fn set_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            INSERT INTO local_storage (key, value, updated_at)
            VALUES (?, ?, datetime('now'))
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
        "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(StorageError::from_sqlx)?;

        Ok(())
    }

    /// Delete a key. Missing keys are ignored.
    pub async fn delete_value(&self, key: &str) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM local_storage WHERE key = ?")
            .bind(key)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from_sqlx)?;
        Ok(())
    }
}

impl KeyValueStore for Database {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.get_value(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.set_value(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.delete_value(key).await
    }
}
