//! Key/value persistence for the category store.
//!
//! The store only ever needs "get the value under a key" and "overwrite the
//! value under a key". [`KeyValueStore`] captures that seam so the store can
//! run against SQLite ([`Database`]) or a plain map ([`MemoryStorage`]).

mod local_storage;
mod memory;
mod schema;
mod types;

pub use memory::MemoryStorage;
pub use schema::Database;
pub use types::StorageError;

/// A string-keyed, string-valued persistent map.
///
/// Writes replace the whole value; there is no append or partial update.
#[allow(async_fn_in_trait)]
pub trait KeyValueStore {
    /// Value stored under `key`, or `None` if the key was never written.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore> KeyValueStore for &S {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key).await
    }
}
