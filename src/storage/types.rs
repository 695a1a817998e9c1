use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Key/value storage errors with user-friendly messages
#[derive(Debug, Error)]
pub enum StorageError {
    /// Another process holds the database lock
    #[error("Another instance of tubeshelf appears to be running. Please close it and try again.")]
    InstanceLocked,

    /// Migration failed
    #[error("Database migration failed: {0}")]
    Migration(String),

    /// The backend cannot be used (e.g. a poisoned in-memory map)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Generic database error
    #[error("Database error: {0}")]
    Other(#[from] sqlx::Error),
}

impl StorageError {
    /// Check if a sqlx error indicates database locking
    pub(crate) fn from_sqlx(err: sqlx::Error) -> Self {
        if is_lock_message(&err.to_string()) {
            return StorageError::InstanceLocked;
        }
        StorageError::Other(err)
    }
}

/// SQLITE_BUSY (5), SQLITE_LOCKED (6) and SQLITE_CANTOPEN (14) all surface as
/// one of these messages.
pub(crate) fn is_lock_message(message: &str) -> bool {
    let message = message.to_lowercase();
    message.contains("database is locked")
        || message.contains("database table is locked")
        || message.contains("sqlite_busy")
        || message.contains("sqlite_locked")
        || message.contains("unable to open database file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_messages_detected() {
        assert!(is_lock_message("error returned from database: database is locked"));
        assert!(is_lock_message("SQLITE_BUSY"));
        assert!(is_lock_message("(code: 14) unable to open database file"));
    }

    #[test]
    fn test_other_messages_not_lock() {
        assert!(!is_lock_message("no such table: local_storage"));
        assert!(!is_lock_message(""));
    }
}
