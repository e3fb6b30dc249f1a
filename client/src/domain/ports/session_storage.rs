//! Durable key/value storage backing the session store.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::define_port_error;

define_port_error! {
    /// Errors raised by session storage adapters.
    pub enum SessionStorageError {
        /// The backing medium could not be read or written.
        Io { message: String } => "session storage I/O failed: {message}",
        /// Stored content exists but cannot be interpreted.
        Corrupt { message: String } => "session storage holds unreadable data: {message}",
    }
}

/// Port for persisting session entries across restarts.
///
/// Keys are the fixed names used by [`crate::domain::SessionStore`]; values are
/// opaque strings.
#[cfg_attr(test, mockall::automock)]
pub trait SessionStorage: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError>;

    /// Delete `key`. Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), SessionStorageError>;
}

/// Process-local storage used in tests and when no session directory is
/// configured.
#[derive(Debug, Default)]
pub struct InMemorySessionStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemorySessionStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether no keys are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStorage for InMemorySessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        self.entries().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the in-memory adapter.
    use super::*;

    #[test]
    fn set_then_get_round_trips() {
        let storage = InMemorySessionStorage::new();
        storage.set("token", "abc").expect("set");
        assert_eq!(storage.get("token").expect("get").as_deref(), Some("abc"));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn removing_missing_key_is_not_an_error() {
        let storage = InMemorySessionStorage::new();
        storage.remove("token").expect("remove");
        assert!(storage.is_empty());
    }

    #[test]
    fn set_overwrites_previous_value() {
        let storage = InMemorySessionStorage::new();
        storage.set("role", "doctor").expect("set");
        storage.set("role", "admin").expect("overwrite");
        assert_eq!(storage.get("role").expect("get").as_deref(), Some("admin"));
    }
}
