//! File-backed session storage.
//!
//! All entries live in one JSON object file inside a capability-scoped
//! directory. Every mutation rewrites the file atomically, so a restart sees
//! either the previous or the new session, never a torn one.

use std::collections::BTreeMap;
use std::io;
use std::sync::{Mutex, MutexGuard, PoisonError};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::Dir;

use super::atomic_io::write_atomic;
use crate::domain::ports::{SessionStorage, SessionStorageError};

/// File name used inside the session directory.
pub const SESSION_FILE_NAME: &str = "session.json";

type Entries = BTreeMap<String, String>;

/// Session storage persisted to `<dir>/session.json`.
pub struct FileSessionStorage {
    dir: Dir,
    lock: Mutex<()>,
}

impl FileSessionStorage {
    /// Open (creating when missing) the session directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionStorageError::Io`] when the directory cannot be
    /// created or opened.
    pub fn open(path: &Utf8Path) -> Result<Self, SessionStorageError> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(|err| io_error(path.as_str(), &err))?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(|err| io_error(path.as_str(), &err))?;
        Ok(Self::from_dir(dir))
    }

    /// Use an already opened directory.
    pub fn from_dir(dir: Dir) -> Self {
        Self {
            dir,
            lock: Mutex::new(()),
        }
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> Result<Entries, SessionStorageError> {
        match self.dir.read_to_string(SESSION_FILE_NAME) {
            Ok(raw) if raw.trim().is_empty() => Ok(Entries::new()),
            Ok(raw) => serde_json::from_str(&raw).map_err(|err| {
                SessionStorageError::corrupt(format!("{SESSION_FILE_NAME}: {err}"))
            }),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Entries::new()),
            Err(err) => Err(io_error(SESSION_FILE_NAME, &err)),
        }
    }

    fn store(&self, entries: &Entries) -> Result<(), SessionStorageError> {
        let contents = serde_json::to_string_pretty(entries)
            .map_err(|err| SessionStorageError::corrupt(err.to_string()))?;
        write_atomic(&self.dir, SESSION_FILE_NAME, &contents)
            .map_err(|err| io_error(SESSION_FILE_NAME, &err))
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Result<Option<String>, SessionStorageError> {
        let _guard = self.guard();
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionStorageError> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.store(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), SessionStorageError> {
        let _guard = self.guard();
        let mut entries = self.load()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.store(&entries)
    }
}

fn io_error(subject: &str, err: &io::Error) -> SessionStorageError {
    SessionStorageError::io(format!("{subject}: {err}"))
}
