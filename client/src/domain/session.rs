//! Persisted authentication session.
//!
//! The session lives under four fixed storage keys so other tooling sharing
//! the storage sees the same layout. The keys are always cleared together.

use std::sync::Arc;

use demo_data::records::{AuthSession, Role, UserRecord};
use tracing::warn;

use super::ports::{SessionStorage, SessionStorageError};

/// Storage key for the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";
/// Storage key for the user role.
pub const ROLE_KEY: &str = "role";
/// Storage key for the JSON-encoded user profile.
pub const USER_KEY: &str = "user";
/// Every key owned by the session store.
pub const SESSION_KEYS: [&str; 4] = [TOKEN_KEY, REFRESH_TOKEN_KEY, ROLE_KEY, USER_KEY];

/// A signed-in user with their tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token attached to requests.
    pub access_token: String,
    /// Token exchanged for a new bearer token.
    pub refresh_token: String,
    /// Role selecting the dashboard.
    pub role: Role,
    /// Signed-in profile.
    pub user: UserRecord,
}

impl From<AuthSession> for Session {
    fn from(auth: AuthSession) -> Self {
        Self {
            access_token: auth.token,
            refresh_token: auth.refresh_token,
            role: auth.user.role,
            user: auth.user,
        }
    }
}

/// Typed view over a [`SessionStorage`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use hospital_client::domain::SessionStore;
/// use hospital_client::domain::ports::InMemorySessionStorage;
///
/// let store = SessionStore::new(Arc::new(InMemorySessionStorage::new()));
/// store.set_tokens("access", "refresh").unwrap();
/// assert_eq!(store.access_token().unwrap().as_deref(), Some("access"));
///
/// store.clear().unwrap();
/// assert!(store.access_token().unwrap().is_none());
/// ```
#[derive(Clone)]
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
}

impl SessionStore {
    /// Wrap a storage adapter.
    pub fn new(storage: Arc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Stored bearer token.
    pub fn access_token(&self) -> Result<Option<String>, SessionStorageError> {
        self.storage.get(TOKEN_KEY)
    }

    /// Stored refresh token.
    pub fn refresh_token(&self) -> Result<Option<String>, SessionStorageError> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    /// Stored role.
    pub fn role(&self) -> Result<Option<Role>, SessionStorageError> {
        self.storage
            .get(ROLE_KEY)?
            .map(|raw| {
                raw.parse::<Role>()
                    .map_err(|err| SessionStorageError::corrupt(err.to_string()))
            })
            .transpose()
    }

    /// Stored profile.
    pub fn user(&self) -> Result<Option<UserRecord>, SessionStorageError> {
        self.storage
            .get(USER_KEY)?
            .map(|raw| {
                serde_json::from_str(&raw).map_err(|err| {
                    SessionStorageError::corrupt(format!("stored user is not valid JSON: {err}"))
                })
            })
            .transpose()
    }

    /// The full session, when every key is present.
    pub fn session(&self) -> Result<Option<Session>, SessionStorageError> {
        let (Some(access_token), Some(refresh_token), Some(role), Some(user)) = (
            self.access_token()?,
            self.refresh_token()?,
            self.role()?,
            self.user()?,
        ) else {
            return Ok(None);
        };
        Ok(Some(Session {
            access_token,
            refresh_token,
            role,
            user,
        }))
    }

    /// Persist every part of `session`.
    pub fn save(&self, session: &Session) -> Result<(), SessionStorageError> {
        let user = serde_json::to_string(&session.user)
            .map_err(|err| SessionStorageError::corrupt(err.to_string()))?;
        self.set_tokens(&session.access_token, &session.refresh_token)?;
        self.storage.set(ROLE_KEY, session.role.as_str())?;
        self.storage.set(USER_KEY, &user)
    }

    /// Replace both tokens, leaving role and profile untouched.
    pub fn set_tokens(&self, access_token: &str, refresh_token: &str) -> Result<(), SessionStorageError> {
        self.storage.set(TOKEN_KEY, access_token)?;
        self.storage.set(REFRESH_TOKEN_KEY, refresh_token)
    }

    /// Remove every session key.
    ///
    /// All keys are attempted even when one removal fails; the first failure
    /// is returned.
    pub fn clear(&self) -> Result<(), SessionStorageError> {
        let mut first_error = None;
        for key in SESSION_KEYS {
            if let Err(err) = self.storage.remove(key) {
                warn!(key, error = %err, "failed to remove session key");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{InMemorySessionStorage, MockSessionStorage};

    #[fixture]
    fn session() -> Session {
        Session {
            access_token: "access".to_owned(),
            refresh_token: "refresh".to_owned(),
            role: Role::Doctor,
            user: UserRecord {
                id: "u1".to_owned(),
                name: "Dr. Ada Lovelace".to_owned(),
                email: "ada.lovelace@example.org".to_owned(),
                role: Role::Doctor,
            },
        }
    }

    fn memory_store() -> (Arc<InMemorySessionStorage>, SessionStore) {
        let storage = Arc::new(InMemorySessionStorage::new());
        let store = SessionStore::new(storage.clone());
        (storage, store)
    }

    #[rstest]
    fn save_uses_fixed_keys(session: Session) {
        let (storage, store) = memory_store();
        store.save(&session).expect("save");

        assert_eq!(storage.get("token").expect("get").as_deref(), Some("access"));
        assert_eq!(storage.get("refreshToken").expect("get").as_deref(), Some("refresh"));
        assert_eq!(storage.get("role").expect("get").as_deref(), Some("doctor"));
        assert!(storage.get("user").expect("get").is_some());
        assert_eq!(store.session().expect("session"), Some(session));
    }

    #[rstest]
    fn partial_session_reads_as_absent(session: Session) {
        let (storage, store) = memory_store();
        store.save(&session).expect("save");
        storage.remove(USER_KEY).expect("remove");

        assert_eq!(store.session().expect("session"), None);
        assert_eq!(store.access_token().expect("token").as_deref(), Some("access"));
    }

    #[rstest]
    fn clear_removes_every_key(session: Session) {
        let (storage, store) = memory_store();
        store.save(&session).expect("save");
        store.clear().expect("clear");
        assert!(storage.is_empty());
    }

    #[test]
    fn clear_continues_past_failures_and_reports_the_first() {
        let mut storage = MockSessionStorage::new();
        storage
            .expect_remove()
            .withf(|key| key == TOKEN_KEY)
            .times(1)
            .returning(|_| Err(SessionStorageError::io("locked")));
        storage
            .expect_remove()
            .withf(|key| key == REFRESH_TOKEN_KEY)
            .times(1)
            .returning(|_| Err(SessionStorageError::io("still locked")));
        storage
            .expect_remove()
            .withf(|key| key == ROLE_KEY)
            .times(1)
            .returning(|_| Ok(()));
        storage
            .expect_remove()
            .withf(|key| key == USER_KEY)
            .times(1)
            .returning(|_| Ok(()));

        let store = SessionStore::new(Arc::new(storage));
        assert_eq!(store.clear(), Err(SessionStorageError::io("locked")));
    }

    #[test]
    fn corrupt_role_is_reported() {
        let (storage, store) = memory_store();
        storage.set(ROLE_KEY, "janitor").expect("set");
        assert!(matches!(
            store.role(),
            Err(SessionStorageError::Corrupt { .. })
        ));
    }

    #[test]
    fn set_tokens_keeps_profile() {
        let (storage, store) = memory_store();
        storage.set(ROLE_KEY, "admin").expect("set");
        store.set_tokens("a2", "r2").expect("set tokens");
        assert_eq!(store.role().expect("role"), Some(Role::Admin));
        assert_eq!(store.refresh_token().expect("refresh").as_deref(), Some("r2"));
    }
}
