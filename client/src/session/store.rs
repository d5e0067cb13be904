use protocol::{Role, UserProfile};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{ClientError, Result};
use crate::session::storage::{PersistedSession, SessionStorage};

/// Token and user of a logged-in session. One cannot exist without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub token: String,
    pub user: UserProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

struct Inner {
    current: RwLock<Option<AuthSession>>,
    storage: Arc<dyn SessionStorage>,
}

/// Process-wide session handle. Clones share the same record.
///
/// The record only changes through [`SessionStore::set_session`] and
/// [`SessionStore::clear_session`]; both keep storage and memory in step.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Inner>,
}

impl SessionStore {
    /// Restores whatever session the storage holds. Unreadable records are
    /// logged and treated as anonymous.
    pub fn load(storage: Arc<dyn SessionStorage>) -> Self {
        let restored = match storage.load() {
            Ok(Some(persisted)) if !persisted.token.is_empty() => {
                log::info!(
                    "Restored session for user {} (saved at {})",
                    persisted.user.username,
                    persisted.saved_at
                );
                Some(AuthSession {
                    token: persisted.token,
                    user: persisted.user,
                })
            }
            Ok(Some(_)) => {
                log::warn!("Stored session has an empty token, starting anonymous");
                None
            }
            Ok(None) => None,
            Err(err) => {
                log::warn!("Failed to restore session: {}. Starting anonymous.", err);
                None
            }
        };

        Self {
            inner: Arc::new(Inner {
                current: RwLock::new(restored),
                storage,
            }),
        }
    }

    /// Replaces any existing session. Storage is written first; memory only
    /// changes once the record is durable.
    pub fn set_session(&self, user: UserProfile, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        if token.is_empty() {
            return Err(ClientError::Validation(
                "session token must not be empty".to_string(),
            ));
        }

        let mut current = self.write();
        let persisted = PersistedSession::new(token, user);
        self.inner.storage.save(&persisted)?;

        log::info!(
            "Session established for {} ({})",
            persisted.user.username,
            persisted.user.role
        );
        *current = Some(AuthSession {
            token: persisted.token,
            user: persisted.user,
        });
        Ok(())
    }

    /// Drops the session. Memory is always cleared, even when removing the
    /// stored record fails; that failure is still returned.
    pub fn clear_session(&self) -> Result<()> {
        let mut current = self.write();
        if let Some(previous) = current.take() {
            log::info!("Session cleared for {}", previous.user.username);
        }
        self.inner.storage.clear()?;
        Ok(())
    }

    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    pub fn role(&self) -> Option<Role> {
        self.read().as_ref().map(|s| s.user.role.clone())
    }

    pub fn snapshot(&self) -> Option<AuthSession> {
        self.read().clone()
    }

    pub fn state(&self) -> SessionState {
        if self.read().is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<AuthSession>> {
        self.inner.current.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<AuthSession>> {
        self.inner.current.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::storage::{MemorySessionStorage, StorageError};

    struct FailingStorage;

    impl SessionStorage for FailingStorage {
        fn load(&self) -> std::result::Result<Option<PersistedSession>, StorageError> {
            Err(StorageError::Read(std::io::Error::other("disk gone")))
        }

        fn save(&self, _: &PersistedSession) -> std::result::Result<(), StorageError> {
            Err(StorageError::Write(std::io::Error::other("disk gone")))
        }

        fn clear(&self) -> std::result::Result<(), StorageError> {
            Err(StorageError::Remove(std::io::Error::other("disk gone")))
        }
    }

    fn admin() -> UserProfile {
        UserProfile::new("u1", "superadmin", Role::SuperAdmin)
    }

    fn store() -> (SessionStore, Arc<MemorySessionStorage>) {
        let storage = Arc::new(MemorySessionStorage::new());
        (SessionStore::load(storage.clone()), storage)
    }

    #[test]
    fn test_starts_anonymous() {
        let (store, _) = store();
        assert_eq!(store.state(), SessionState::Anonymous);
        assert!(store.token().is_none());
        assert!(store.user().is_none());
    }

    #[test]
    fn test_set_session_persists_both_fields() {
        let (store, storage) = store();
        store.set_session(admin(), "tok1").unwrap();

        assert_eq!(store.state(), SessionState::Authenticated);
        assert_eq!(store.token().as_deref(), Some("tok1"));
        assert_eq!(store.role(), Some(Role::SuperAdmin));

        let persisted = storage.load().unwrap().unwrap();
        assert_eq!(persisted.token, "tok1");
        assert_eq!(persisted.user, admin());
    }

    #[test]
    fn test_relogin_replaces_session() {
        let (store, _) = store();
        store.set_session(admin(), "tok1").unwrap();
        store
            .set_session(UserProfile::new("u2", "clerk", Role::Staff), "tok2")
            .unwrap();

        let session = store.snapshot().unwrap();
        assert_eq!(session.token, "tok2");
        assert_eq!(session.user.username, "clerk");
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let (store, _) = store();
        let err = store.set_session(admin(), "").unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_clear_twice_matches_clear_once() {
        let (store, storage) = store();
        store.set_session(admin(), "tok1").unwrap();

        store.clear_session().unwrap();
        let once = (store.state(), store.snapshot(), storage.load().unwrap());
        store.clear_session().unwrap();
        let twice = (store.state(), store.snapshot(), storage.load().unwrap());

        assert_eq!(once, twice);
        assert_eq!(twice.0, SessionState::Anonymous);
    }

    fn assert_consistent(store: &SessionStore, storage: &MemorySessionStorage, step: &str) {
        let persisted = storage.load().unwrap();
        match (store.token(), store.user()) {
            (Some(token), Some(user)) => {
                assert_eq!(store.state(), SessionState::Authenticated, "{}", step);
                let persisted = persisted.unwrap_or_else(|| panic!("{}: nothing persisted", step));
                assert_eq!(persisted.token, token, "{}", step);
                assert_eq!(persisted.user, user, "{}", step);
            }
            (None, None) => {
                assert_eq!(store.state(), SessionState::Anonymous, "{}", step);
                assert_eq!(persisted, None, "{}", step);
            }
            (token, user) => panic!("{}: token {:?} with user {:?}", step, token, user),
        }
    }

    #[test]
    fn test_token_and_user_stay_paired_across_mixed_sequence() {
        let (store, storage) = store();
        let clerk = UserProfile::new("u2", "clerk", Role::Staff);
        assert_consistent(&store, &storage, "initial");

        store.set_session(admin(), "tok1").unwrap();
        assert_consistent(&store, &storage, "set tok1");
        store.clear_session().unwrap();
        assert_consistent(&store, &storage, "clear");
        store.set_session(clerk.clone(), "tok2").unwrap();
        assert_consistent(&store, &storage, "set tok2");
        store.set_session(admin(), "tok3").unwrap();
        assert_consistent(&store, &storage, "replace with tok3");
        assert!(store.set_session(clerk.clone(), "").is_err());
        assert_consistent(&store, &storage, "rejected empty token");
        assert_eq!(store.token().as_deref(), Some("tok3"));
        store.clear_session().unwrap();
        assert_consistent(&store, &storage, "clear");
        store.clear_session().unwrap();
        assert_consistent(&store, &storage, "clear again");
        store.set_session(clerk, "tok4").unwrap();
        assert_consistent(&store, &storage, "set tok4");

        // Same call the request pipeline makes on a 401.
        store.clear_session().unwrap();
        assert_consistent(&store, &storage, "clear after 401");
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_failed_save_keeps_previous_state() {
        let store = SessionStore::load(Arc::new(FailingStorage));
        assert!(!store.is_authenticated());

        let err = store.set_session(admin(), "tok1").unwrap_err();
        assert!(matches!(err, ClientError::Storage(StorageError::Write(_))));
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_failed_remove_still_clears_memory() {
        let store = SessionStore {
            inner: Arc::new(Inner {
                current: RwLock::new(Some(AuthSession {
                    token: "tok1".to_string(),
                    user: admin(),
                })),
                storage: Arc::new(FailingStorage),
            }),
        };

        assert!(store.clear_session().is_err());
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_restores_persisted_session() {
        let storage = Arc::new(MemorySessionStorage::with_session(PersistedSession::new(
            "tok9".to_string(),
            admin(),
        )));
        let store = SessionStore::load(storage);
        assert_eq!(store.token().as_deref(), Some("tok9"));
    }

    #[test]
    fn test_unreadable_storage_starts_anonymous() {
        let store = SessionStore::load(Arc::new(FailingStorage));
        assert_eq!(store.state(), SessionState::Anonymous);
    }

    #[test]
    fn test_clones_share_state() {
        let (store, _) = store();
        let view = store.clone();
        store.set_session(admin(), "tok1").unwrap();
        assert!(view.is_authenticated());
        view.clear_session().unwrap();
        assert!(!store.is_authenticated());
    }
}
