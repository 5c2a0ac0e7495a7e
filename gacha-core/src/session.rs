//! Authenticated-user session with write-through persistence.
//!
//! The store is created once at the application root and handed to views
//! explicitly. It starts in a loading state until [`SessionStore::init`] has
//! read durable storage exactly once.
use crate::constants::SESSION_STORAGE_KEY;
use crate::guard::GuardState;
use crate::model::User;
use thiserror::Error;

/// Durable key/value storage for client state (`localStorage`, a file, a map).
pub trait SessionStorage {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store cannot be reached.
    fn read(&self, key: &str) -> Result<Option<String>, Self::Error>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write.
    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error>;

    /// Remove whatever is stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the removal.
    fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session storage failed: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("session could not be encoded: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SessionError {
    fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Storage(Box::new(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStore<S> {
    storage: S,
    user: Option<User>,
    loading: bool,
}

impl<S: SessionStorage> SessionStore<S> {
    /// A store that has not yet looked at durable storage.
    pub const fn new(storage: S) -> Self {
        Self {
            storage,
            user: None,
            loading: true,
        }
    }

    /// Build a store and run [`Self::init`] immediately.
    pub fn restore(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.init();
        store
    }

    /// Load the persisted user once. Unreadable or corrupt data counts as "no session".
    pub fn init(&mut self) {
        if !self.loading {
            return;
        }
        self.user = match self.storage.read(SESSION_STORAGE_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(err) => {
                    log::warn!("Unable to parse stored auth user: {err}");
                    None
                }
            },
            Ok(None) => None,
            Err(err) => {
                log::warn!("Unable to read stored auth user: {err}");
                None
            }
        };
        self.loading = false;
        log::debug!("session initialised: {:?}", self.guard_state());
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub const fn guard_state(&self) -> GuardState {
        match (self.loading, &self.user) {
            (true, _) => GuardState::Loading,
            (false, Some(_)) => GuardState::Authenticated,
            (false, None) => GuardState::Unauthenticated,
        }
    }

    /// Replace the session with `user` and persist it.
    ///
    /// # Errors
    ///
    /// Returns an error if the user could not be written; the in-memory session is still set.
    pub fn login(&mut self, user: User) -> Result<(), SessionError> {
        self.persist(Some(user))
    }

    /// Clear the session and its persisted copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored copy could not be removed.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.persist(None)
    }

    /// Overwrite the session user (balances after a pull, a profile refresh).
    /// Does nothing without an active session.
    ///
    /// # Errors
    ///
    /// Returns an error if the user could not be written.
    pub fn update_user(&mut self, user: User) -> Result<(), SessionError> {
        if self.user.is_none() {
            log::debug!("dropping user update for {}: no active session", user.id);
            return Ok(());
        }
        self.persist(Some(user))
    }

    pub const fn storage(&self) -> &S {
        &self.storage
    }

    fn persist(&mut self, user: Option<User>) -> Result<(), SessionError> {
        self.loading = false;
        let result = match &user {
            Some(user) => serde_json::to_string(user)
                .map_err(SessionError::from)
                .and_then(|raw| {
                    self.storage
                        .write(SESSION_STORAGE_KEY, &raw)
                        .map_err(SessionError::storage)
                }),
            None => self
                .storage
                .remove(SESSION_STORAGE_KEY)
                .map_err(SessionError::storage),
        };
        self.user = user;
        if let Err(err) = &result {
            log::warn!("session write-through failed: {err}");
        }
        result
    }
}

/// In-memory storage shared between clones, standing in for a browser profile.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: std::rc::Rc<std::cell::RefCell<std::collections::HashMap<String, String>>>,
}

impl PartialEq for MemoryStorage {
    fn eq(&self, other: &Self) -> bool {
        std::rc::Rc::ptr_eq(&self.entries, &other.entries)
    }
}

impl Eq for MemoryStorage {}

impl SessionStorage for MemoryStorage {
    type Error = std::convert::Infallible;

    fn read(&self, key: &str) -> Result<Option<String>, Self::Error> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Self::Error> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
