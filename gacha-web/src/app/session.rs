//! Session context shared by every route.
use crate::storage::AppStorage;
use gacha_core::{GuardState, SessionStore, User};
use std::rc::Rc;
use yew::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// Read durable storage once after mount.
    Init,
    Login(User),
    Logout,
    /// Fresh balances or profile data from the backend.
    Update(User),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    store: SessionStore<AppStorage>,
}

impl SessionState {
    /// Unread session: guarded routes show a placeholder until `Init`.
    #[must_use]
    pub const fn new(storage: AppStorage) -> Self {
        Self {
            store: SessionStore::new(storage),
        }
    }

    /// Session already read from storage.
    #[must_use]
    pub fn restored(storage: AppStorage) -> Self {
        Self {
            store: SessionStore::restore(storage),
        }
    }

    #[must_use]
    pub const fn user(&self) -> Option<&User> {
        self.store.user()
    }

    #[must_use]
    pub const fn guard_state(&self) -> GuardState {
        self.store.guard_state()
    }
}

impl Reducible for SessionState {
    type Action = SessionAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut store = self.store.clone();
        let outcome = match action {
            SessionAction::Init => {
                store.init();
                Ok(())
            }
            SessionAction::Login(user) => {
                log::debug!("signed in as {}", user.username);
                store.login(user)
            }
            SessionAction::Logout => {
                log::debug!("signed out");
                store.logout()
            }
            SessionAction::Update(user) => store.update_user(user),
        };
        if let Err(err) = outcome {
            log::warn!("session not persisted: {err}");
        }
        Rc::new(Self { store })
    }
}

pub type SessionContext = UseReducerHandle<SessionState>;

/// Session handle from the nearest provider, if any.
#[hook]
pub fn use_session() -> Option<SessionContext> {
    use_context::<SessionContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gacha_core::MemoryStorage;

    fn player() -> User {
        User {
            id: 3,
            username: "mei".into(),
            email: None,
            coins: 500,
            gems: 2,
            experience_points: 0,
            level: 1,
            created_at: None,
        }
    }

    #[test]
    fn reducer_walks_the_lifecycle() {
        let storage = MemoryStorage::default();
        let state = Rc::new(SessionState::new(storage.clone()));
        assert_eq!(state.guard_state(), GuardState::Loading);

        let state = state.reduce(SessionAction::Init);
        assert_eq!(state.guard_state(), GuardState::Unauthenticated);

        let state = state.reduce(SessionAction::Login(player()));
        assert_eq!(state.guard_state(), GuardState::Authenticated);

        let reloaded = SessionState::restored(storage.clone());
        assert_eq!(reloaded.user().map(|u| u.id), Some(3));

        let state = state.reduce(SessionAction::Logout);
        assert!(state.user().is_none());
        assert!(SessionState::restored(storage).user().is_none());
    }

    #[test]
    fn update_replaces_balances() {
        let state = Rc::new(SessionState::restored(MemoryStorage::default()))
            .reduce(SessionAction::Login(player()));
        let state = state.reduce(SessionAction::Update(User {
            coins: 400,
            ..player()
        }));
        assert_eq!(state.user().map(|u| u.coins), Some(400));
    }
}
