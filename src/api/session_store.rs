use std::cell::RefCell;

use crate::models::Session;

/// localStorage key holding the bearer token
pub const TOKEN_KEY: &str = "token";
/// localStorage key holding the serialized user
pub const USER_KEY: &str = "user";

/// Persisted session state shared by the API client and the auth context.
pub trait SessionStore {
    /// The full session, if both token and user are present and readable
    fn load(&self) -> Option<Session>;

    /// Bearer token to attach to outgoing requests
    fn token(&self) -> Option<String>;

    fn save(&self, session: &Session);

    /// Forget the session. Must be idempotent.
    fn clear(&self);
}

/// Session persisted in the browser's `localStorage`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSessionStore;

impl LocalStorageSessionStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok().flatten()
    }
}

impl SessionStore for LocalStorageSessionStore {
    fn load(&self) -> Option<Session> {
        let token = Self::get(TOKEN_KEY)?;
        let user_json = Self::get(USER_KEY)?;

        match serde_json::from_str(&user_json) {
            Ok(user) => Some(Session { token, user }),
            Err(e) => {
                tracing::warn!("Ignoring unreadable stored user: {}", e);
                None
            }
        }
    }

    fn token(&self) -> Option<String> {
        Self::get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    fn save(&self, session: &Session) {
        let Some(storage) = Self::storage() else {
            tracing::warn!("localStorage unavailable, session will not survive reload");
            return;
        };

        let user_json = match serde_json::to_string(&session.user) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Failed to serialize user: {}", e);
                return;
            }
        };

        if let Err(e) = storage.set_item(TOKEN_KEY, &session.token) {
            tracing::warn!("Failed to store token: {:?}", e);
        }
        if let Err(e) = storage.set_item(USER_KEY, &user_json) {
            tracing::warn!("Failed to store user: {:?}", e);
        }
    }

    fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(TOKEN_KEY);
            let _ = storage.remove_item(USER_KEY);
        }
    }
}

/// Session held in memory only. Used by tests and non-browser hosts.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RefCell<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RefCell::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn token(&self) -> Option<String> {
        self.session.borrow().as_ref().map(|s| s.token.clone())
    }

    fn save(&self, session: &Session) {
        *self.session.borrow_mut() = Some(session.clone());
    }

    fn clear(&self) {
        self.session.borrow_mut().take();
    }
}
