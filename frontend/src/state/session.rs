//! Session state machine shared by the API client and the reactive auth state.
//!
//! `Anonymous -> Authenticated -> (expired | logged out) -> Anonymous`.
//! The held session is mirrored in durable storage under two keys that are
//! always written and cleared together.

use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use chrono::{DateTime, Utc};

use crate::{
    api::{ApiError, UserResponse},
    utils::{
        notice::{BrowserNotifier, Notifier},
        storage::{default_storage, SessionStorage, StorageError},
        token,
    },
};

pub const ACCESS_TOKEN_KEY: &str = "accessToken";
pub const CURRENT_USER_KEY: &str = "currentUser";
pub const SESSION_EXPIRED_NOTICE: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: UserResponse,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl SessionState {
    pub fn session(&self) -> Option<&Session> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(session) => Some(session),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

type Listener = Rc<dyn Fn(&SessionState)>;

struct Inner {
    storage: Rc<dyn SessionStorage>,
    notifier: Rc<dyn Notifier>,
    state: RefCell<SessionState>,
    expiry_notice_pending: Rc<Cell<bool>>,
    listeners: RefCell<Vec<Listener>>,
}

/// Owns the session. Clones share the same state.
#[derive(Clone)]
pub struct SessionController {
    inner: Rc<Inner>,
}

impl SessionController {
    pub fn new(storage: Rc<dyn SessionStorage>, notifier: Rc<dyn Notifier>) -> Self {
        Self {
            inner: Rc::new(Inner {
                storage,
                notifier,
                state: RefCell::new(SessionState::Anonymous),
                expiry_notice_pending: Rc::new(Cell::new(false)),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn browser() -> Self {
        Self::new(default_storage(), Rc::new(BrowserNotifier))
    }

    pub fn snapshot(&self) -> SessionState {
        self.inner.state.borrow().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.inner
            .state
            .borrow()
            .session()
            .map(|session| session.token.clone())
    }

    pub fn user(&self) -> Option<UserResponse> {
        self.inner
            .state
            .borrow()
            .session()
            .map(|session| session.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.inner
            .state
            .borrow()
            .session()
            .map(|session| session.user.is_admin())
            .unwrap_or(false)
    }

    pub fn expiry_notice_pending(&self) -> bool {
        self.inner.expiry_notice_pending.get()
    }

    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.inner.listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Rebuilds the session from storage. Never notifies the user.
    pub fn restore(&self, now: DateTime<Utc>) -> SessionState {
        match self.read_stored(now) {
            Ok(Some(session)) => {
                log::info!("Restored session for {}", session.user.email);
                self.transition(SessionState::Authenticated(session));
            }
            Ok(None) => {
                self.purge_storage();
                self.transition(SessionState::Anonymous);
            }
            Err(err) => {
                log::warn!("Discarding stored session: {}", err);
                self.purge_storage();
                self.transition(SessionState::Anonymous);
            }
        }
        self.snapshot()
    }

    fn read_stored(&self, now: DateTime<Utc>) -> Result<Option<Session>, StorageError> {
        let storage = &self.inner.storage;
        let token = storage.get(ACCESS_TOKEN_KEY)?;
        let user = storage.get(CURRENT_USER_KEY)?;
        let (token, user) = match (token, user) {
            (Some(token), Some(user)) => (token, user),
            (None, None) => return Ok(None),
            _ => {
                log::warn!("Half-written session found in storage; purging");
                return Ok(None);
            }
        };
        let user: UserResponse = match serde_json::from_str(&user) {
            Ok(user) => user,
            Err(err) => {
                log::warn!("Stored user is not valid JSON: {}", err);
                return Ok(None);
            }
        };
        let expires_at = match token::decode_expiry(&token) {
            Some(expires_at) if expires_at > now => expires_at,
            Some(_) => {
                log::warn!("Stored token expired; purging session");
                return Ok(None);
            }
            None => {
                log::warn!("Stored token has no readable expiry; purging session");
                return Ok(None);
            }
        };
        Ok(Some(Session {
            token,
            user,
            expires_at,
        }))
    }

    pub fn login(&self, token: String, user: UserResponse) -> Result<(), ApiError> {
        let expires_at = token::decode_expiry(&token)
            .ok_or_else(|| ApiError::unknown("Received a token without an expiry"))?;
        let user_json =
            serde_json::to_string(&user).map_err(|err| ApiError::unknown(err.to_string()))?;

        let storage = &self.inner.storage;
        storage
            .set(ACCESS_TOKEN_KEY, &token)
            .map_err(|err| ApiError::unknown(err.to_string()))?;
        if let Err(err) = storage.set(CURRENT_USER_KEY, &user_json) {
            if let Err(rollback) = storage.remove(ACCESS_TOKEN_KEY) {
                log::warn!("Could not roll back stored token: {}", rollback);
            }
            return Err(ApiError::unknown(err.to_string()));
        }

        self.inner.expiry_notice_pending.set(false);
        log::info!("Logged in as {}", user.email);
        self.transition(SessionState::Authenticated(Session {
            token,
            user,
            expires_at,
        }));
        Ok(())
    }

    pub fn logout(&self) {
        self.purge_storage();
        if self.is_authenticated() {
            log::info!("Logged out");
        }
        self.transition(SessionState::Anonymous);
    }

    /// Handles a 401 from a protected call. Concurrent failures share one notice.
    pub fn on_auth_failure(&self) {
        let was_active = self.is_authenticated();
        self.purge_storage();
        self.transition(SessionState::Anonymous);
        if !was_active {
            return;
        }
        log::warn!("Session rejected by the server");

        let pending = &self.inner.expiry_notice_pending;
        if pending.get() {
            return;
        }
        pending.set(true);
        let pending = Rc::clone(pending);
        let notifier = Rc::clone(&self.inner.notifier);
        self.inner.notifier.defer(Box::new(move || {
            notifier.alert(SESSION_EXPIRED_NOTICE);
            pending.set(false);
        }));
    }

    /// Drops a held session whose token has expired. Returns whether it did.
    pub fn expire_if_stale(&self, now: DateTime<Utc>) -> bool {
        let stale = self
            .inner
            .state
            .borrow()
            .session()
            .map(|session| session.expires_at <= now)
            .unwrap_or(false);
        if stale {
            log::warn!("Session token expired");
            self.purge_storage();
            self.transition(SessionState::Anonymous);
        }
        stale
    }

    fn purge_storage(&self) {
        for key in [ACCESS_TOKEN_KEY, CURRENT_USER_KEY] {
            if let Err(err) = self.inner.storage.remove(key) {
                log::warn!("{}", err);
            }
        }
    }

    fn transition(&self, next: SessionState) {
        self.inner.state.replace(next.clone());
        let listeners = self.inner.listeners.borrow().clone();
        for listener in listeners {
            listener(&next);
        }
    }
}
