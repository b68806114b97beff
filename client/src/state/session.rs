//! Session store: authentication flag and role of the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Login writes the session, logout clears it, and every other component only
//! reads snapshots. The route guard decides on a `Session` value and never
//! touches storage, so it stays a pure function.
//!
//! PERSISTENCE
//! ===========
//! Three fixed keys: `isAuthenticated` (`"true"`), `userRole` and `token`. A
//! missing or malformed key reads as `Session::Anonymous`. Sessions never
//! expire; they last until `logout`.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;

use leptos::prelude::*;
use serde::{Deserialize, Serialize};

use crate::util::storage::{BrowserStorage, KeyValueStorage};

pub const AUTHENTICATED_KEY: &str = "isAuthenticated";
pub const ROLE_KEY: &str = "userRole";
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Who the signed-in user is acting as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Hospital,
    Researcher,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Hospital, Role::Researcher];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::Researcher => "researcher",
        }
    }

    /// Human-facing label used in role pickers.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Hospital => "Hospital Staff",
            Self::Researcher => "Researcher",
        }
    }

    /// Landing path after login and target of role-mismatch redirects.
    #[must_use]
    pub fn home_path(self) -> &'static str {
        match self {
            Self::Hospital => crate::routing::table::PATIENTS_PATH,
            Self::Researcher => crate::routing::table::RESEARCH_PREFIX,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = SessionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "hospital" => Ok(Self::Hospital),
            "researcher" => Ok(Self::Researcher),
            other => Err(SessionError::UnknownRole(other.to_owned())),
        }
    }
}

/// Authentication snapshot. A role exists exactly when the user is
/// authenticated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(Role),
}

impl Session {
    #[must_use]
    pub fn is_authenticated(self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn role(self) -> Option<Role> {
        match self {
            Self::Anonymous => None,
            Self::Authenticated(role) => Some(role),
        }
    }
}

/// Sole owner of the persisted session keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl SessionStore<BrowserStorage> {
    #[must_use]
    pub fn browser() -> Self {
        Self::new(BrowserStorage)
    }
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Mark the user as signed in. Credentials must already have been
    /// confirmed by the caller.
    pub fn login(&self, role: Role) -> Session {
        self.storage.set(ROLE_KEY, role.as_str());
        self.storage.set(AUTHENTICATED_KEY, "true");
        log::info!("session: signed in as {role}");
        Session::Authenticated(role)
    }

    /// Parse a wire role and sign in. Unknown roles leave the session as is.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownRole` when `raw` names no known role.
    pub fn login_as(&self, raw: &str) -> Result<Session, SessionError> {
        let role = raw.parse::<Role>()?;
        Ok(self.login(role))
    }

    /// Clear every session key. Safe to call repeatedly.
    pub fn logout(&self) -> Session {
        self.storage.remove(AUTHENTICATED_KEY);
        self.storage.remove(ROLE_KEY);
        self.storage.remove(TOKEN_KEY);
        log::info!("session: signed out");
        Session::Anonymous
    }

    #[must_use]
    pub fn current(&self) -> Session {
        if self.storage.get(AUTHENTICATED_KEY).as_deref() != Some("true") {
            return Session::Anonymous;
        }
        match self.storage.get(ROLE_KEY).map(|raw| raw.parse::<Role>()) {
            Some(Ok(role)) => Session::Authenticated(role),
            Some(Err(e)) => {
                log::warn!("session: ignoring persisted session ({e})");
                Session::Anonymous
            }
            None => Session::Anonymous,
        }
    }

    /// Keep the bearer token issued at login for API calls.
    pub fn attach_token(&self, token: &str) {
        self.storage.set(TOKEN_KEY, token);
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }
}

/// Reactive session handle provided through Leptos context.
///
/// The signal holds `None` until `restore` has read browser storage. That
/// never happens during SSR, so server-rendered guarded pages show the
/// loading state and the browser takes over after hydration.
#[derive(Clone, Copy)]
pub struct SessionContext {
    state: RwSignal<Option<Session>>,
    signed_out: RwSignal<bool>,
    store: SessionStore<BrowserStorage>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionContext {
    #[must_use]
    pub fn new() -> Self {
        Self { state: RwSignal::new(None), signed_out: RwSignal::new(false), store: SessionStore::browser() }
    }

    /// Tracked; true once the user logged out in this tab and until the next
    /// login.
    #[must_use]
    pub fn signed_out(&self) -> bool {
        self.signed_out.get()
    }

    /// Tracked read; `None` while the session is not restored yet.
    #[must_use]
    pub fn snapshot(&self) -> Option<Session> {
        self.state.get()
    }

    pub fn restore(&self) {
        self.state.set(Some(self.store.current()));
    }

    pub fn login(&self, role: Role, token: &str) {
        let session = self.store.login(role);
        self.store.attach_token(token);
        self.signed_out.set(false);
        self.state.set(Some(session));
    }

    /// `login` for a role still in wire form.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::UnknownRole`; nothing is stored in that case.
    pub fn login_as(&self, raw: &str, token: &str) -> Result<(), SessionError> {
        let session = self.store.login_as(raw)?;
        self.store.attach_token(token);
        self.signed_out.set(false);
        self.state.set(Some(session));
        Ok(())
    }

    pub fn logout(&self) {
        let session = self.store.logout();
        self.signed_out.set(true);
        self.state.set(Some(session));
    }
}
