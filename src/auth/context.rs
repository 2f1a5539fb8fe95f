//! Auth context — the process-wide source of truth for "who is logged in".
//!
//! A three-state machine broadcast over a watch channel so consumers (the
//! route guard, command dispatch) observe transitions:
//!
//! - `Initializing` on construction; `initialize()` resolves it by
//!   validating any stored token against the server. A rejected token is
//!   recovered locally — session cleared, state `Anonymous` — never
//!   surfaced as an error.
//! - `Anonymous → Authenticated` on successful `login()`.
//! - `Authenticated → Anonymous` on `logout()`, which always succeeds.
//!
//! There is no intermediate "refreshing" state, and concurrent logins are
//! not guarded: last write wins.

use tokio::sync::watch;

use super::AuthService;
use crate::errors::ApiError;
use crate::models::user::{AuthUser, LoginCredentials};

#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    Initializing,
    Authenticated(AuthUser),
    Anonymous,
}

pub struct AuthContext {
    auth: AuthService,
    state: watch::Sender<AuthState>,
}

impl AuthContext {
    pub fn new(auth: AuthService) -> Self {
        let (state, _) = watch::channel(AuthState::Initializing);
        Self { auth, state }
    }

    /// Resolve the initial state from the persisted session.
    pub async fn initialize(&self) {
        if !self.auth.is_authenticated() {
            self.state.send_replace(AuthState::Anonymous);
            return;
        }
        match self.auth.get_me().await {
            Ok(user) => {
                tracing::debug!(username = %user.username, "restored session");
                self.state.send_replace(AuthState::Authenticated(user));
            }
            Err(e) => {
                tracing::warn!(error = %e, "startup session validation failed, clearing session");
                self.auth.logout();
                self.state.send_replace(AuthState::Anonymous);
            }
        }
    }

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser, ApiError> {
        let user = self.auth.login(credentials).await?;
        self.state
            .send_replace(AuthState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Always ends `Anonymous`; idempotent.
    pub fn logout(&self) {
        self.auth.logout();
        self.state.send_replace(AuthState::Anonymous);
    }

    pub fn current(&self) -> AuthState {
        self.state.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(*self.state.borrow(), AuthState::Authenticated(_))
    }

    pub fn user(&self) -> Option<AuthUser> {
        match &*self.state.borrow() {
            AuthState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Watch auth-state transitions.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }
}
