//! Auth service — credential exchange and session persistence.
//!
//! Owns the login protocol: credentials go to the token endpoint as
//! form-encoded data (OAuth2 password form, not JSON), the returned
//! bearer token is persisted, and the profile endpoint is called
//! immediately to populate the cached user.

pub mod context;
pub mod guard;

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::AUTHORIZATION;

use crate::errors::{error_detail, ApiError};
use crate::models::user::{AuthUser, LoginCredentials, TokenResponse};
use crate::session::SessionStore;

pub struct AuthService {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl AuthService {
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let http = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        }
    }

    /// Exchange credentials for a bearer token, persist it, then fetch
    /// and persist the profile. On rejection the session is left
    /// untouched and the server's message is propagated verbatim.
    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthUser, ApiError> {
        let resp = self
            .http
            .post(format!("{}/auth/login", self.base_url))
            .form(&[
                ("username", credentials.username.as_str()),
                ("password", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "login transport failure");
                ApiError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_detail(&body).unwrap_or_else(|| "Login failed".to_string());
            tracing::warn!(%status, "login rejected");
            return Err(ApiError::Login(message));
        }

        let body = resp.text().await.map_err(ApiError::Transport)?;
        let token: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "malformed token response");
            ApiError::Payload(e)
        })?;

        self.session.set_token(&token.access_token)?;

        let user = self.get_me().await?;
        self.session.set_user(&user)?;

        tracing::info!(username = %user.username, "login succeeded");
        Ok(user)
    }

    /// Fetch the profile for the stored token. Fails with [`ApiError::NoSession`]
    /// when nothing is stored locally, and [`ApiError::SessionRejected`]
    /// when the server no longer accepts the token.
    pub async fn get_me(&self) -> Result<AuthUser, ApiError> {
        let Some(token) = self.session.token() else {
            tracing::debug!("get_me without a stored token");
            return Err(ApiError::NoSession);
        };

        let resp = self
            .http
            .get(format!("{}/auth/me", self.base_url))
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "profile fetch transport failure");
                ApiError::Transport(e)
            })?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "stored token rejected by server");
            return Err(ApiError::SessionRejected(status));
        }

        let body = resp.text().await.map_err(ApiError::Transport)?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, "malformed profile response");
            ApiError::Payload(e)
        })
    }

    /// Clear the persisted token and cached profile, unconditionally.
    /// Logout never fails.
    pub fn logout(&self) {
        self.session.clear();
        tracing::info!("session cleared");
    }

    /// Pure local check for token presence. Deliberately does not
    /// validate against the server: a stale-but-present token is treated
    /// as authenticated until the first protected call fails.
    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    /// The locally cached profile, without a server round-trip.
    pub fn cached_user(&self) -> Option<AuthUser> {
        self.session.user()
    }
}
