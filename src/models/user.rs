use serde::{Deserialize, Serialize};

/// Username/password pair submitted to the token endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginCredentials {
    pub username: String,
    pub password: String,
}

/// Admin user profile as served by `/auth/me`.
///
/// This is cached locally after login and is not authoritative — it is
/// only re-validated against the server at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_active: bool,
}

/// Bearer credential issued by `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}
