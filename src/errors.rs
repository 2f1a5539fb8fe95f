use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure modes of the console's API layer.
///
/// These are terminal for the triggering action — there is no retry or
/// circuit breaking anywhere in the client. Callers decide whether a
/// failure is displayed, recovered from, or deliberately ignored.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered outside the 2xx range.
    #[error("request failed with status {status}")]
    Request {
        status: StatusCode,
        /// Best-effort server `detail` message, for diagnostics and display.
        detail: Option<String>,
    },

    /// A protected call was attempted with no token in the session store.
    #[error("no session token stored")]
    NoSession,

    /// The credential exchange was rejected. Carries the server-supplied
    /// message verbatim so the UI can display it unchanged.
    #[error("login rejected: {0}")]
    Login(String),

    /// The server rejected the stored bearer token (expired or invalid).
    #[error("stored session rejected by server ({0})")]
    SessionRejected(StatusCode),

    /// Fetch-level failure: offline, DNS, TLS, connection reset.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body did not match the endpoint's typed shape.
    #[error("malformed response payload: {0}")]
    Payload(#[from] serde_json::Error),

    /// Session store I/O failure.
    #[error("session store error: {0}")]
    Session(#[from] std::io::Error),
}

/// Error envelope the API uses for rejections: `{"detail": ...}`.
///
/// `detail` is usually a string, but FastAPI-style validation errors
/// carry structured payloads, so anything non-string is stringified.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
}

/// Extract the server `detail` message from a raw error body, if any.
pub(crate) fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

// ── Tests ──────────────────────────────────────────────────────
