pub mod client;
pub mod dashboard;
pub mod project;
pub mod service;
pub mod user;

use serde::{Deserialize, Serialize};

/// Generic `{"message": ...}` envelope returned by delete and other
/// confirmation-only endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
