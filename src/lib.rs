//! Tucan Console — typed client for the Tucan Manager admin API.
//!
//! Re-exports modules for the `tucan` binary and the integration tests
//! in `tests/`.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod models;
pub mod session;
pub mod workflows;
