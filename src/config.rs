use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Tucan Manager API, without trailing slash.
    pub api_base_url: String,
    /// Path of the persisted session file (token + cached profile).
    pub session_file: PathBuf,
}

pub fn load() -> anyhow::Result<Config> {
    dotenvy::dotenv().ok();

    let api_base_url = std::env::var("TUCAN_API_URL")
        .unwrap_or_else(|_| "http://localhost:8000".into())
        .trim_end_matches('/')
        .to_string();

    let session_file = match std::env::var("TUCAN_SESSION_FILE") {
        Ok(path) => PathBuf::from(path),
        Err(_) => default_session_file(),
    };

    Ok(Config {
        api_base_url,
        session_file,
    })
}

/// `<data dir>/tucan/session.json`, or a dotfile in the working directory
/// when the platform has no resolvable data directory.
fn default_session_file() -> PathBuf {
    match dirs::data_dir() {
        Some(dir) => dir.join("tucan").join("session.json"),
        None => PathBuf::from(".tucan-session.json"),
    }
}

// ── Tests ──────────────────────────────────────────────────────
