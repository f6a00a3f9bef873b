// ABOUTME: Error type shared by the session store, audit sink, and config loader.
// ABOUTME: Only prompt validation surfaces to the host; everything else is logged and swallowed.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HookError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),
}

pub type Result<T> = std::result::Result<T, HookError>;
