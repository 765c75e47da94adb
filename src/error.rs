use thiserror::Error;

/// Unified error type for release-maker operations
#[derive(Error, Debug)]
pub enum ReleaseMakerError {
    #[error("Could not fetch {url}! ({status}) Caused by: {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Unexpected forge response: {0}")]
    Forge(String),

    #[error("Git command failed: {0}")]
    Git(String),

    #[error("Hook failed: {0}")]
    Hook(String),

    #[error("Changelog error: {0}")]
    Changelog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in release-maker
pub type Result<T> = std::result::Result<T, ReleaseMakerError>;

impl ReleaseMakerError {
    /// Create an HTTP status error, keeping the response body for the diagnostic
    pub fn http(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        ReleaseMakerError::Http {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Version(msg.into())
    }

    pub fn token(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Token(msg.into())
    }

    pub fn forge(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Forge(msg.into())
    }

    pub fn git(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Git(msg.into())
    }

    pub fn hook(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Hook(msg.into())
    }

    pub fn changelog(msg: impl Into<String>) -> Self {
        ReleaseMakerError::Changelog(msg.into())
    }
}
