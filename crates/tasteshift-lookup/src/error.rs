use thiserror::Error;

/// Failures of an informational lookup. The `Display` text is what the
/// detail panel shows the user.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Cannot connect to backend server at {url}. Make sure the server is running.")]
    Connect { url: String },

    #[error("Request timeout. Please check your backend server is running.")]
    Timeout,

    #[error("{0}")]
    Backend(String),

    #[error("invalid response from backend: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("lookup request failed: {0}")]
    Http(reqwest::Error),
}
