//! Error types for catalog loading.

use tasteshift_types::{ParseIdError, ThemeId};

/// Errors that can occur while loading or querying cuisine content.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The requested theme has no content.
    #[error("no catalog content for theme: {0}")]
    UnknownTheme(ThemeId),

    /// Failed to read the overrides file.
    #[error("failed to read catalog overrides: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the overrides file.
    #[error("failed to parse catalog overrides: {0}")]
    Parse(#[from] toml::de::Error),

    /// An overrides key did not name a known prompt or section.
    #[error("invalid catalog key: {0}")]
    InvalidKey(#[from] ParseIdError),
}
