//! Resolution of bundle-relative asset paths to loadable URLs.

use serde::{Deserialize, Serialize};

use crate::ThemeId;

/// Base URL of the packaged asset bundle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetBase(String);

impl Default for AssetBase {
    fn default() -> Self {
        Self("ext://tasteshift".to_string())
    }
}

impl AssetBase {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self(base.trim_end_matches('/').to_string())
    }

    /// Resolves any bundle-relative path.
    pub fn url(&self, relative: &str) -> String {
        format!("{}/{}", self.0, relative.trim_start_matches('/'))
    }

    /// Resolves a menu picture (`pictures/<image_ref>`).
    pub fn picture(&self, image_ref: &str) -> String {
        self.url(&format!("pictures/{}", image_ref.trim_start_matches('/')))
    }

    /// Resolves the avatar clip for a theme.
    pub fn avatar_clip(&self, theme: ThemeId) -> String {
        self.url(&format!("videos/{}/smiling.mp4", theme.as_str()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
