//! Voice profile definitions.
//!
//! A `VoiceProfile` pairs the remote voice used for on-demand generation
//! with the pre-rendered local clip for the same `(theme, prompt)` key.

use serde::{Deserialize, Serialize};

/// Where a prompt's audio comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceProfile {
    /// Remote text-to-speech voice identifier. Empty disables remote generation.
    #[serde(default)]
    pub remote_voice_id: String,
    /// Path of the pre-rendered clip inside the extension asset bundle.
    pub local_asset: String,
}

impl VoiceProfile {
    pub fn new(remote_voice_id: impl Into<String>, local_asset: impl Into<String>) -> Self {
        Self {
            remote_voice_id: remote_voice_id.into(),
            local_asset: local_asset.into(),
        }
    }

    /// Whether a remote generation attempt is possible for this profile.
    pub fn has_remote_voice(&self) -> bool {
        !self.remote_voice_id.trim().is_empty()
    }
}
