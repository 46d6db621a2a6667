//! The single output channel: audio sink and avatar clip.

use async_trait::async_trait;
use tasteshift_types::ThemeId;

use crate::error::VoiceError;

/// What to play.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioSource {
    /// Encoded audio returned by remote synthesis.
    Bytes(Vec<u8>),
    /// A pre-rendered clip inside the asset bundle.
    Asset(String),
}

impl AudioSource {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bytes(_) => "remote",
            Self::Asset(_) => "local",
        }
    }
}

/// Plays audio. `play` resolves when playback ends, naturally or because
/// `stop` was called.
#[async_trait]
pub trait AudioSink: Send + Sync {
    async fn play(&self, source: AudioSource) -> Result<(), VoiceError>;

    fn stop(&self);
}

/// The avatar clip shown while a prompt plays.
pub trait AvatarControl: Send + Sync {
    fn play(&self, theme: ThemeId);

    /// Pauses the clip and rewinds it to the first frame.
    fn reset(&self);
}

/// Sink that only logs what it would play. Used by the headless harness.
#[derive(Debug, Default)]
pub struct LogSink;

#[async_trait]
impl AudioSink for LogSink {
    async fn play(&self, source: AudioSource) -> Result<(), VoiceError> {
        match &source {
            AudioSource::Bytes(bytes) => {
                tracing::info!(bytes = bytes.len(), "playing synthesized prompt")
            }
            AudioSource::Asset(path) => tracing::info!(asset = %path, "playing prompt clip"),
        }
        Ok(())
    }

    fn stop(&self) {
        tracing::debug!("playback stopped");
    }
}

/// Avatar that only logs. Used by the headless harness.
#[derive(Debug, Default)]
pub struct LogAvatar;

impl AvatarControl for LogAvatar {
    fn play(&self, theme: ThemeId) {
        tracing::debug!(%theme, "avatar playing");
    }

    fn reset(&self) {
        tracing::debug!("avatar reset to first frame");
    }
}
