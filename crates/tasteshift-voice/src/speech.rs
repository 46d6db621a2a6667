//! Remote text-to-speech.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::VoiceError;

/// Turns text into encoded audio with a given remote voice.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError>;
}

/// Settings for [`RemoteSpeechClient`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RemoteSpeechConfig {
    pub base_url: String,
    pub model_id: String,
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for RemoteSpeechConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.elevenlabs.io".to_string(),
            model_id: "eleven_monolingual_v1".to_string(),
            stability: 0.5,
            similarity_boost: 0.5,
        }
    }
}

#[derive(Debug, Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: VoiceSettings,
}

#[derive(Debug, Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

/// Client for an ElevenLabs-compatible `/v1/text-to-speech/<voice>` API.
///
/// The credential can be replaced at runtime when the user enters one.
#[derive(Debug, Clone)]
pub struct RemoteSpeechClient {
    http: reqwest::Client,
    config: RemoteSpeechConfig,
    api_key: Arc<RwLock<Option<String>>>,
}

impl RemoteSpeechClient {
    pub fn new(config: RemoteSpeechConfig, api_key: Option<String>) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();
        Self {
            http,
            config,
            api_key: Arc::new(RwLock::new(api_key.filter(|k| !k.trim().is_empty()))),
        }
    }

    pub fn set_api_key(&self, key: Option<String>) {
        let key = key.filter(|k| !k.trim().is_empty());
        *self.api_key.write().unwrap_or_else(|e| e.into_inner()) = key;
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    fn endpoint(&self, voice_id: &str) -> String {
        format!(
            "{}/v1/text-to-speech/{}",
            self.config.base_url.trim_end_matches('/'),
            voice_id
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for RemoteSpeechClient {
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        let api_key = self
            .api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .ok_or(VoiceError::MissingCredential)?;

        let body = SpeechRequest {
            text,
            model_id: &self.config.model_id,
            voice_settings: VoiceSettings {
                stability: self.config.stability,
                similarity_boost: self.config.similarity_boost,
            },
        };

        let response = self
            .http
            .post(self.endpoint(voice_id))
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .header("xi-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(VoiceError::Upstream {
                status: status.as_u16(),
                message: error_message(&raw).unwrap_or_else(|| status.to_string()),
            });
        }

        let audio = response.bytes().await?;
        if audio.is_empty() {
            return Err(VoiceError::EmptyAudio);
        }
        Ok(audio.to_vec())
    }
}

/// Pulls a human-readable message out of an error body. Understands
/// `{"detail": {"message": ..}}`, `{"detail": ".."}` and plain text.
fn error_message(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) else {
        return Some(trimmed.to_string());
    };
    let detail = value.get("detail")?;
    detail
        .get("message")
        .and_then(|m| m.as_str())
        .or_else(|| detail.as_str())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_shapes() {
        assert_eq!(
            error_message(r#"{"detail":{"status":"quota_exceeded","message":"Out of credits"}}"#),
            Some("Out of credits".to_string())
        );
        assert_eq!(
            error_message(r#"{"detail":"Unauthorized"}"#),
            Some("Unauthorized".to_string())
        );
        assert_eq!(error_message("bad gateway"), Some("bad gateway".to_string()));
        assert_eq!(error_message("   "), None);
        assert_eq!(error_message(r#"{"other":1}"#), None);
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let client = RemoteSpeechClient::new(RemoteSpeechConfig::default(), Some("  ".into()));
        assert!(!client.has_api_key());
        client.set_api_key(Some("sk-test".into()));
        assert!(client.has_api_key());
        client.set_api_key(None);
        assert!(!client.has_api_key());
    }

    #[test]
    fn endpoint_joins_voice_id() {
        let client = RemoteSpeechClient::new(
            RemoteSpeechConfig {
                base_url: "http://127.0.0.1:9/".into(),
                ..Default::default()
            },
            None,
        );
        assert_eq!(
            client.endpoint("abc"),
            "http://127.0.0.1:9/v1/text-to-speech/abc"
        );
    }
}
