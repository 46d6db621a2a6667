use thiserror::Error;

#[derive(Error, Debug)]
pub enum VoiceError {
    #[error("speech API credential is not configured")]
    MissingCredential,

    #[error("speech request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("speech API returned {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("speech API returned no audio")]
    EmptyAudio,

    #[error("playback failed: {0}")]
    Playback(String),
}
