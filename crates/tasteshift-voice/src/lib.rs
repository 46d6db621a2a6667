//! Audio side of the ordering experience.
//!
//! The [`PlaybackArbiter`] owns the single output channel. It speaks a
//! prompt through a [`SpeechSynthesizer`] when a remote voice is configured,
//! falls back to the pre-rendered clip when synthesis fails or takes too
//! long, and keeps the avatar clip in step with the audio. Nothing plays
//! until the [`GestureFlag`] is set.

mod arbiter;
mod error;
mod gesture;
mod playback;
mod speech;

pub use arbiter::{
    DropReason, PlaybackArbiter, PlaybackOutcome, SourceKind, DEFAULT_REMOTE_TIMEOUT,
};
pub use error::VoiceError;
pub use gesture::GestureFlag;
pub use playback::{AudioSink, AudioSource, AvatarControl, LogAvatar, LogSink};
pub use speech::{RemoteSpeechClient, RemoteSpeechConfig, SpeechSynthesizer};
