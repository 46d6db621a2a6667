//! Single-flight gate for spoken prompts.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tasteshift_types::{ThemeId, VoiceProfile};

use crate::gesture::GestureFlag;
use crate::playback::{AudioSink, AudioSource, AvatarControl};
use crate::speech::SpeechSynthesizer;

/// Default bound on a remote synthesis call.
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a request did not play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// Another prompt is playing.
    Busy,
    /// The user has not interacted with the page yet.
    AwaitingGesture,
    /// The session was stopped while the request was in flight.
    Stale,
}

/// Which source ended up playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Remote,
    Local,
}

/// Result of [`PlaybackArbiter::request_playback`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackOutcome {
    Completed(SourceKind),
    Dropped(DropReason),
    /// Remote and local playback both failed. Already logged.
    Failed,
}

#[derive(Debug, Default)]
struct SessionState {
    generation: u64,
    active: bool,
}

/// Owns the one playback session.
///
/// A request while a session is active is dropped, never queued. Each
/// session gets a generation number; [`PlaybackArbiter::stop`] bumps it, so
/// a remote result arriving for an older generation is discarded.
#[derive(Clone)]
pub struct PlaybackArbiter {
    state: Arc<Mutex<SessionState>>,
    gesture: GestureFlag,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Arc<dyn AudioSink>,
    avatar: Arc<dyn AvatarControl>,
    remote_timeout: Duration,
}

impl std::fmt::Debug for PlaybackArbiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackArbiter")
            .field("remote_timeout", &self.remote_timeout)
            .field("gesture", &self.gesture.is_set())
            .finish_non_exhaustive()
    }
}

impl PlaybackArbiter {
    pub fn new(
        gesture: GestureFlag,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        sink: Arc<dyn AudioSink>,
        avatar: Arc<dyn AvatarControl>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::default())),
            gesture,
            synthesizer,
            sink,
            avatar,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }

    pub fn with_remote_timeout(mut self, timeout: Duration) -> Self {
        self.remote_timeout = timeout;
        self
    }

    pub fn is_active(&self) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).active
    }

    /// Plays `text` with `profile`, preferring remote synthesis and falling
    /// back to the profile's local clip.
    ///
    /// Never returns an error: every failure is logged and reported through
    /// the outcome.
    pub async fn request_playback(
        &self,
        text: &str,
        profile: &VoiceProfile,
        theme: ThemeId,
    ) -> PlaybackOutcome {
        if !self.gesture.is_set() {
            tracing::debug!(%theme, "playback blocked until first user gesture");
            return PlaybackOutcome::Dropped(DropReason::AwaitingGesture);
        }

        let generation = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.active {
                tracing::debug!(%theme, "playback already active, request dropped");
                return PlaybackOutcome::Dropped(DropReason::Busy);
            }
            state.generation += 1;
            state.active = true;
            state.generation
        };

        if theme.has_avatar() {
            self.avatar.play(theme);
        }
        tracing::debug!(%theme, generation, "playback session started");

        let outcome = self.play_session(text, profile, generation).await;
        self.finish(generation);
        outcome
    }

    /// Ends the active session, if any. A remote result still in flight
    /// for it will be discarded.
    pub fn stop(&self) {
        let was_active = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            state.generation += 1;
            std::mem::replace(&mut state.active, false)
        };
        self.sink.stop();
        self.avatar.reset();
        if was_active {
            tracing::debug!("playback session stopped");
        }
    }

    async fn play_session(
        &self,
        text: &str,
        profile: &VoiceProfile,
        generation: u64,
    ) -> PlaybackOutcome {
        if profile.has_remote_voice() {
            let synthesis = tokio::time::timeout(
                self.remote_timeout,
                self.synthesizer.synthesize(text, &profile.remote_voice_id),
            )
            .await;

            if !self.is_current(generation) {
                return PlaybackOutcome::Dropped(DropReason::Stale);
            }

            match synthesis {
                Ok(Ok(audio)) => match self.sink.play(AudioSource::Bytes(audio)).await {
                    Ok(()) => return PlaybackOutcome::Completed(SourceKind::Remote),
                    Err(err) => {
                        tracing::warn!(error = %err, "remote audio failed to play, using local clip")
                    }
                },
                Ok(Err(err)) => {
                    tracing::warn!(error = %err, voice = %profile.remote_voice_id, "remote synthesis failed, using local clip")
                }
                Err(_) => {
                    tracing::warn!(
                        timeout_ms = self.remote_timeout.as_millis() as u64,
                        "remote synthesis timed out, using local clip"
                    )
                }
            }

            if !self.is_current(generation) {
                return PlaybackOutcome::Dropped(DropReason::Stale);
            }
        }

        match self
            .sink
            .play(AudioSource::Asset(profile.local_asset.clone()))
            .await
        {
            Ok(()) => PlaybackOutcome::Completed(SourceKind::Local),
            Err(err) => {
                tracing::warn!(error = %err, asset = %profile.local_asset, "local clip failed to play");
                PlaybackOutcome::Failed
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).generation == generation
    }

    /// Closes the session for `generation` unless it was already stopped.
    fn finish(&self, generation: u64) {
        let ended = {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            if state.generation == generation && state.active {
                state.active = false;
                true
            } else {
                false
            }
        };
        if ended {
            self.avatar.reset();
            tracing::debug!(generation, "playback session ended");
        }
    }
}
