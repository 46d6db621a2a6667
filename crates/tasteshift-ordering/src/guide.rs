//! Turns machine decisions into spoken prompts.

use tasteshift_catalog::{PromptBook, VoiceTable};
use tasteshift_types::{PromptKey, SectionId, ThemeId, VoiceProfile};
use tasteshift_voice::{PlaybackArbiter, PlaybackOutcome};

use crate::machine::OrderingMachine;

/// A prompt ready to hand to the arbiter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    pub key: PromptKey,
    pub theme: ThemeId,
    pub text: String,
    pub profile: VoiceProfile,
}

impl PromptRequest {
    pub async fn play(&self, arbiter: &PlaybackArbiter) -> PlaybackOutcome {
        tracing::info!(prompt = %self.key, theme = %self.theme, text = %self.text, "speaking prompt");
        arbiter
            .request_playback(&self.text, &self.profile, self.theme)
            .await
    }
}

/// The ordering machine plus the prompt texts and voices it speaks with.
///
/// Event handlers are synchronous; they update the machine and return the
/// prompt to play, leaving the await to the caller.
#[derive(Debug, Clone)]
pub struct VoiceGuide {
    machine: OrderingMachine,
    prompts: PromptBook,
    voices: VoiceTable,
}

impl VoiceGuide {
    pub fn new(prompts: PromptBook, voices: VoiceTable) -> Self {
        Self {
            machine: OrderingMachine::new(),
            prompts,
            voices,
        }
    }

    pub fn machine(&self) -> &OrderingMachine {
        &self.machine
    }

    pub fn on_engaged(&mut self, theme: ThemeId) -> Option<PromptRequest> {
        let key = self.machine.page_engaged()?;
        self.prepare(key, theme)
    }

    pub fn on_select(
        &mut self,
        section: SectionId,
        item: &str,
        theme: ThemeId,
    ) -> Option<PromptRequest> {
        tracing::debug!(%section, item, "selection");
        let key = self.machine.select(section, item)?;
        self.prepare(key, theme)
    }

    /// Hands back a prompt the arbiter dropped as busy.
    pub fn release(&mut self, key: PromptKey) {
        self.machine.release(key);
    }

    /// Forgets selections and fired prompts.
    pub fn reset(&mut self) {
        self.machine.reset();
    }

    /// Resolves text and voice for a key. A missing voice entry is logged
    /// and the prompt skipped.
    fn prepare(&self, key: PromptKey, theme: ThemeId) -> Option<PromptRequest> {
        let Some(profile) = self.voices.profile(theme, key) else {
            tracing::warn!(prompt = %key, %theme, "no voice configured, prompt skipped");
            return None;
        };
        Some(PromptRequest {
            key,
            theme,
            text: self.prompts.text(key),
            profile: profile.clone(),
        })
    }
}
