use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tasteshift_catalog::{PromptBook, VoiceTable};
use tasteshift_ordering::VoiceGuide;
use tasteshift_types::{PromptKey, SectionId, ThemeId};
use tasteshift_voice::{
    AudioSink, AudioSource, GestureFlag, LogAvatar, PlaybackArbiter, PlaybackOutcome, SourceKind,
    SpeechSynthesizer, VoiceError,
};

struct Offline;

#[async_trait]
impl SpeechSynthesizer for Offline {
    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        Err(VoiceError::MissingCredential)
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<AudioSource>>);

#[async_trait]
impl AudioSink for Recorder {
    async fn play(&self, source: AudioSource) -> Result<(), VoiceError> {
        self.0.lock().unwrap().push(source);
        Ok(())
    }

    fn stop(&self) {}
}

fn guide() -> VoiceGuide {
    VoiceGuide::new(PromptBook::builtin(), VoiceTable::builtin())
}

#[test]
fn prompts_carry_text_and_theme_voice() {
    let mut guide = guide();
    let request = guide.on_engaged(ThemeId::Brooklyn).expect("protein prompt");
    assert_eq!(request.key, PromptKey::Section(SectionId::Protein));
    assert_eq!(request.text, "Choose your protein.");
    assert_eq!(
        request.profile.local_asset,
        "voice-generation/voices/brooklyn/choose-protein.mp3"
    );

    let fallback = guide.on_select(SectionId::Beans, "Red Beans", ThemeId::Brooklyn);
    let fallback = fallback.expect("fallback prompt");
    assert_eq!(fallback.key, PromptKey::Fallback);
    assert_eq!(fallback.text, "You skipped your protein!");
}

#[test]
fn missing_voice_skips_prompt_but_keeps_guard() {
    let mut voices = VoiceTable::builtin();
    voices.remove(ThemeId::English, PromptKey::Section(SectionId::Protein));
    let mut guide = VoiceGuide::new(PromptBook::builtin(), voices);

    assert_eq!(guide.on_engaged(ThemeId::English), None);
    assert!(guide
        .machine()
        .has_fired(PromptKey::Section(SectionId::Protein)));
    assert_eq!(guide.on_engaged(ThemeId::English), None);
}

#[test]
fn missing_text_uses_generated_phrase() {
    let mut prompts = PromptBook::builtin();
    prompts.remove(PromptKey::Section(SectionId::Rice));
    let mut guide = VoiceGuide::new(prompts, VoiceTable::builtin());

    guide.on_engaged(ThemeId::Italian);
    let request = guide
        .on_select(SectionId::Protein, "Garlic Shrimp", ThemeId::Italian)
        .unwrap();
    assert_eq!(request.text, "Choose your rice.");
}

#[tokio::test(start_paused = true)]
async fn request_plays_local_clip_when_remote_unavailable() {
    let gesture = GestureFlag::new();
    gesture.mark();
    let sink = Arc::new(Recorder::default());
    let arbiter = PlaybackArbiter::new(
        gesture,
        Arc::new(Offline),
        sink.clone(),
        Arc::new(LogAvatar),
    );

    let mut guide = guide();
    guide.on_engaged(ThemeId::Chinese);
    let request = guide
        .on_select(SectionId::Protein, "Mapo Tofu", ThemeId::Chinese)
        .unwrap();

    let outcome = request.play(&arbiter).await;
    assert_eq!(outcome, PlaybackOutcome::Completed(SourceKind::Local));
    assert_eq!(
        *sink.0.lock().unwrap(),
        vec![AudioSource::Asset(
            "voice-generation/voices/chinese/choose-rice.mp3".to_string()
        )]
    );
}
