#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tasteshift_agent::{Config, Session, VoiceParts};
use tasteshift_catalog::ContentBundle;
use tasteshift_page::{fixture, MutationRecord, NodeId, Page};
use tasteshift_reconciler::markers::{ITEM_ATTR, SECTION_ATTR};
use tasteshift_store::PreferenceStore;
use tasteshift_voice::{AudioSink, AudioSource, SpeechSynthesizer, VoiceError};
use tokio::sync::mpsc::UnboundedReceiver;

/// Remote synthesis that always fails, so every prompt plays its local clip.
pub struct OfflineSynth;

#[async_trait]
impl SpeechSynthesizer for OfflineSynth {
    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        Err(VoiceError::MissingCredential)
    }
}

#[derive(Default)]
pub struct RecordingSink {
    pub played: Mutex<Vec<AudioSource>>,
    pub duration: Duration,
}

impl RecordingSink {
    pub fn assets(&self) -> Vec<String> {
        self.played
            .lock()
            .unwrap()
            .iter()
            .filter_map(|source| match source {
                AudioSource::Asset(path) => Some(path.clone()),
                AudioSource::Bytes(_) => None,
            })
            .collect()
    }
}

#[async_trait]
impl AudioSink for RecordingSink {
    async fn play(&self, source: AudioSource) -> Result<(), VoiceError> {
        self.played.lock().unwrap().push(source);
        if !self.duration.is_zero() {
            tokio::time::sleep(self.duration).await;
        }
        Ok(())
    }

    fn stop(&self) {}
}

pub struct Harness {
    pub session: Arc<Session>,
    pub mutations: UnboundedReceiver<MutationRecord>,
    pub sink: Arc<RecordingSink>,
    pub prefs: PreferenceStore,
}

pub fn start() -> Harness {
    start_with(PreferenceStore::in_memory().unwrap(), Duration::ZERO)
}

pub fn start_with(prefs: PreferenceStore, clip_length: Duration) -> Harness {
    let sink = Arc::new(RecordingSink {
        duration: clip_length,
        ..RecordingSink::default()
    });
    let voice = VoiceParts {
        synthesizer: Arc::new(OfflineSynth),
        credential: None,
        sink: sink.clone(),
    };
    let (session, mutations) = Session::start(
        &Config::default(),
        ContentBundle::builtin(),
        fixture::host_menu_page(),
        prefs.clone(),
        voice,
    )
    .expect("session should start");
    Harness {
        session,
        mutations,
        sink,
        prefs,
    }
}

/// The `n`th customized card of a section.
pub fn card(page: &Page, section: &str, n: usize) -> NodeId {
    let selector = page
        .find_first(page.root(), |node| node.attr(SECTION_ATTR) == Some(section))
        .expect("section should be located");
    page.find_all(selector, |node| node.has_attr(ITEM_ATTR))[n]
}

pub fn clip(theme: &str, name: &str) -> String {
    format!("voice-generation/voices/{theme}/{name}.mp3")
}
