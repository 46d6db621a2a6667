//! The per-page session context.
//!
//! One [`Session`] owns everything derived from the active theme: the
//! reconciler and its override table, the ordering machine, the playback
//! arbiter. Host events are dispatched to it one at a time; each reaction
//! applies its state changes synchronously and hands any awaiting work
//! (speech, lookups) to spawned tasks.
//!
//! Lock order is page, then reconciler. The guide lock is never held
//! together with either, and no lock is held while the arbiter runs since
//! the avatar writes to the page.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use tasteshift_catalog::ContentBundle;
use tasteshift_lookup::LookupClient;
use tasteshift_ordering::{OrderingMachine, PromptRequest, VoiceGuide};
use tasteshift_page::{MutationRecord, NodeId, Page};
use tasteshift_reconciler::markers::{
    self, INFO_BUTTON_CLASS, INFO_COUNTRY_ATTR, INFO_ITEM_ATTR, ITEM_ATTR, SECTION_ATTR,
};
use tasteshift_reconciler::{classify, PassReport, Reconciler, Trigger};
use tasteshift_store::PreferenceStore;
use tasteshift_types::{AssetBase, SectionId, ThemeId};
use tasteshift_voice::{
    AudioSink, DropReason, GestureFlag, PlaybackArbiter, PlaybackOutcome, RemoteSpeechClient,
    SpeechSynthesizer,
};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::{Config, VoiceConfig};
use crate::error::AgentError;
use crate::overlay::{self, PageAvatar};
use crate::panel;

/// Something the user or the host did on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Click { target: NodeId },
    Touch,
    Key { key: String },
    Scroll { y: u32 },
    /// A form control changed value.
    Change { target: NodeId, value: String },
    CredentialEntered(String),
    BackendUrlEntered(String),
}

impl HostEvent {
    /// Events that count as the user gesture unlocking audio.
    fn is_gesture(&self) -> bool {
        matches!(
            self,
            HostEvent::Click { .. } | HostEvent::Touch | HostEvent::Key { .. } | HostEvent::Scroll { .. }
        )
    }
}

/// Work started by one reaction.
#[derive(Debug, Default)]
pub struct Reaction {
    pub prompt: Option<JoinHandle<PlaybackOutcome>>,
    /// Resolves to whether the panel was still open to show the result.
    pub lookup: Option<JoinHandle<bool>>,
    pub switched: Option<PassReport>,
    pub panel_closed: bool,
}

/// Speech pieces handed to [`Session::start`].
pub struct VoiceParts {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    /// Client whose credential follows [`HostEvent::CredentialEntered`].
    pub credential: Option<RemoteSpeechClient>,
    pub sink: Arc<dyn AudioSink>,
}

impl VoiceParts {
    /// Remote synthesis with the stored credential, or the configured one.
    pub fn remote(config: &VoiceConfig, prefs: &PreferenceStore, sink: Arc<dyn AudioSink>) -> Self {
        let stored = prefs.speech_api_key().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read stored speech credential");
            None
        });
        let api_key = stored.or_else(|| config.api_key.clone());
        if api_key.is_none() {
            tracing::info!("no speech credential, prompts use local clips");
        }
        let client = RemoteSpeechClient::new(config.remote.clone(), api_key);
        Self {
            synthesizer: Arc::new(client.clone()),
            credential: Some(client),
            sink,
        }
    }
}

pub struct Session {
    id: Uuid,
    page: Arc<Mutex<Page>>,
    reconciler: Mutex<Reconciler>,
    guide: Arc<Mutex<VoiceGuide>>,
    arbiter: PlaybackArbiter,
    gesture: GestureFlag,
    credential: Option<RemoteSpeechClient>,
    lookup: LookupClient,
    prefs: PreferenceStore,
    assets: AssetBase,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("theme", &self.theme())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Takes over `page`: picks the theme (stored preference first), runs
    /// the first reconciliation pass and renders the selector and avatar.
    ///
    /// Returns the session and the page's mutation stream, which feeds the
    /// enforcement loop.
    pub fn start(
        config: &Config,
        bundle: ContentBundle,
        mut page: Page,
        prefs: PreferenceStore,
        voice: VoiceParts,
    ) -> Result<(Arc<Self>, UnboundedReceiver<MutationRecord>), AgentError> {
        let id = Uuid::new_v4();
        let theme = match prefs.theme() {
            Ok(Some(theme)) => theme,
            Ok(None) => config.content.default_theme,
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored theme");
                config.content.default_theme
            }
        };
        let backend = match prefs.lookup_url() {
            Ok(Some(url)) => url,
            Ok(None) => config.lookup.backend_url.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored lookup backend");
                config.lookup.backend_url.clone()
            }
        };

        let mutations = page.observe();
        let mut reconciler = Reconciler::new(
            config.layout.clone(),
            bundle.catalog,
            config.assets.clone(),
            theme,
        )?
        .with_fast_spacing(Duration::from_millis(config.enforcement.fast_spacing_ms));

        let report = reconciler.reconcile(&mut page);
        overlay::mount_selector(&mut page, theme);
        overlay::mount_avatar(&mut page, &config.assets, theme);
        tracing::info!(
            session = %id,
            %theme,
            written = report.cards_written,
            deferred = report.sections_deferred.len(),
            "session started"
        );

        let page = Arc::new(Mutex::new(page));
        let gesture = GestureFlag::new();
        let arbiter = PlaybackArbiter::new(
            gesture.clone(),
            voice.synthesizer,
            voice.sink,
            Arc::new(PageAvatar::new(Arc::clone(&page))),
        )
        .with_remote_timeout(Duration::from_millis(config.voice.remote_timeout_ms));

        let session = Self {
            id,
            page,
            reconciler: Mutex::new(reconciler),
            guide: Arc::new(Mutex::new(VoiceGuide::new(bundle.prompts, bundle.voices))),
            arbiter,
            gesture,
            credential: voice.credential,
            lookup: LookupClient::new(backend, Duration::from_millis(config.lookup.timeout_ms)),
            prefs,
            assets: config.assets.clone(),
        };
        Ok((Arc::new(session), mutations))
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn page(&self) -> MutexGuard<'_, Page> {
        self.page.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn reconciler(&self) -> MutexGuard<'_, Reconciler> {
        self.reconciler.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn guide(&self) -> MutexGuard<'_, VoiceGuide> {
        self.guide.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn theme(&self) -> ThemeId {
        self.reconciler().theme()
    }

    /// Snapshot of the ordering progress.
    pub fn machine(&self) -> OrderingMachine {
        self.guide().machine().clone()
    }

    pub fn arbiter(&self) -> &PlaybackArbiter {
        &self.arbiter
    }

    pub fn gesture(&self) -> &GestureFlag {
        &self.gesture
    }

    pub fn lookup(&self) -> &LookupClient {
        &self.lookup
    }

    /// Arms the engagement signal. A page that is already scrolled counts
    /// as engaged right away.
    pub fn arm_engagement(&self) -> Option<JoinHandle<PlaybackOutcome>> {
        if self.page().scroll_y() == 0 {
            return None;
        }
        tracing::debug!("page already scrolled, engaging immediately");
        self.engage()
    }

    /// Applies one host event.
    pub fn dispatch(&self, event: HostEvent) -> Reaction {
        if event.is_gesture() && self.gesture.mark() {
            tracing::debug!(session = %self.id, "first user gesture, audio unlocked");
        }

        match event {
            HostEvent::Click { target } => self.on_click(target),
            HostEvent::Touch => Reaction::default(),
            HostEvent::Key { key } => Reaction {
                panel_closed: key == "Escape" && panel::close(&mut self.page()),
                ..Reaction::default()
            },
            HostEvent::Scroll { y } => {
                self.page().set_scroll_y(y);
                Reaction {
                    prompt: self.engage(),
                    ..Reaction::default()
                }
            }
            HostEvent::Change { target, value } => self.on_change(target, &value),
            HostEvent::CredentialEntered(key) => {
                self.store_credential(&key);
                Reaction::default()
            }
            HostEvent::BackendUrlEntered(url) => {
                if let Err(e) = self.prefs.set_lookup_url(&url) {
                    tracing::warn!(error = %e, "could not persist lookup backend");
                }
                self.lookup.set_base_url(url);
                Reaction::default()
            }
        }
    }

    /// Switches the active theme and drops everything derived from the old
    /// one: overrides, selections, prompt guards and the playing prompt.
    pub fn switch_theme(&self, theme: ThemeId) -> Result<Reaction, AgentError> {
        let report = {
            let mut page = self.page();
            let report = self.reconciler().switch_theme(&mut page, theme)?;
            overlay::sync_selector(&mut page, theme);
            overlay::mount_avatar(&mut page, &self.assets, theme);
            report
        };
        self.arbiter.stop();
        self.guide().reset();
        if let Err(e) = self.prefs.set_theme(theme) {
            tracing::warn!(error = %e, %theme, "could not persist theme");
        }
        tracing::info!(session = %self.id, %theme, written = report.cards_written, "theme applied");

        Ok(Reaction {
            prompt: self.arm_engagement(),
            switched: Some(report),
            ..Reaction::default()
        })
    }

    /// Periodic full pass.
    pub fn full_pass(&self) -> PassReport {
        let mut page = self.page();
        self.reconciler().reconcile(&mut page)
    }

    /// Reacts to a batch of observed mutations.
    pub fn on_mutations(&self, records: &[MutationRecord], now: Instant) -> Trigger {
        let mut page = self.page();
        let mut reconciler = self.reconciler();
        let trigger = classify(&page, reconciler.overrides(), records);
        match trigger {
            Trigger::FullPass => {
                reconciler.reconcile(&mut page);
            }
            Trigger::FastPath => {
                reconciler.fast_tick(&mut page, now);
            }
            Trigger::Ignore => {}
        }
        trigger
    }

    /// Frame tick of the fast path.
    pub fn frame(&self, now: Instant) -> Option<usize> {
        let mut page = self.page();
        self.reconciler().fast_tick(&mut page, now)
    }

    fn on_click(&self, target: NodeId) -> Reaction {
        let mut page = self.page();

        if panel::current(&page).is_some() && panel::is_dismiss_target(&page, target) {
            return Reaction {
                panel_closed: panel::close(&mut page),
                ..Reaction::default()
            };
        }

        if let Some(button) = page.closest(target, |n| n.has_class(INFO_BUTTON_CLASS)) {
            let item = page.attr(button, INFO_ITEM_ATTR).unwrap_or_default().to_string();
            let country = page.attr(button, INFO_COUNTRY_ATTR).unwrap_or_default().to_string();
            let overlay = panel::open(&mut page, &item);
            drop(page);
            return Reaction {
                lookup: Some(self.spawn_lookup(overlay, item, country)),
                ..Reaction::default()
            };
        }

        let Some(card) = page.closest(target, |n| n.has_attr(ITEM_ATTR)) else {
            return Reaction::default();
        };
        let item = page.attr(card, ITEM_ATTR).unwrap_or_default().to_string();
        let section = page
            .closest(card, |n| n.has_attr(SECTION_ATTR))
            .and_then(|s| page.attr(s, SECTION_ATTR))
            .and_then(|raw| raw.parse::<SectionId>().ok());
        let theme = markers::read_theme(&page);
        drop(page);

        let (Some(section), Some(theme)) = (section, theme) else {
            tracing::debug!(item = %item, "selection outside a known section ignored");
            return Reaction::default();
        };
        let request = self.guide().on_select(section, &item, theme);
        Reaction {
            prompt: request.map(|r| self.play(r)),
            ..Reaction::default()
        }
    }

    fn on_change(&self, target: NodeId, value: &str) -> Reaction {
        if !overlay::is_selector(&self.page(), target) {
            return Reaction::default();
        }
        let theme = match value.parse::<ThemeId>() {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!(error = %e, "cuisine selector sent an unknown theme");
                return Reaction::default();
            }
        };
        match self.switch_theme(theme) {
            Ok(reaction) => reaction,
            Err(e) => {
                tracing::warn!(error = %e, %theme, "theme switch failed");
                Reaction::default()
            }
        }
    }

    fn store_credential(&self, key: &str) {
        if let Err(e) = self.prefs.set_speech_api_key(key) {
            tracing::warn!(error = %e, "could not persist speech credential");
        }
        match &self.credential {
            Some(client) => {
                client.set_api_key(Some(key.to_string()));
                tracing::info!(session = %self.id, "speech credential updated");
            }
            None => tracing::debug!("no remote speech client to update"),
        }
    }

    fn engage(&self) -> Option<JoinHandle<PlaybackOutcome>> {
        let theme = markers::read_theme(&self.page())?;
        let request = self.guide().on_engaged(theme)?;
        Some(self.play(request))
    }

    /// Speaks `request` on a spawned task. A prompt dropped because another
    /// one was playing goes back to the guide so a later trigger can ask
    /// for it again.
    fn play(&self, request: PromptRequest) -> JoinHandle<PlaybackOutcome> {
        let arbiter = self.arbiter.clone();
        let guide = Arc::clone(&self.guide);
        tokio::spawn(async move {
            let outcome = request.play(&arbiter).await;
            if outcome == PlaybackOutcome::Dropped(DropReason::Busy) {
                guide
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .release(request.key);
            }
            outcome
        })
    }

    fn spawn_lookup(&self, overlay: NodeId, item: String, country: String) -> JoinHandle<bool> {
        let lookup = self.lookup.clone();
        let page = Arc::clone(&self.page);
        tokio::spawn(async move {
            let outcome = lookup.lookup(&item, &country).await;
            if let Err(e) = &outcome {
                tracing::warn!(error = %e, item = %item, "detail lookup failed");
            }
            let mut page = page.lock().unwrap_or_else(|e| e.into_inner());
            panel::render(&mut page, overlay, &item, &country, &outcome)
        })
    }
}
