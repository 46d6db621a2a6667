use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tasteshift_types::{ThemeId, VoiceProfile};
use tasteshift_voice::{
    AudioSink, AudioSource, AvatarControl, DropReason, GestureFlag, PlaybackArbiter,
    PlaybackOutcome, SourceKind, SpeechSynthesizer, VoiceError,
};

struct FakeSynth {
    delay: Duration,
    fail: bool,
    calls: AtomicUsize,
}

impl FakeSynth {
    fn new(delay: Duration, fail: bool) -> Arc<Self> {
        Arc::new(Self {
            delay,
            fail,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynth {
    async fn synthesize(&self, text: &str, _voice_id: &str) -> Result<Vec<u8>, VoiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.fail {
            return Err(VoiceError::Upstream {
                status: 500,
                message: "boom".into(),
            });
        }
        Ok(text.as_bytes().to_vec())
    }
}

#[derive(Default)]
struct FakeSink {
    played: Mutex<Vec<AudioSource>>,
    duration: Duration,
    fail_local: bool,
    stops: AtomicUsize,
}

#[async_trait]
impl AudioSink for FakeSink {
    async fn play(&self, source: AudioSource) -> Result<(), VoiceError> {
        let is_local = matches!(source, AudioSource::Asset(_));
        self.played.lock().unwrap().push(source);
        tokio::time::sleep(self.duration).await;
        if is_local && self.fail_local {
            return Err(VoiceError::Playback("decode error".into()));
        }
        Ok(())
    }

    fn stop(&self) {
        self.stops.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct FakeAvatar {
    plays: AtomicUsize,
    resets: AtomicUsize,
}

impl AvatarControl for FakeAvatar {
    fn play(&self, _theme: ThemeId) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }

    fn reset(&self) {
        self.resets.fetch_add(1, Ordering::SeqCst);
    }
}

struct Rig {
    arbiter: PlaybackArbiter,
    gesture: GestureFlag,
    synth: Arc<FakeSynth>,
    sink: Arc<FakeSink>,
    avatar: Arc<FakeAvatar>,
}

fn rig(synth: Arc<FakeSynth>, sink: FakeSink) -> Rig {
    let gesture = GestureFlag::new();
    let sink = Arc::new(sink);
    let avatar = Arc::new(FakeAvatar::default());
    let arbiter = PlaybackArbiter::new(
        gesture.clone(),
        synth.clone(),
        sink.clone(),
        avatar.clone(),
    );
    Rig {
        arbiter,
        gesture,
        synth,
        sink,
        avatar,
    }
}

fn profile() -> VoiceProfile {
    VoiceProfile::new(
        "italian_rice_voice_id",
        "voice-generation/voices/italian/choose-rice.mp3",
    )
}

fn local_only() -> VoiceProfile {
    VoiceProfile::new("", "voice-generation/voices/italian/choose-rice.mp3")
}

#[tokio::test(start_paused = true)]
async fn nothing_plays_before_first_gesture() {
    let rig = rig(FakeSynth::new(Duration::ZERO, false), FakeSink::default());

    let outcome = rig
        .arbiter
        .request_playback("What rice would you like?", &profile(), ThemeId::Italian)
        .await;

    assert_eq!(outcome, PlaybackOutcome::Dropped(DropReason::AwaitingGesture));
    assert!(rig.sink.played.lock().unwrap().is_empty());
    assert_eq!(rig.synth.calls.load(Ordering::SeqCst), 0);
    assert_eq!(rig.avatar.plays.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn remote_audio_plays_with_avatar() {
    let rig = rig(FakeSynth::new(Duration::from_millis(300), false), FakeSink::default());
    rig.gesture.mark();

    let outcome = rig
        .arbiter
        .request_playback("hello", &profile(), ThemeId::Italian)
        .await;

    assert_eq!(outcome, PlaybackOutcome::Completed(SourceKind::Remote));
    assert_eq!(
        *rig.sink.played.lock().unwrap(),
        vec![AudioSource::Bytes(b"hello".to_vec())]
    );
    assert_eq!(rig.avatar.plays.load(Ordering::SeqCst), 1);
    assert_eq!(rig.avatar.resets.load(Ordering::SeqCst), 1);
    assert!(!rig.arbiter.is_active());
}

#[tokio::test(start_paused = true)]
async fn slow_remote_falls_back_to_local_clip() {
    let rig = rig(FakeSynth::new(Duration::from_secs(60), false), FakeSink::default());
    rig.gesture.mark();

    let started = tokio::time::Instant::now();
    let outcome = rig
        .arbiter
        .request_playback("hello", &profile(), ThemeId::Italian)
        .await;

    assert_eq!(outcome, PlaybackOutcome::Completed(SourceKind::Local));
    let waited = started.elapsed();
    assert!(waited >= Duration::from_secs(10) && waited < Duration::from_secs(11));
    assert_eq!(
        *rig.sink.played.lock().unwrap(),
        vec![AudioSource::Asset(profile().local_asset)]
    );
}

#[tokio::test(start_paused = true)]
async fn configured_timeout_is_honoured() {
    let rig = rig(FakeSynth::new(Duration::from_secs(3), false), FakeSink::default());
    rig.gesture.mark();
    let arbiter = rig.arbiter.clone().with_remote_timeout(Duration::from_secs(2));

    let outcome = arbiter
        .request_playback("hello", &profile(), ThemeId::Bronx)
        .await;
    assert_eq!(outcome, PlaybackOutcome::Completed(SourceKind::Local));
}

#[tokio::test(start_paused = true)]
async fn remote_error_falls_back_to_local_clip() {
    let rig = rig(FakeSynth::new(Duration::ZERO, true), FakeSink::default());
    rig.gesture.mark();

    let outcome = rig
        .arbiter
        .request_playback("hello", &profile(), ThemeId::Chinese)
        .await;

    assert_eq!(outcome, PlaybackOutcome::Completed(SourceKind::Local));
    assert_eq!(rig.synth.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn profile_without_remote_voice_skips_synthesis() {
    let rig = rig(FakeSynth::new(Duration::ZERO, false), FakeSink::default());
    rig.gesture.mark();

    let outcome = rig
        .arbiter
        .request_playback("hello", &local_only(), ThemeId::Italian)
        .await;

    assert_eq!(outcome, PlaybackOutcome::Completed(SourceKind::Local));
    assert_eq!(rig.synth.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn back_to_back_requests_leave_one_session() {
    let sink = FakeSink {
        duration: Duration::from_secs(2),
        ..Default::default()
    };
    let rig = rig(FakeSynth::new(Duration::ZERO, false), sink);
    rig.gesture.mark();

    let first_profile = local_only();
    let second_profile = profile();
    let (first, second) = tokio::join!(
        rig.arbiter
            .request_playback("first", &first_profile, ThemeId::Italian),
        rig.arbiter
            .request_playback("second", &second_profile, ThemeId::Italian),
    );

    assert_eq!(first, PlaybackOutcome::Completed(SourceKind::Local));
    assert_eq!(second, PlaybackOutcome::Dropped(DropReason::Busy));
    assert_eq!(rig.sink.played.lock().unwrap().len(), 1);
    assert_eq!(rig.synth.calls.load(Ordering::SeqCst), 0);
    assert_eq!(rig.avatar.plays.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn stop_discards_late_remote_result() {
    let rig = rig(FakeSynth::new(Duration::from_secs(5), false), FakeSink::default());
    rig.gesture.mark();

    let request_profile = profile();
    let stopper = async {
        tokio::time::sleep(Duration::from_secs(1)).await;
        rig.arbiter.stop();
    };
    let (outcome, ()) = tokio::join!(
        rig.arbiter
            .request_playback("late", &request_profile, ThemeId::Italian),
        stopper,
    );

    assert_eq!(outcome, PlaybackOutcome::Dropped(DropReason::Stale));
    assert!(rig.sink.played.lock().unwrap().is_empty());
    assert_eq!(rig.sink.stops.load(Ordering::SeqCst), 1);
    // reset once by stop, not again by the discarded session
    assert_eq!(rig.avatar.resets.load(Ordering::SeqCst), 1);
    assert!(!rig.arbiter.is_active());

    let next = rig
        .arbiter
        .request_playback("next", &local_only(), ThemeId::Italian)
        .await;
    assert_eq!(next, PlaybackOutcome::Completed(SourceKind::Local));
}

#[tokio::test(start_paused = true)]
async fn total_failure_is_swallowed_and_releases_channel() {
    let sink = FakeSink {
        fail_local: true,
        ..Default::default()
    };
    let rig = rig(FakeSynth::new(Duration::ZERO, true), sink);
    rig.gesture.mark();

    let outcome = rig
        .arbiter
        .request_playback("hello", &profile(), ThemeId::Italian)
        .await;

    assert_eq!(outcome, PlaybackOutcome::Failed);
    assert!(!rig.arbiter.is_active());
    assert_eq!(rig.avatar.resets.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn theme_without_clip_leaves_avatar_alone() {
    let rig = rig(FakeSynth::new(Duration::ZERO, false), FakeSink::default());
    rig.gesture.mark();

    rig.arbiter
        .request_playback("hello", &local_only(), ThemeId::English)
        .await;

    assert_eq!(rig.avatar.plays.load(Ordering::SeqCst), 0);
}
