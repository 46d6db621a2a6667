//! The enforcement loop: three triggers feeding one serialized reconciler.
//!
//! - observed mutations, classified into a full pass or the fast path
//! - a periodic full pass for anything the observer missed
//! - a frame tick driving the throttled fast path

use std::sync::Arc;
use std::time::Duration;

use tasteshift_page::MutationRecord;
use tasteshift_reconciler::Trigger;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::watch;
use tokio::time::{interval, Instant, MissedTickBehavior};

use crate::config::EnforcementConfig;
use crate::session::Session;

/// Counters returned when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnforcementStats {
    pub full_passes: u64,
    pub mutation_batches: u64,
    pub fast_repairs: u64,
}

/// Runs until `shutdown` flips to `true` or its sender is dropped.
///
/// The first full pass is expected to have run already, so the periodic
/// one first fires one interval after start.
pub async fn run_enforcement(
    session: Arc<Session>,
    mut mutations: UnboundedReceiver<MutationRecord>,
    timing: EnforcementConfig,
    mut shutdown: watch::Receiver<bool>,
) -> EnforcementStats {
    let full_period = Duration::from_millis(timing.full_pass_ms.max(1));
    let mut full = tokio::time::interval_at(Instant::now() + full_period, full_period);
    full.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut frame = interval(Duration::from_millis(timing.frame_ms.max(1)));
    frame.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut stats = EnforcementStats::default();
    let mut observing = true;
    tracing::debug!(session = %session.id(), ?timing, "enforcement started");

    loop {
        tokio::select! {
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
            record = mutations.recv(), if observing => match record {
                Some(first) => {
                    let mut batch = vec![first];
                    while let Ok(next) = mutations.try_recv() {
                        batch.push(next);
                    }
                    stats.mutation_batches += 1;
                    let trigger = session.on_mutations(&batch, Instant::now().into_std());
                    if trigger == Trigger::FullPass {
                        stats.full_passes += 1;
                    }
                }
                None => {
                    tracing::debug!("mutation stream closed, relying on timers");
                    observing = false;
                }
            },
            _ = full.tick() => {
                session.full_pass();
                stats.full_passes += 1;
            }
            _ = frame.tick() => {
                if let Some(repairs) = session.frame(Instant::now().into_std()) {
                    stats.fast_repairs += repairs as u64;
                }
            }
        }
    }

    tracing::debug!(session = %session.id(), ?stats, "enforcement stopped");
    stats
}
