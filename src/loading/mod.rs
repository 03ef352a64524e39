//! Loading gate: the staged splash shown before the page content.
//!
//! - [`gate`]: the `Pending(i) → Complete` state machine
//! - [`scheduler`]: cancellable timers ([`Scheduler`] trait, [`VirtualScheduler`])
//! - [`typewriter`]: per-stage character reveal
//!
//! The generator does not ship the state machine to the browser. It runs the
//! gate to completion on a [`VirtualScheduler`] and writes the resulting
//! [`SplashTimeline`] into the page, where a few lines of script replay it.

pub mod gate;
pub mod scheduler;
pub mod typewriter;

pub use gate::{GateEvent, GateState, GateTiming, LoadingGate};
pub use scheduler::{Scheduler, TimerId, VirtualScheduler};
pub use typewriter::Typewriter;

use std::time::Duration;

/// When each stage of a gate run becomes current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplashTimeline {
    /// When the progress bar appears and stage 0 starts typing.
    pub reveal_at: Duration,
    /// Start time of each stage, index-aligned with the stage labels.
    pub stage_starts: Vec<Duration>,
    /// When the gate hands over to the page.
    pub complete_at: Duration,
    pub type_interval: Duration,
}

/// Run a gate over `stage_count` stages on a virtual clock and record its
/// transitions.
pub fn plan_timeline(stage_count: usize, timing: GateTiming) -> SplashTimeline {
    let mut sched = VirtualScheduler::new();
    let mut gate = LoadingGate::new(stage_count, timing, || {});
    let mut reveal_at = Duration::ZERO;
    let mut stage_starts = Vec::new();

    gate.start(&mut sched);
    while let Some((at, event)) = sched.next() {
        let before = gate.state();
        let after = gate.handle(event, &mut sched);
        match (event, after) {
            (GateEvent::Reveal, GateState::Pending(_)) => {
                reveal_at = at;
                stage_starts.push(at);
            }
            (GateEvent::Tick, GateState::Pending(_)) if after != before => stage_starts.push(at),
            _ => {}
        }
    }

    SplashTimeline {
        reveal_at,
        stage_starts,
        complete_at: sched.now(),
        type_interval: timing.type_interval,
    }
}

impl SplashTimeline {
    /// Stage current at `t`, or `None` once the gate has completed.
    pub fn stage_at(&self, t: Duration) -> Option<usize> {
        if t >= self.complete_at {
            return None;
        }
        Some(
            self.stage_starts
                .iter()
                .rposition(|&start| start <= t)
                .unwrap_or(0),
        )
    }

    /// Typewriter text visible at `t`. Typing restarts whenever the stage
    /// changes; nothing is typed before the reveal.
    pub fn typed_label<'a>(&self, labels: &'a [String], t: Duration) -> &'a str {
        if t < self.reveal_at {
            return "";
        }
        let stage = self.stage_at(t).unwrap_or(labels.len().saturating_sub(1));
        let Some(label) = labels.get(stage) else {
            return "";
        };
        let start = self.stage_starts.get(stage).copied().unwrap_or(self.reveal_at);
        Typewriter::new(label, self.type_interval).visible_at(t.saturating_sub(start))
    }

    /// Progress percentage shown while `stage` is current.
    pub fn progress_at_stage(&self, stage: usize) -> f64 {
        let n = self.stage_starts.len().max(1);
        ((stage + 1).min(n)) as f64 / n as f64 * 100.0
    }
}
