//! The loading gate state machine.
//!
//! ```text
//!            reveal            tick              tick                 finish
//! Pending(0) ──────▶ Pending(0) ───▶ Pending(1) ─ … ─▶ Pending(last) ───────▶ Complete
//!   start()   initial_delay      tick_interval                     finish_delay
//! ```
//!
//! Every transition is a [`GateEvent`] delivered by a [`Scheduler`]. The gate
//! owns at most one outstanding timer, so [`LoadingGate::cancel`] and
//! [`LoadingGate::skip`] can always stop it cleanly. The completion callback
//! is an `FnOnce`, taken out of the gate when it fires: it cannot run twice.

use super::scheduler::{Scheduler, TimerId};
use log::debug;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Pending(usize),
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateEvent {
    /// Progress becomes visible; stage ticking starts.
    Reveal,
    /// Advance one stage.
    Tick,
    /// Terminal delay elapsed.
    Finish,
}

/// Durations driving the gate and its typewriter sub-animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTiming {
    pub initial_delay: Duration,
    pub tick_interval: Duration,
    pub finish_delay: Duration,
    pub type_interval: Duration,
}

impl Default for GateTiming {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(500),
            tick_interval: Duration::from_millis(800),
            finish_delay: Duration::from_millis(1000),
            type_interval: Duration::from_millis(50),
        }
    }
}

pub struct LoadingGate<F: FnOnce()> {
    stage_count: usize,
    timing: GateTiming,
    state: GateState,
    revealed: bool,
    timer: Option<TimerId>,
    on_complete: Option<F>,
}

impl<F: FnOnce()> LoadingGate<F> {
    /// A gate over `stage_count` stages (at least one).
    pub fn new(stage_count: usize, timing: GateTiming, on_complete: F) -> Self {
        Self {
            stage_count: stage_count.max(1),
            timing,
            state: GateState::Pending(0),
            revealed: false,
            timer: None,
            on_complete: Some(on_complete),
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn last_stage(&self) -> usize {
        self.stage_count - 1
    }

    /// `(stage + 1) / N * 100`; 100 once complete.
    pub fn progress_percent(&self) -> f64 {
        match self.state {
            GateState::Pending(i) => (i + 1) as f64 / self.stage_count as f64 * 100.0,
            GateState::Complete => 100.0,
        }
    }

    /// Schedule the reveal. Calling it again while a timer is pending is a
    /// no-op.
    pub fn start(&mut self, sched: &mut impl Scheduler<GateEvent>) {
        if self.timer.is_some() || self.state == GateState::Complete {
            return;
        }
        self.timer = Some(sched.schedule(self.timing.initial_delay, GateEvent::Reveal));
    }

    /// Apply a delivered event and schedule the follow-up, if any.
    pub fn handle(&mut self, event: GateEvent, sched: &mut impl Scheduler<GateEvent>) -> GateState {
        self.timer = None;
        let GateState::Pending(stage) = self.state else {
            return self.state;
        };

        match event {
            GateEvent::Reveal => {
                self.revealed = true;
                self.schedule_after(stage, sched);
            }
            GateEvent::Tick if stage < self.last_stage() => {
                let next = stage + 1;
                self.state = GateState::Pending(next);
                debug!("loading gate stage {next}/{}", self.last_stage());
                self.schedule_after(next, sched);
            }
            GateEvent::Tick => self.schedule_after(stage, sched),
            GateEvent::Finish => self.complete(),
        }
        self.state
    }

    /// Stop outstanding timers without completing.
    pub fn cancel(&mut self, sched: &mut impl Scheduler<GateEvent>) {
        if let Some(id) = self.timer.take() {
            sched.cancel(id);
        }
    }

    /// Cancel outstanding timers and complete right away.
    pub fn skip(&mut self, sched: &mut impl Scheduler<GateEvent>) {
        self.cancel(sched);
        if self.state != GateState::Complete {
            self.complete();
        }
    }

    fn schedule_after(&mut self, stage: usize, sched: &mut impl Scheduler<GateEvent>) {
        let (delay, event) = if stage < self.last_stage() {
            (self.timing.tick_interval, GateEvent::Tick)
        } else {
            (self.timing.finish_delay, GateEvent::Finish)
        };
        self.timer = Some(sched.schedule(delay, event));
    }

    fn complete(&mut self) {
        self.state = GateState::Complete;
        if let Some(callback) = self.on_complete.take() {
            debug!("loading gate complete");
            callback();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loading::scheduler::VirtualScheduler;
    use std::cell::Cell;
    use std::rc::Rc;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn counting_gate(stages: usize) -> (LoadingGate<impl FnOnce()>, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let sink = Rc::clone(&calls);
        let gate = LoadingGate::new(stages, GateTiming::default(), move || {
            sink.set(sink.get() + 1)
        });
        (gate, calls)
    }

    #[test]
    fn runs_through_every_stage_then_completes_once() {
        let (mut gate, calls) = counting_gate(5);
        let mut sched = VirtualScheduler::new();
        gate.start(&mut sched);

        let mut seen = vec![gate.state()];
        while let Some((_, event)) = sched.next() {
            seen.push(gate.handle(event, &mut sched));
        }

        let stages: Vec<usize> = seen
            .iter()
            .filter_map(|s| match s {
                GateState::Pending(i) => Some(*i),
                GateState::Complete => None,
            })
            .collect();
        assert!(stages.windows(2).all(|w| w[0] <= w[1]), "non-decreasing");
        assert_eq!(stages.iter().filter(|&&i| i == 4).count(), 1);
        assert_eq!(seen.last(), Some(&GateState::Complete));
        assert_eq!(calls.get(), 1);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn default_timing_completes_at_expected_time() {
        // 500 reveal + 4 × 800 ticks + 1000 finish
        let (mut gate, _) = counting_gate(5);
        let mut sched = VirtualScheduler::new();
        gate.start(&mut sched);
        while let Some((_, event)) = sched.next() {
            gate.handle(event, &mut sched);
        }
        assert_eq!(sched.now(), ms(500 + 4 * 800 + 1000));
    }

    #[test]
    fn single_stage_gate_finishes_after_reveal() {
        let (mut gate, calls) = counting_gate(1);
        let mut sched = VirtualScheduler::new();
        gate.start(&mut sched);
        while let Some((_, event)) = sched.next() {
            gate.handle(event, &mut sched);
        }
        assert_eq!(gate.state(), GateState::Complete);
        assert_eq!(sched.now(), ms(500 + 1000));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn progress_tracks_stage() {
        let (mut gate, _) = counting_gate(5);
        let mut sched = VirtualScheduler::new();
        assert_eq!(gate.progress_percent(), 20.0);
        gate.start(&mut sched);
        sched.next().map(|(_, e)| gate.handle(e, &mut sched)); // reveal
        sched.next().map(|(_, e)| gate.handle(e, &mut sched)); // tick → 1
        assert_eq!(gate.state(), GateState::Pending(1));
        assert_eq!(gate.progress_percent(), 40.0);
    }

    #[test]
    fn events_after_completion_are_ignored() {
        let (mut gate, calls) = counting_gate(2);
        let mut sched = VirtualScheduler::new();
        gate.skip(&mut sched);
        assert_eq!(gate.handle(GateEvent::Finish, &mut sched), GateState::Complete);
        assert_eq!(gate.handle(GateEvent::Tick, &mut sched), GateState::Complete);
        assert_eq!(calls.get(), 1);
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn skip_cancels_timer_and_completes_once() {
        let (mut gate, calls) = counting_gate(5);
        let mut sched = VirtualScheduler::new();
        gate.start(&mut sched);
        sched.next().map(|(_, e)| gate.handle(e, &mut sched));
        assert_eq!(sched.pending(), 1);

        gate.skip(&mut sched);
        gate.skip(&mut sched);

        assert_eq!(sched.pending(), 0);
        assert_eq!(gate.state(), GateState::Complete);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn cancel_stops_without_completing() {
        let (mut gate, calls) = counting_gate(3);
        let mut sched = VirtualScheduler::new();
        gate.start(&mut sched);
        gate.cancel(&mut sched);

        assert_eq!(sched.next(), None);
        assert_eq!(gate.state(), GateState::Pending(0));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn start_twice_schedules_once() {
        let (mut gate, _) = counting_gate(3);
        let mut sched = VirtualScheduler::new();
        gate.start(&mut sched);
        gate.start(&mut sched);
        assert_eq!(sched.pending(), 1);
    }
}
