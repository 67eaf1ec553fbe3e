//! Work/break timer state machine.
//!
//! The timer is tick-driven: it has no internal thread and the caller is
//! responsible for invoking `tick_at()` once per second. Each tick decrements
//! the remaining time; when it reaches zero the phase swaps and the remaining
//! time resets to the other configured duration.
//!
//! ## State Transitions
//!
//! ```text
//! Stopped -> Running(Work) <-> Running(Break) -> Stopped
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Break,
}

/// What a single tick did to the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer is not running; nothing happened.
    Idle,
    /// Still counting down inside the current phase.
    Counting { remaining_secs: u64 },
    /// Work interval ended; the timer is now on break.
    /// Carries the wall-clock focus minutes accumulated since work began.
    WorkFinished { focus_minutes: u64 },
    /// Break ended; the timer is back in a work interval.
    BreakFinished,
}

/// Core work/break timer.
///
/// Owns only timing state; blocking and statistics live in the
/// [`Controller`](crate::Controller).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    running: bool,
    phase: Phase,
    remaining_secs: u64,
    work_secs: u64,
    break_secs: u64,
    /// When the current work interval began. `None` while stopped or on break.
    #[serde(default)]
    started_at: Option<DateTime<Utc>>,
}

impl Default for FocusTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusTimer {
    pub fn new() -> Self {
        Self {
            running: false,
            phase: Phase::Work,
            remaining_secs: 0,
            work_secs: 0,
            break_secs: 0,
            started_at: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn work_min(&self) -> u64 {
        self.work_secs / 60
    }

    pub fn break_min(&self) -> u64 {
        self.break_secs / 60
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start (or restart) the timer with fresh durations.
    ///
    /// Always begins at the top of a work interval, even if the timer was
    /// already running.
    ///
    /// # Errors
    ///
    /// Rejects non-positive durations with a [`ValidationError`].
    pub fn start(
        &mut self,
        work_min: u64,
        break_min: u64,
        now: DateTime<Utc>,
    ) -> Result<(), ValidationError> {
        if work_min == 0 {
            return Err(ValidationError::InvalidDuration {
                field: "work_min",
                value: work_min,
            });
        }
        if break_min == 0 {
            return Err(ValidationError::InvalidDuration {
                field: "break_min",
                value: break_min,
            });
        }
        self.work_secs = work_min.saturating_mul(60);
        self.break_secs = break_min.saturating_mul(60);
        self.remaining_secs = self.work_secs;
        self.phase = Phase::Work;
        self.running = true;
        self.started_at = Some(now);
        Ok(())
    }

    /// Stop the timer. Returns the focus minutes accumulated in the current
    /// work interval, if one was in progress.
    pub fn stop(&mut self, now: DateTime<Utc>) -> Option<u64> {
        let focus = if self.running && self.phase == Phase::Work {
            self.started_at.map(|t| elapsed_minutes(t, now))
        } else {
            None
        };
        self.running = false;
        self.started_at = None;
        focus
    }

    /// Advance the countdown by one second.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> TickOutcome {
        if !self.running {
            return TickOutcome::Idle;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs > 0 {
            return TickOutcome::Counting {
                remaining_secs: self.remaining_secs,
            };
        }
        match self.phase {
            Phase::Work => {
                let focus_minutes = self
                    .started_at
                    .map(|t| elapsed_minutes(t, now))
                    .unwrap_or(0);
                self.phase = Phase::Break;
                self.remaining_secs = self.break_secs;
                self.started_at = None;
                TickOutcome::WorkFinished { focus_minutes }
            }
            Phase::Break => {
                self.phase = Phase::Work;
                self.remaining_secs = self.work_secs;
                self.started_at = Some(now);
                TickOutcome::BreakFinished
            }
        }
    }
}

fn elapsed_minutes(from: DateTime<Utc>, to: DateTime<Utc>) -> u64 {
    (to - from).num_minutes().max(0) as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t0() -> DateTime<Utc> {
        Utc::now()
    }

    #[test]
    fn starts_in_work_phase() {
        let mut timer = FocusTimer::new();
        timer.start(25, 5, t0()).unwrap();
        assert!(timer.is_running());
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 25 * 60);
    }

    #[test]
    fn rejects_zero_durations() {
        let mut timer = FocusTimer::new();
        assert!(timer.start(0, 5, t0()).is_err());
        assert!(timer.start(25, 0, t0()).is_err());
        assert!(!timer.is_running());
    }

    #[test]
    fn tick_while_stopped_is_noop() {
        let mut timer = FocusTimer::new();
        assert_eq!(timer.tick_at(t0()), TickOutcome::Idle);
    }

    #[test]
    fn work_flips_to_break_after_configured_ticks() {
        let start = t0();
        let mut timer = FocusTimer::new();
        timer.start(25, 5, start).unwrap();

        let end = start + Duration::minutes(25);
        for _ in 0..1499 {
            assert!(matches!(timer.tick_at(end), TickOutcome::Counting { .. }));
        }
        assert_eq!(
            timer.tick_at(end),
            TickOutcome::WorkFinished { focus_minutes: 25 }
        );
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_secs(), 300);
    }

    #[test]
    fn break_flips_back_to_work() {
        let start = t0();
        let mut timer = FocusTimer::new();
        timer.start(1, 1, start).unwrap();
        for _ in 0..60 {
            timer.tick_at(start);
        }
        assert_eq!(timer.phase(), Phase::Break);
        for _ in 0..59 {
            timer.tick_at(start);
        }
        assert_eq!(timer.tick_at(start), TickOutcome::BreakFinished);
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 60);
    }

    #[test]
    fn stop_mid_work_reports_partial_focus() {
        let start = t0();
        let mut timer = FocusTimer::new();
        timer.start(25, 5, start).unwrap();
        let focus = timer.stop(start + Duration::minutes(10));
        assert_eq!(focus, Some(10));
        assert!(!timer.is_running());
    }

    #[test]
    fn stop_during_break_reports_nothing() {
        let start = t0();
        let mut timer = FocusTimer::new();
        timer.start(1, 5, start).unwrap();
        for _ in 0..60 {
            timer.tick_at(start);
        }
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.stop(start), None);
    }

    #[test]
    fn restart_while_running_begins_fresh_work_phase() {
        let start = t0();
        let mut timer = FocusTimer::new();
        timer.start(25, 5, start).unwrap();
        for _ in 0..100 {
            timer.tick_at(start);
        }
        timer.start(10, 2, start).unwrap();
        assert_eq!(timer.phase(), Phase::Work);
        assert_eq!(timer.remaining_secs(), 600);
    }
}
