//! Timer/blocker controller.
//!
//! Owns the timer, the blocklist, and the statistics counters, and is the
//! single place where they change. The control surface talks to it through
//! [`Request`]/[`Response`] messages; state changes additionally fan out to
//! subscribed [`EventObserver`]s so front ends do not have to poll.
//!
//! Blocking is active only while the timer is running in the Work phase and
//! the blocklist is non-empty. Entering a break or stopping releases every
//! tab the host parked on its blocked page.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blocklist::Blocklist;
use crate::error::ValidationError;
use crate::events::Event;
use crate::host::{EventObserver, TabHost};
use crate::message::{Request, Response, StatusResponse};
use crate::stats::{StatsSummary, StatsTracker};
use crate::timer::{FocusTimer, Phase, TickOutcome};

#[derive(Serialize, Deserialize, Default)]
pub struct Controller {
    timer: FocusTimer,
    blocklist: Blocklist,
    stats: StatsTracker,
    #[serde(skip)]
    observers: Vec<Box<dyn EventObserver>>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all timer, blocklist, and stats state. Observers survive.
    pub fn reset(&mut self) {
        self.timer = FocusTimer::new();
        self.blocklist = Blocklist::new();
        self.stats = StatsTracker::new();
    }

    pub fn subscribe(&mut self, observer: Box<dyn EventObserver>) {
        self.observers.push(observer);
    }

    fn emit(&mut self, event: Event) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn timer(&self) -> &FocusTimer {
        &self.timer
    }

    pub fn blocklist(&self) -> &Blocklist {
        &self.blocklist
    }

    pub fn blocklist_mut(&mut self) -> &mut Blocklist {
        &mut self.blocklist
    }

    pub fn stats_summary(&self) -> StatsSummary {
        self.stats.summary()
    }

    /// Whether navigation interception is currently in effect.
    pub fn blocking_active(&self) -> bool {
        self.timer.is_running()
            && self.timer.phase() == Phase::Work
            && !self.blocklist.is_empty()
    }

    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            is_running: self.timer.is_running(),
            is_work_time: self.timer.phase() == Phase::Work,
            time_left: self.timer.remaining_secs(),
            blocked_sites: self.blocklist.entries().to_vec(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a work session, optionally replacing the blocklist, and block
    /// every already-open matching tab.
    ///
    /// # Errors
    ///
    /// Rejects non-positive durations and malformed domains; neither the
    /// timer nor the blocklist changes on error.
    pub fn start(
        &mut self,
        work_min: u64,
        break_min: u64,
        sites: &[String],
        now: DateTime<Utc>,
        host: &mut dyn TabHost,
    ) -> Result<(), ValidationError> {
        if sites.is_empty() {
            self.timer.start(work_min, break_min, now)?;
        } else {
            // Validate the replacement list before touching the timer.
            let mut next = self.blocklist.clone();
            next.replace(sites)?;
            self.timer.start(work_min, break_min, now)?;
            self.blocklist = next;
        }
        self.emit(Event::TimerStarted {
            work_min,
            break_min,
            at: now,
        });
        self.recheck_all(now, host);
        Ok(())
    }

    /// Stop the timer, fold any in-progress focus time into the stats, and
    /// release blocked tabs.
    pub fn stop(&mut self, now: DateTime<Utc>, host: &mut dyn TabHost) {
        if let Some(focus_minutes) = self.timer.stop(now) {
            self.stats.record(focus_minutes, now);
            self.emit(Event::StatsRecorded {
                focus_minutes,
                at: now,
            });
        }
        host.release_blocked();
        self.emit(Event::TabsReleased { at: now });
        self.emit(Event::TimerStopped { at: now });
    }

    /// Advance the timer by one second.
    ///
    /// Returns the phase-change event when a phase ends, `None` otherwise.
    pub fn tick_at(&mut self, now: DateTime<Utc>, host: &mut dyn TabHost) -> Option<Event> {
        match self.timer.tick_at(now) {
            TickOutcome::Idle => None,
            TickOutcome::Counting { remaining_secs } => {
                self.emit(Event::Tick {
                    phase: self.timer.phase(),
                    remaining_secs,
                    at: now,
                });
                None
            }
            TickOutcome::WorkFinished { focus_minutes } => {
                self.stats.record(focus_minutes, now);
                self.emit(Event::StatsRecorded {
                    focus_minutes,
                    at: now,
                });
                host.release_blocked();
                self.emit(Event::TabsReleased { at: now });
                let event = Event::PhaseChanged {
                    phase: Phase::Break,
                    remaining_secs: self.timer.remaining_secs(),
                    at: now,
                };
                self.emit(event.clone());
                Some(event)
            }
            TickOutcome::BreakFinished => {
                self.recheck_all(now, host);
                let event = Event::PhaseChanged {
                    phase: Phase::Work,
                    remaining_secs: self.timer.remaining_secs(),
                    at: now,
                };
                self.emit(event.clone());
                Some(event)
            }
        }
    }

    pub fn tick(&mut self, host: &mut dyn TabHost) -> Option<Event> {
        self.tick_at(Utc::now(), host)
    }

    /// Block one tab if its URL matches while blocking is active.
    pub fn check_tab(
        &mut self,
        tab_id: u64,
        url: &str,
        now: DateTime<Utc>,
        host: &mut dyn TabHost,
    ) -> bool {
        if !self.blocking_active() {
            return false;
        }
        let Some(matched) = self.blocklist.match_url(url) else {
            return false;
        };
        host.redirect_to_blocked(tab_id);
        self.emit(Event::TabBlocked {
            tab_id,
            host: matched.host,
            entry: matched.entry,
            at: now,
        });
        true
    }

    /// Re-check every open tab. Returns how many were blocked.
    pub fn recheck_all(&mut self, now: DateTime<Utc>, host: &mut dyn TabHost) -> usize {
        if !self.blocking_active() {
            return 0;
        }
        let mut blocked = 0;
        for tab in host.open_tabs() {
            if self.check_tab(tab.id, &tab.url, now, host) {
                blocked += 1;
            }
        }
        blocked
    }

    pub fn cleanup_stats(&mut self, now: DateTime<Utc>) {
        self.stats.cleanup(now);
    }

    // ── Message protocol ─────────────────────────────────────────────

    pub fn handle(&mut self, request: Request, host: &mut dyn TabHost) -> Response {
        self.handle_at(request, Utc::now(), host)
    }

    pub fn handle_at(
        &mut self,
        request: Request,
        now: DateTime<Utc>,
        host: &mut dyn TabHost,
    ) -> Response {
        match request {
            Request::StartTimer {
                work_min,
                break_min,
                sites,
            } => match self.start(work_min, break_min, &sites, now, host) {
                Ok(()) => Response::ack("Timer started"),
                Err(e) => Response::error(e),
            },
            Request::StopTimer => {
                self.stop(now, host);
                Response::ack("Timer stopped")
            }
            Request::GetStatus => Response::Status(self.status()),
            Request::GetStats => Response::Stats(self.stats.summary()),
            Request::CheckTab { tab_id, url } => {
                let blocked = self.check_tab(tab_id, &url, now, host);
                Response::TabChecked {
                    status: "Tab checked".into(),
                    blocked,
                }
            }
            Request::RecheckAllTabs => {
                let blocked_count = self.recheck_all(now, host);
                Response::Rechecked {
                    status: "All tabs rechecked".into(),
                    blocked_count,
                }
            }
        }
    }
}
