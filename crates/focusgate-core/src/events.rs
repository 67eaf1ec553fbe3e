use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every state change in the controller produces an Event.
/// Observers subscribe to these instead of polling `getStatus`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        work_min: u64,
        break_min: u64,
        at: DateTime<Utc>,
    },
    TimerStopped {
        at: DateTime<Utc>,
    },
    /// The countdown crossed zero and the phase swapped.
    PhaseChanged {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// One second elapsed inside the current phase.
    Tick {
        phase: Phase,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A tab was redirected to the host's blocked page.
    TabBlocked {
        tab_id: u64,
        host: String,
        entry: String,
        at: DateTime<Utc>,
    },
    /// Previously blocked tabs were restored.
    TabsReleased {
        at: DateTime<Utc>,
    },
    /// A focus session was folded into the daily/weekly counters.
    StatsRecorded {
        focus_minutes: u64,
        at: DateTime<Utc>,
    },
}
