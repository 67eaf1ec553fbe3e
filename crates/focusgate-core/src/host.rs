//! Collaborator traits for the host environment.
//!
//! The controller never talks to a browser directly. Tab enumeration and
//! redirection go through [`TabHost`]; state-change notifications go to
//! registered [`EventObserver`]s.

use serde::{Deserialize, Serialize};

use crate::events::Event;

/// An open tab as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    pub id: u64,
    pub url: String,
}

/// Tab query/update surface of the host environment.
pub trait TabHost {
    /// All currently open tabs.
    fn open_tabs(&self) -> Vec<TabInfo>;

    /// Send a tab to the host's blocked page.
    fn redirect_to_blocked(&mut self, tab_id: u64);

    /// Restore every tab previously sent to the blocked page.
    fn release_blocked(&mut self);
}

/// Subscription surface for controller state changes.
pub trait EventObserver {
    fn on_event(&mut self, event: &Event);
}

/// In-memory [`TabHost`] used by tests and the CLI front end.
#[derive(Debug, Clone, Default)]
pub struct MemoryTabHost {
    tabs: Vec<TabInfo>,
    blocked: Vec<u64>,
}

impl MemoryTabHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_tab(&mut self, id: u64, url: impl Into<String>) {
        self.tabs.push(TabInfo {
            id,
            url: url.into(),
        });
    }

    /// Tabs currently parked on the blocked page.
    pub fn blocked_ids(&self) -> &[u64] {
        &self.blocked
    }
}

impl TabHost for MemoryTabHost {
    fn open_tabs(&self) -> Vec<TabInfo> {
        self.tabs.clone()
    }

    fn redirect_to_blocked(&mut self, tab_id: u64) {
        if !self.blocked.contains(&tab_id) {
            self.blocked.push(tab_id);
        }
    }

    fn release_blocked(&mut self) {
        self.blocked.clear();
    }
}

/// Collects events for inspection; handy in tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<Event>,
}

impl EventObserver for RecordingObserver {
    fn on_event(&mut self, event: &Event) {
        self.events.push(event.clone());
    }
}
