//! # Focusgate Core Library
//!
//! Core business logic for the Focusgate work/break timer with site
//! blocking. The CLI binary is a thin control surface over this library;
//! any other front end (a browser-extension bridge, a GUI) would sit on the
//! same seams.
//!
//! ## Architecture
//!
//! - **Timer**: a tick-driven state machine; the caller invokes `tick_at()`
//!   once per second
//! - **Blocklist**: validated domain entries with a deliberately permissive
//!   hostname matcher
//! - **Controller**: owns all mutable state and implements the
//!   request/response message protocol
//! - **Host traits**: tab query/redirect and event subscription seams for
//!   the host environment
//! - **Storage**: SQLite key-value settings store and TOML configuration

pub mod blocklist;
pub mod controller;
pub mod error;
pub mod events;
pub mod host;
pub mod message;
pub mod stats;
pub mod storage;
pub mod timer;

pub use blocklist::{BlockMatch, Blocklist};
pub use controller::Controller;
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use events::Event;
pub use host::{EventObserver, MemoryTabHost, TabHost, TabInfo};
pub use message::{Request, Response, StatusResponse};
pub use stats::{DailyStat, StatsSummary, StatsTracker, WeeklyStat};
pub use storage::{Config, Database};
pub use timer::{FocusTimer, Phase, TickOutcome};
