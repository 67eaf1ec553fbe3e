use std::time::Duration;

use clap::Subcommand;
use focusgate_core::host::EventObserver;
use focusgate_core::{Config, Database, Event, MemoryTabHost, Phase, Request};

use super::common::{load_controller, save_controller};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start a work session
    Start {
        /// Work duration in minutes (defaults from config)
        #[arg(long)]
        work: Option<u64>,
        /// Break duration in minutes (defaults from config)
        #[arg(long = "break")]
        break_min: Option<u64>,
        /// Replace the blocklist with these domains (repeatable)
        #[arg(long = "site")]
        sites: Vec<String>,
    },
    /// Stop the timer and record the interrupted session
    Stop,
    /// Print current timer state as JSON
    Status,
    /// Drive the 1 Hz tick loop in the foreground
    Run {
        /// Stop after this many ticks (runs until interrupted when omitted)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

/// Prints phase transitions the way the extension surfaced notifications.
struct StdoutNotifier;

impl EventObserver for StdoutNotifier {
    fn on_event(&mut self, event: &Event) {
        match event {
            Event::TimerStarted { work_min, .. } => {
                println!("Focus mode started: work for {work_min} minutes");
            }
            Event::TimerStopped { .. } => {
                println!("Focus mode ended");
            }
            Event::PhaseChanged {
                phase: Phase::Break,
                remaining_secs,
                ..
            } => {
                println!("Break time! Take a {} minute break", remaining_secs / 60);
            }
            Event::PhaseChanged {
                phase: Phase::Work,
                remaining_secs,
                ..
            } => {
                println!("Back to work: focus for {} minutes", remaining_secs / 60);
            }
            _ => {}
        }
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut ctl = load_controller(&db);
    let mut host = MemoryTabHost::new();

    match action {
        TimerAction::Start {
            work,
            break_min,
            sites,
        } => {
            let cfg = Config::load_or_default();
            let request = Request::StartTimer {
                work_min: work.unwrap_or(cfg.timer.work_minutes),
                break_min: break_min.unwrap_or(cfg.timer.break_minutes),
                sites,
            };
            let response = ctl.handle(request, &mut host);
            println!("{}", serde_json::to_string_pretty(&response)?);
            if matches!(response, focusgate_core::Response::Error { .. }) {
                std::process::exit(1);
            }
        }
        TimerAction::Stop => {
            let response = ctl.handle(Request::StopTimer, &mut host);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        TimerAction::Status => {
            let response = ctl.handle(Request::GetStatus, &mut host);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        TimerAction::Run { ticks } => {
            if !ctl.timer().is_running() {
                return Err("timer is not running; use `timer start` first".into());
            }
            let cfg = Config::load_or_default();
            if cfg.notifications.enabled {
                ctl.subscribe(Box::new(StdoutNotifier));
            }
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(tick_loop(&db, &mut ctl, &mut host, ticks))?;
        }
    }

    save_controller(&db, &ctl)?;
    Ok(())
}

async fn tick_loop(
    db: &Database,
    ctl: &mut focusgate_core::Controller,
    host: &mut MemoryTabHost,
    ticks: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut interval = tokio::time::interval(Duration::from_secs(1));
    interval.tick().await; // First tick completes immediately.

    let mut remaining = ticks;
    loop {
        if remaining == Some(0) {
            break;
        }
        interval.tick().await;

        let work_started = ctl.timer().started_at();
        if let Some(Event::PhaseChanged {
            phase: Phase::Break,
            at,
            ..
        }) = ctl.tick(host)
        {
            let started_at = work_started.unwrap_or(at);
            let focus_minutes = (at - started_at).num_minutes().max(0) as u64;
            db.record_session(focus_minutes, started_at, at)?;
        }
        save_controller(db, ctl)?;

        if !ctl.timer().is_running() {
            break;
        }
        remaining = remaining.map(|n| n - 1);
    }
    Ok(())
}
