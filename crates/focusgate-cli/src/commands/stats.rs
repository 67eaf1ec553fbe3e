use chrono::Utc;
use clap::Subcommand;
use focusgate_core::{Database, MemoryTabHost, Request};

use super::common::{load_controller, save_controller};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print daily and weekly focus statistics
    Show,
    /// Prune stats outside the rolling window
    Cleanup,
    /// Print all-time totals from the session log
    All,
}

pub fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut ctl = load_controller(&db);
    let mut host = MemoryTabHost::new();

    match action {
        StatsAction::Show => {
            let response = ctl.handle(Request::GetStats, &mut host);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        StatsAction::Cleanup => {
            ctl.cleanup_stats(Utc::now());
            save_controller(&db, &ctl)?;
            println!("Stats cleaned up");
        }
        StatsAction::All => {
            let totals = db.session_totals()?;
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
    }
    Ok(())
}
