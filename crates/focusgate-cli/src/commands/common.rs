//! Controller persistence shared by the subcommands.
//!
//! Each CLI invocation loads the controller snapshot from the kv store,
//! applies one command, and saves it back. The individual settings keys
//! (`workDuration`, `blockedSites`, ...) are mirrored alongside the
//! snapshot so external tools can read them without decoding it.

use focusgate_core::storage::database::{
    KEY_BLOCKED_SITES, KEY_BREAK_DURATION, KEY_CONTROLLER, KEY_DAILY_STATS, KEY_WEEKLY_STATS,
    KEY_WORK_DURATION,
};
use focusgate_core::{Config, Controller, Database};

/// Load the persisted controller, seeding a fresh one from the config
/// file's blocklist on first run or if the snapshot fails to decode.
pub fn load_controller(db: &Database) -> Controller {
    if let Ok(Some(json)) = db.kv_get(KEY_CONTROLLER) {
        if let Ok(ctl) = serde_json::from_str::<Controller>(&json) {
            return ctl;
        }
    }
    let cfg = Config::load_or_default();
    let mut ctl = Controller::new();
    for site in &cfg.blocked_sites {
        // Seed entries were validated when written; skip any that rot.
        let _ = ctl.blocklist_mut().add(site);
    }
    ctl
}

pub fn save_controller(
    db: &Database,
    ctl: &Controller,
) -> Result<(), Box<dyn std::error::Error>> {
    db.kv_set(KEY_CONTROLLER, &serde_json::to_string(ctl)?)?;

    let summary = ctl.stats_summary();
    db.kv_set(KEY_DAILY_STATS, &serde_json::to_string(&summary.daily)?)?;
    db.kv_set(KEY_WEEKLY_STATS, &serde_json::to_string(&summary.weekly)?)?;
    db.kv_set(KEY_WORK_DURATION, &ctl.timer().work_min().to_string())?;
    db.kv_set(KEY_BREAK_DURATION, &ctl.timer().break_min().to_string())?;
    db.kv_set(
        KEY_BLOCKED_SITES,
        &serde_json::to_string(ctl.blocklist().entries())?,
    )?;
    Ok(())
}
