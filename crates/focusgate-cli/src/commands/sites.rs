use clap::Subcommand;
use focusgate_core::{Database, MemoryTabHost, Request};
use serde_json::json;

use super::common::{load_controller, save_controller};

#[derive(Subcommand)]
pub enum SitesAction {
    /// Add a domain to the blocklist
    Add {
        /// Domain entry, e.g. example.com
        domain: String,
    },
    /// Remove a domain from the blocklist
    Remove { domain: String },
    /// List blocklist entries
    List,
    /// Check whether a URL would be blocked right now
    Check { url: String },
    /// Re-check all open tabs against the blocklist
    Recheck,
}

pub fn run(action: SitesAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let mut ctl = load_controller(&db);
    let mut host = MemoryTabHost::new();

    match action {
        SitesAction::Add { domain } => {
            let added = ctl.blocklist_mut().add(&domain)?;
            if added {
                println!("Added {}", domain.trim().to_lowercase());
            } else {
                println!("{} is already blocked", domain.trim().to_lowercase());
            }
        }
        SitesAction::Remove { domain } => {
            if ctl.blocklist_mut().remove(&domain) {
                println!("Removed {}", domain.trim().to_lowercase());
            } else {
                return Err(format!("{domain} is not in the blocklist").into());
            }
        }
        SitesAction::List => {
            println!("{}", serde_json::to_string_pretty(ctl.blocklist().entries())?);
        }
        SitesAction::Check { url } => {
            let matched = ctl.blocklist().match_url(&url);
            let out = match &matched {
                Some(m) => json!({ "blocked": true, "entry": m.entry, "host": m.host }),
                None => json!({ "blocked": false }),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        SitesAction::Recheck => {
            let response = ctl.handle(Request::RecheckAllTabs, &mut host);
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    save_controller(&db, &ctl)?;
    Ok(())
}
