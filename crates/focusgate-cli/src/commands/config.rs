use clap::Subcommand;
use focusgate_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one config value by dot-separated key
    Get { key: String },
    /// Set a config value and persist it
    Set { key: String, value: String },
    /// Print the whole config as TOML
    List,
    /// Restore the default config
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let cfg = Config::load()?;
            match cfg.get(&key) {
                Some(value) => println!("{value}"),
                None => return Err(format!("unknown config key: {key}").into()),
            }
        }
        ConfigAction::Set { key, value } => {
            let mut cfg = Config::load()?;
            cfg.set(&key, &value)?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            let cfg = Config::load()?;
            print!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Config reset to defaults");
        }
    }
    Ok(())
}
