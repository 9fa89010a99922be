//! Config command handler
//!
//! View and modify configuration settings.

use crate::config::Settings;
use crate::error::Result;
use clap::Args;

/// Config command arguments
#[derive(Args)]
pub struct ConfigArgs {
    /// Configuration key (e.g., "provider.current")
    pub key: Option<String>,

    /// Value to set (if not provided, shows current value)
    pub value: Option<String>,

    /// Show config file path
    #[arg(long)]
    pub path: bool,

    /// Reset config to defaults
    #[arg(long)]
    pub reset: bool,
}

/// Run the config command
pub fn run(args: ConfigArgs) -> Result<()> {
    if args.path {
        let path = Settings::config_path()?;
        println!("{}", path.display());
        return Ok(());
    }

    if args.reset {
        let settings = Settings::default();
        settings.save()?;
        println!("Configuration reset to defaults");
        return Ok(());
    }

    let mut settings = Settings::load()?;

    match (&args.key, &args.value) {
        // No arguments: show all config
        (None, None) => {
            show_all_settings(&settings);
        }

        // Key only: show that value
        (Some(key), None) => {
            if let Some(value) = settings.get_string(key) {
                println!("{}", value);
            } else {
                eprintln!("Unknown config key: {}", key);
                eprintln!("\nAvailable keys:");
                for k in Settings::available_keys() {
                    eprintln!("  {}", k);
                }
                std::process::exit(1);
            }
        }

        // Key and value: set the value
        (Some(key), Some(value)) => {
            settings.set_string(key, value)?;
            settings.save()?;
            println!("{} = {}", key, value);
        }

        // Value without key: not valid
        (None, Some(_)) => {
            eprintln!("Error: Must specify a key to set a value");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Display all configuration values
fn show_all_settings(settings: &Settings) {
    println!("[provider]");
    println!("current = \"{}\"", settings.provider.current);
    println!("candidate_limit = {}", settings.provider.candidate_limit);
    println!();

    println!("[locate]");
    println!("service_url = \"{}\"", settings.locate.service_url);
    println!();

    println!("[jobs]");
    println!("workers = {}", settings.jobs.workers);
}
