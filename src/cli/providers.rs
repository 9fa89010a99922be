//! Providers command handler
//!
//! Lists registered providers and selects the current one.

use crate::config::Settings;
use crate::context::LookupContext;
use crate::error::Result;
use clap::Args;

/// Providers command arguments
#[derive(Args)]
pub struct ProvidersArgs {
    /// Select this provider and persist the preference
    #[arg(long)]
    pub set: Option<String>,
}

/// Run the providers command
pub fn run(args: ProvidersArgs) -> Result<()> {
    let settings = Settings::load()?;
    let ctx = LookupContext::with_default_providers(settings)?;

    if let Some(label) = &args.set {
        ctx.set_provider(label)?;
        println!("Provider set to {}", label);
        return Ok(());
    }

    let current = ctx.current_provider()?;
    for label in ctx.registry().labels() {
        let marker = if label == current.label() { "*" } else { " " };
        println!("{} {}", marker, label);
    }

    Ok(())
}
