//! Whereami command handler
//!
//! Prints the device's best-effort location from the fallback chain.

use crate::config::Settings;
use crate::context::LookupContext;
use crate::error::Result;
use clap::Args;

/// Whereami command arguments
#[derive(Args)]
pub struct WhereamiArgs {
    /// Print only the coordinate
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

/// Run the whereami command
pub async fn run(args: WhereamiArgs) -> Result<()> {
    let settings = Settings::load()?;
    let ctx = LookupContext::with_default_providers(settings)?;

    let fix = ctx.where_am_i().await?;

    if args.quiet {
        println!("{}", fix.coords);
    } else {
        println!("{} ({} precision): {}", fix.label, fix.precision, fix.coords);
    }

    Ok(())
}
