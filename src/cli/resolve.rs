//! Resolve command handler
//!
//! Resolves a place name straight to one coordinate through the current
//! provider, without going through the background scheduler.

use crate::config::Settings;
use crate::context::LookupContext;
use crate::error::Result;
use clap::Args;

/// Resolve command arguments
#[derive(Args)]
pub struct ResolveArgs {
    /// Place name to resolve
    pub name: String,
}

/// Run the resolve command
pub async fn run(args: ResolveArgs) -> Result<()> {
    let settings = Settings::load()?;
    let ctx = LookupContext::with_default_providers(settings)?;

    let coords = ctx.resolve_place(&args.name).await?;
    println!("{}", coords);

    Ok(())
}
