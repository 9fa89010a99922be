//! Search command handler
//!
//! Runs a multi-candidate search through the background scheduler and
//! prints the delivered results, selecting the first candidate by default.
//! When no query is given, the remembered previous search is repeated.

use crate::config::Settings;
use crate::context::LookupContext;
use crate::error::{Error, Result};
use crate::search::scheduler::{delivery_channel, LivenessToken};
use crate::search::LastQuery;
use clap::Args;

/// Search command arguments
#[derive(Args)]
pub struct SearchArgs {
    /// Address or place name to search for (defaults to the previous search)
    pub query: Option<String>,

    /// Provider to use (persisted as the new preference)
    #[arg(long, short = 'p')]
    pub provider: Option<String>,
}

/// Pick the query to run: the one given, or the remembered previous one
fn effective_query(given: Option<String>, remembered: Option<LastQuery>) -> Result<String> {
    match (given, remembered) {
        (Some(query), _) => Ok(query),
        (None, Some(last)) => {
            eprintln!("Repeating previous search: {}", last.query);
            Ok(last.query)
        }
        (None, None) => Err(Error::EmptyQuery),
    }
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    let settings = Settings::load()?;
    let ctx = LookupContext::with_default_providers(settings)?;

    if let Some(provider) = &args.provider {
        ctx.set_provider(provider)?;
    }

    let query = effective_query(args.query, ctx.last_query())?;

    let (tx, mut rx) = delivery_channel();
    let liveness = LivenessToken::new();
    let job = ctx.submit_candidate_search(&query, liveness, tx)?;
    eprintln!("Searching via {}...", job.provider);

    let outcome = rx
        .recv()
        .await
        .ok_or_else(|| Error::Scheduler("search outcome was never delivered".to_string()))?;

    let candidates = outcome.result?;
    if candidates.is_empty() {
        println!("No results");
        return Ok(());
    }

    for (n, candidate) in candidates.iter().enumerate() {
        println!("{:2}. {}  ({})", n + 1, candidate.description, candidate.coords);
    }

    ctx.record_selection(&query, &candidates[0]);
    println!("\nSelected: {}", candidates[0].description);

    Ok(())
}
