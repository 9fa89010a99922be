//! CLI command handlers
//!
//! Each subcommand has its own module with handler functions.

pub mod config;
pub mod providers;
pub mod resolve;
pub mod search;
pub mod whereami;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Place lookup and reverse-geocode fallback tool
#[derive(Parser)]
#[command(name = "placeseek")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search for candidate places matching a query
    Search(search::SearchArgs),

    /// Resolve a place name to a single coordinate
    Resolve(resolve::ResolveArgs),

    /// Determine where this device is
    Whereami(whereami::WhereamiArgs),

    /// List or select goto providers
    Providers(providers::ProvidersArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

/// Run the CLI
pub async fn run() -> crate::error::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search(args) => search::run(args).await,
        Commands::Resolve(args) => resolve::run(args).await,
        Commands::Whereami(args) => whereami::run(args).await,
        Commands::Providers(args) => providers::run(args),
        Commands::Config(args) => config::run(args),
    }
}
