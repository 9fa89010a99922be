//! placeseek: Place Lookup and Reverse-Geocode Fallback
//!
//! A library and CLI tool for resolving free-text place names (or a device's
//! approximate network location) into geographic coordinates through
//! interchangeable lookup providers.
//!
//! ## Features
//!
//! - Multiple goto providers (Nominatim, Photon) behind one trait
//! - Persisted provider preference with first-registered fallback
//! - Background candidate search on a dedicated worker pool, with safe
//!   discard when the requester disappears mid-flight
//! - Three-stage where-am-i chain (exact coordinate, city name, country name)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use placeseek::{LookupContext, Settings};
//!
//! # async fn example() -> placeseek::Result<()> {
//! let ctx = LookupContext::with_default_providers(Settings::default())?;
//!
//! // Resolve a place name to one coordinate
//! let coords = ctx.resolve_place("Paris, France").await?;
//! println!("Paris is at {}", coords);
//!
//! // Best-effort device location
//! let fix = ctx.where_am_i().await?;
//! println!("You are near {} ({})", fix.label, fix.precision);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod context;
pub mod coord;
pub mod download;
pub mod error;
pub mod locate;
pub mod provider;
pub mod search;

// Re-export commonly used types
pub use config::Settings;
pub use context::LookupContext;
pub use coord::{Candidate, Coordinates};
pub use error::{Error, Result};
pub use locate::{LocationFix, Precision};
pub use provider::{Provider, ProviderRegistry};
pub use search::scheduler::{LivenessToken, SearchJob, SearchOutcome};
pub use search::LastQuery;
