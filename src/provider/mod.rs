//! Goto providers
//!
//! This module defines the `Provider` trait and implementations for various
//! geocoding services. Each provider is a single file implementing the trait.
//!
//! ## Flex Point
//! Adding a new provider requires:
//! 1. Create `src/provider/{provider_name}.rs` implementing `Provider`
//! 2. Add `pub mod {provider_name};` below
//! 3. Register it on the context at startup

pub mod nominatim;
pub mod photon;
pub mod registry;

use crate::coord::{Candidate, Coordinates};
use crate::error::Result;
use std::future::Future;
use std::pin::Pin;

pub use registry::ProviderRegistry;

/// Boxed future returned by provider methods
///
/// Provider methods return boxed futures rather than `impl Future` so the
/// trait stays object-safe; the registry stores `Arc<dyn Provider>`.
pub type LookupFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T>> + Send + 'a>>;

/// Trait for goto providers
///
/// Providers are registered once at startup and never mutated afterwards, so
/// they may be called concurrently by multiple jobs without extra locking.
pub trait Provider: Send + Sync {
    /// Returns the provider label (e.g., "nominatim", "photon")
    ///
    /// The label doubles as the persisted-preference key.
    fn label(&self) -> &'static str;

    /// Resolve a place name to a single coordinate
    ///
    /// The lookup may block on network I/O for seconds; callers are expected
    /// to already be off the interactive path.
    fn resolve<'a>(&'a self, name: &'a str) -> LookupFuture<'a, Coordinates>;

    /// Search for candidate places matching a query
    fn search<'a>(&'a self, query: &'a str) -> LookupFuture<'a, Vec<Candidate>>;
}
