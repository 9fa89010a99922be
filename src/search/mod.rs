//! Candidate search
//!
//! The synchronous single-result path (`resolve_one`) plus the last-query
//! memory. The deferred multi-candidate path lives in [`scheduler`].

pub mod scheduler;

use crate::coord::{Candidate, Coordinates};
use crate::error::{Error, Result};
use crate::provider::Provider;
use serde::{Deserialize, Serialize};

/// Resolve a place name to one coordinate through the given provider
///
/// Awaits the provider directly on the calling task, so the call site is
/// expected to already be off the interactive path (the where-am-i chain
/// is). The returned coordinate is range-validated before delivery.
pub async fn resolve_one(provider: &dyn Provider, query: &str) -> Result<Coordinates> {
    if query.trim().is_empty() {
        return Err(Error::EmptyQuery);
    }

    let coords = provider.resolve(query).await?;
    coords.validate()?;
    Ok(coords)
}

/// What the user last looked up and navigated to
///
/// Advisory state: recorded only on explicit candidate selection, never
/// cleared, so "what did I just look up" can be answered without re-querying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastQuery {
    /// The query string the user searched for
    pub query: String,

    /// The coordinate navigated to
    pub coords: Coordinates,

    /// The description of the selected candidate
    pub description: String,
}

impl LastQuery {
    /// Build a record from a query and the candidate selected for it
    pub fn from_selection(query: impl Into<String>, candidate: &Candidate) -> Self {
        Self {
            query: query.into(),
            coords: candidate.coords,
            description: candidate.description.clone(),
        }
    }
}
