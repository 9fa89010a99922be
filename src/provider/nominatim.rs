//! Nominatim goto provider (OpenStreetMap)
//!
//! Uses the free Nominatim API for geocoding.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::constants::api::NOMINATIM_URL;
use crate::constants::search::DEFAULT_CANDIDATE_LIMIT;
use crate::coord::{Candidate, Coordinates};
use crate::error::{Error, Result};
use crate::provider::{LookupFuture, Provider};
use serde::Deserialize;

const USER_AGENT: &str = "placeseek/0.1.0";

/// Nominatim goto provider
#[derive(Debug, Clone)]
pub struct NominatimProvider {
    client: reqwest::Client,
    candidate_limit: usize,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
    display_name: String,
}

impl NominatimProvider {
    /// Create a new Nominatim provider
    pub fn new() -> Self {
        Self::with_candidate_limit(DEFAULT_CANDIDATE_LIMIT)
    }

    /// Create a Nominatim provider with a specific candidate limit
    pub fn with_candidate_limit(candidate_limit: usize) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            candidate_limit: candidate_limit.max(1),
        }
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<Coordinates> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::ProviderRequestFailed(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::ProviderRequestFailed(format!("Invalid longitude: {}", lng)))?;
        Ok(Coordinates::new(lat, lng))
    }

    async fn query_candidates(&self, query: &str, limit: usize) -> Result<Vec<Candidate>> {
        let url = format!(
            "{}/search?q={}&format=json&limit={}",
            NOMINATIM_URL,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ProviderRequestFailed(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ProviderRequestFailed(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        let results: Vec<NominatimResult> = response.json().await.map_err(|e| {
            Error::ProviderRequestFailed(format!("Failed to parse Nominatim response: {}", e))
        })?;

        results
            .into_iter()
            .map(|result| {
                let coords = Self::parse_coords(&result.lat, &result.lon)?;
                Ok(Candidate::new(result.display_name, coords))
            })
            .collect()
    }
}

impl Default for NominatimProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for NominatimProvider {
    fn label(&self) -> &'static str {
        "nominatim"
    }

    fn resolve<'a>(&'a self, name: &'a str) -> LookupFuture<'a, Coordinates> {
        Box::pin(async move {
            let candidates = self.query_candidates(name, 1).await?;
            candidates
                .into_iter()
                .next()
                .map(|c| c.coords)
                .ok_or_else(|| Error::NoMatch(name.to_string()))
        })
    }

    fn search<'a>(&'a self, query: &'a str) -> LookupFuture<'a, Vec<Candidate>> {
        Box::pin(async move { self.query_candidates(query, self.candidate_limit).await })
    }
}
