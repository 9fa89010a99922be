//! Photon goto provider (Komoot)
//!
//! Uses the free Photon API, a search-as-you-type frontend over OpenStreetMap
//! data. Responses are GeoJSON feature collections with [lng, lat] geometry.

use crate::constants::api::PHOTON_URL;
use crate::constants::search::DEFAULT_CANDIDATE_LIMIT;
use crate::coord::{Candidate, Coordinates};
use crate::error::{Error, Result};
use crate::provider::{LookupFuture, Provider};
use serde::Deserialize;

/// Photon goto provider
#[derive(Debug, Clone)]
pub struct PhotonProvider {
    client: reqwest::Client,
    candidate_limit: usize,
}

#[derive(Debug, Deserialize)]
struct PhotonResponse {
    #[serde(default)]
    features: Vec<PhotonFeature>,
}

#[derive(Debug, Deserialize)]
struct PhotonFeature {
    geometry: PhotonGeometry,
    properties: PhotonProperties,
}

#[derive(Debug, Deserialize)]
struct PhotonGeometry {
    /// GeoJSON position: [lng, lat]
    coordinates: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct PhotonProperties {
    name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    country: Option<String>,
}

impl PhotonProperties {
    /// Build a display description from the available fields
    fn description(self) -> String {
        let description = [self.name, self.city, self.state, self.country]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(", ");

        if description.is_empty() {
            "Unknown place".to_string()
        } else {
            description
        }
    }
}

impl PhotonProvider {
    /// Create a new Photon provider
    pub fn new() -> Self {
        Self::with_candidate_limit(DEFAULT_CANDIDATE_LIMIT)
    }

    /// Create a Photon provider with a specific candidate limit
    pub fn with_candidate_limit(candidate_limit: usize) -> Self {
        Self {
            client: reqwest::Client::new(),
            candidate_limit: candidate_limit.max(1),
        }
    }

    fn feature_to_candidate(feature: PhotonFeature) -> Result<Candidate> {
        // GeoJSON positions are [lng, lat] with an optional altitude
        let coordinates = &feature.geometry.coordinates;
        if coordinates.len() < 2 {
            return Err(Error::ProviderRequestFailed(
                "Photon feature geometry is not a position".to_string(),
            ));
        }
        let (lng, lat) = (coordinates[0], coordinates[1]);
        Ok(Candidate::new(
            feature.properties.description(),
            Coordinates::new(lat, lng),
        ))
    }

    async fn query_candidates(&self, query: &str, limit: usize) -> Result<Vec<Candidate>> {
        let url = format!(
            "{}/?q={}&limit={}",
            PHOTON_URL,
            urlencoding::encode(query),
            limit
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::ProviderRequestFailed(format!("Photon request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::ProviderRequestFailed(format!(
                "Photon returned status: {}",
                response.status()
            )));
        }

        let parsed: PhotonResponse = response.json().await.map_err(|e| {
            Error::ProviderRequestFailed(format!("Failed to parse Photon response: {}", e))
        })?;

        parsed
            .features
            .into_iter()
            .map(Self::feature_to_candidate)
            .collect()
    }
}

impl Default for PhotonProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for PhotonProvider {
    fn label(&self) -> &'static str {
        "photon"
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_provider_label() {
        let provider = PhotonProvider::new();
        assert_eq!(provider.label(), "photon");
    }

    #[test]
    fn test_description_from_properties() {
        let properties = PhotonProperties {
            name: Some("Eiffel Tower".to_string()),
            city: Some("Paris".to_string()),
            state: None,
            country: Some("France".to_string()),
        };
        assert_eq!(properties.description(), "Eiffel Tower, Paris, France");
    }

    #[test]
    fn test_description_empty_properties() {
        assert_eq!(PhotonProperties::default().description(), "Unknown place");
    }

    #[test]
    fn test_feature_to_candidate_swaps_lng_lat() {
        let feature: PhotonFeature = serde_json::from_str(
            r#"{
                "geometry": { "coordinates": [2.3522, 48.8566] },
                "properties": { "name": "Paris", "country": "France" }
            }"#,
        )
        .unwrap();

        let candidate = PhotonProvider::feature_to_candidate(feature).unwrap();
        assert_eq!(candidate.description, "Paris, France");
        assert_relative_eq!(candidate.coords.lat, 48.8566);
        assert_relative_eq!(candidate.coords.lng, 2.3522);
    }

    #[test]
    fn test_feature_with_bad_geometry() {
        let feature: PhotonFeature = serde_json::from_str(
            r#"{
                "geometry": { "coordinates": [2.3522] },
                "properties": {}
            }"#,
        )
        .unwrap();

        assert!(PhotonProvider::feature_to_candidate(feature).is_err());
    }

    #[tokio::test]
    #[ignore = "Requires network access to Photon"]
    async fn test_search_returns_candidates() {
        let provider = PhotonProvider::new();
        let candidates = provider.search("Berlin").await.unwrap();
        assert!(!candidates.is_empty());
    }
}
