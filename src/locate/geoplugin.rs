//! geoplugin.net payload handling
//!
//! The service reports the caller's approximate location as JSON with every
//! field quoted as a string. Coordinates that are missing or unparseable
//! read as 0.0, which downstream logic treats as "field not actually
//! present" rather than a valid equatorial point.

use crate::download;
use crate::error::Result;
use serde::Deserialize;
use std::fs;

/// Location fields extracted from a geoplugin response
#[derive(Debug, Default, Deserialize)]
pub struct GeoPluginPayload {
    #[serde(rename = "geoplugin_latitude")]
    pub(crate) latitude: Option<String>,

    #[serde(rename = "geoplugin_longitude")]
    pub(crate) longitude: Option<String>,

    #[serde(rename = "geoplugin_city")]
    pub(crate) city: Option<String>,

    #[serde(rename = "geoplugin_countryName")]
    pub(crate) country: Option<String>,
}

impl GeoPluginPayload {
    /// Parsed latitude, 0.0 when absent or unparseable
    pub fn lat(&self) -> f64 {
        parse_or_zero(self.latitude.as_deref())
    }

    /// Parsed longitude, 0.0 when absent or unparseable
    pub fn lng(&self) -> f64 {
        parse_or_zero(self.longitude.as_deref())
    }

    /// Reported city name, if any
    pub fn city(&self) -> Option<&str> {
        self.city.as_deref().filter(|s| !s.is_empty())
    }

    /// Reported country name, if any
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref().filter(|s| !s.is_empty())
    }
}

fn parse_or_zero(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Fetch and parse a geoplugin payload
///
/// The response lands in a temp file first, which is removed again on every
/// path out of this function.
pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<GeoPluginPayload> {
    let file = download::fetch_to_temp(client, url).await?;
    let content = fs::read_to_string(file.path())?;
    let payload = serde_json::from_str(&content)?;
    Ok(payload)
}
