//! Reverse-geocode fallback chain
//!
//! Best-effort "where is this device" lookup, trading precision for
//! availability. An IP geolocation payload is tried first; when it cannot
//! produce a usable coordinate the chain falls back to resolving the
//! reported city name, then the country name, through the current provider.

pub mod geoplugin;

use crate::constants::locate::{LOCALITY_LABEL, UNKNOWN_CITY, UNKNOWN_COUNTRY};
use crate::context::LookupContext;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use geoplugin::GeoPluginPayload;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How precise a location fix is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    /// Exact latitude/longitude from the location service
    Exact,
    /// Position only as precise as a city
    City,
    /// Position only as precise as a country
    Country,
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::City => write!(f, "city"),
            Self::Country => write!(f, "country"),
        }
    }
}

/// A located position with the precision the chain achieved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFix {
    pub precision: Precision,
    pub coords: Coordinates,
    /// Name of the place found
    pub label: String,
}

/// Determine where this device is
///
/// Exhausting every precision level yields `Error::NoLocation`, as does a
/// failed fetch from the location service.
pub async fn where_am_i(ctx: &LookupContext) -> Result<LocationFix> {
    let url = ctx.locate_service_url();
    let payload = match geoplugin::fetch(ctx.http_client(), &url).await {
        Ok(payload) => payload,
        Err(e) => {
            debug!("location service fetch failed: {}", e);
            return Err(Error::NoLocation);
        }
    };

    fix_from_payload(ctx, &payload).await
}

/// Run the fallback decisions over an already-fetched payload
///
/// A coordinate of exactly (0, 0) is treated as "not reported" rather than
/// a valid equatorial point; a deliberate approximation kept from the
/// service's behavior.
pub(crate) async fn fix_from_payload(
    ctx: &LookupContext,
    payload: &GeoPluginPayload,
) -> Result<LocationFix> {
    let lat = payload.lat();
    let lng = payload.lng();

    if lat != 0.0
        && lng != 0.0
        && lat > -90.0
        && lat < 90.0
        && lng > -180.0
        && lng < 180.0
    {
        // Found a sensible, precise location; albeit maybe not one known
        // by an actual name
        return Ok(LocationFix {
            precision: Precision::Exact,
            coords: Coordinates::new(lat, lng),
            label: LOCALITY_LABEL.to_string(),
        });
    }

    // Hopefully the city name is unique enough to look a position up on.
    // The service may append a state code for American places, but without
    // a country code 'Portsmouth' could still be Portsmouth, Hampshire, UK
    // or Portsmouth, Virginia, USA.
    if let Some(city) = payload.city() {
        debug!(%city, "found city");
        if city != UNKNOWN_CITY {
            match ctx.resolve_place(city).await {
                Ok(coords) => {
                    return Ok(LocationFix {
                        precision: Precision::City,
                        coords,
                        label: city.to_string(),
                    });
                }
                Err(e) => debug!(%city, "city lookup failed: {}", e),
            }
        }
    }

    if let Some(country) = payload.country() {
        debug!(%country, "found country");
        if country != UNKNOWN_COUNTRY {
            match ctx.resolve_place(country).await {
                Ok(coords) => {
                    return Ok(LocationFix {
                        precision: Precision::Country,
                        coords,
                        label: country.to_string(),
                    });
                }
                Err(e) => debug!(%country, "country lookup failed: {}", e),
            }
        }
    }

    Err(Error::NoLocation)
}
