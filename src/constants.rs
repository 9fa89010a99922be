//! Centralized constants for the placeseek crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Komoot Photon geocoding API (free, no key required)
    pub const PHOTON_URL: &str = "https://photon.komoot.io/api";

    /// IP geolocation service used by the where-am-i chain
    pub const GEOPLUGIN_URL: &str = "http://www.geoplugin.net/json.gp";
}

/// Settings keys
pub mod settings {
    /// Key holding the persisted provider preference (the provider label)
    pub const GOTO_PROVIDER_KEY: &str = "goto_provider";
}

/// Candidate search
pub mod search {
    /// Default number of candidates requested from a provider
    pub const DEFAULT_CANDIDATE_LIMIT: usize = 10;

    /// Default size of the remote-lookup worker pool
    pub const DEFAULT_LOOKUP_WORKERS: usize = 2;
}

/// Reverse-geocode fallback chain
pub mod locate {
    /// Sentinel the location service returns when it cannot name the city
    pub const UNKNOWN_CITY: &str = "(Unknown city)";

    /// Sentinel the location service returns when it cannot name the country
    pub const UNKNOWN_COUNTRY: &str = "(Unknown Country)";

    /// Label reported for an exact fix, which may not have a known name
    pub const LOCALITY_LABEL: &str = "Locality";
}
