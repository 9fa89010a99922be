//! Error types for placeseek

use thiserror::Error;

/// Main error type for placeseek operations
#[derive(Error, Debug)]
pub enum Error {
    /// The provider registry is empty; the lookup must be refused.
    #[error("no goto provider available")]
    NoProviderAvailable,

    /// A provider's network call or response handling failed.
    #[error("service request failure: {0}")]
    ProviderRequestFailed(String),

    /// The provider ran successfully but found nothing for the query.
    #[error("no match for '{0}'")]
    NoMatch(String),

    /// The reverse-geocode chain exhausted every precision level.
    #[error("could not determine location")]
    NoLocation,

    /// A search was requested with an empty query string.
    #[error("search query is empty")]
    EmptyQuery,

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("download failed: {0}")]
    Download(String),

    #[error("scheduler error: {0}")]
    Scheduler(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for placeseek operations
pub type Result<T> = std::result::Result<T, Error>;
