//! Error types for IP geolocation lookups.

use thiserror::Error;

use crate::location::record::InvalidPosition;

/// Errors that can occur while looking up a position by IP address.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IpLookupError {
    /// The HTTP client could not be constructed.
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// HTTP request failed at the transport level.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The endpoint reported an error in its body (rate limit, reserved range).
    #[error("Lookup service error: {0}")]
    Service(String),

    /// The body was not the expected JSON.
    #[error("Failed to parse response: {0}")]
    Json(String),

    /// The endpoint returned coordinates off the globe.
    #[error("Invalid coordinates in response: {0}")]
    InvalidCoordinates(#[from] InvalidPosition),
}
