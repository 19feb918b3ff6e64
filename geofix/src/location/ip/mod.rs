//! IP-based geolocation.
//!
//! The coarsest source in the race: a single HTTP lookup that maps the
//! caller's public IP address to a city-level position. It needs no device
//! permission and usually answers quickly, so on desktops it is often the
//! only source that succeeds.
//!
//! # Architecture
//!
//! ```text
//! IpGeolocationProvider<C>
//!     │
//!     ├── GeoHttpClient trait → ReqwestGeoClient (reqwest)
//!     │
//!     └── IpLookupResponse (serde) → PositionRecord { accuracy: 10 km }
//! ```

mod client;
mod error;
mod provider;

pub use client::{GeoHttpClient, ReqwestGeoClient};
pub use error::IpLookupError;
pub use provider::{
    IpGeolocationProvider, IpLookupResponse, DEFAULT_IP_ENDPOINT, IP_ACCURACY_METERS,
};
