//! Multi-source location resolution.
//!
//! This module produces a single best-effort position from several
//! unreliable sources with different latency, accuracy and failure modes.
//!
//! # Sources
//!
//! - **GPS, high accuracy** → Device fix with tight cache tolerance (~5-20m)
//! - **GPS, standard** → Cheaper device fix, looser cache tolerance
//! - **Network** → Cell/Wi-Fi estimation, currently unsupported
//! - **IP** → Public IP geolocation, city level (10km)
//!
//! # Resolution policy
//!
//! All sources start at once. The **first to succeed wins**, whatever its
//! declared priority or accuracy. If every source fails or times out, the
//! caller gets [`ResolutionError::AllSourcesFailed`] with one reason per
//! source, and is expected to carry on without a position.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use geofix::config::ConfigFile;
//! use geofix::location::{ReqwestGeoClient, ResolutionCoordinator, UnavailableLocationService};
//!
//! let config = ConfigFile::load()?;
//! let coordinator = ResolutionCoordinator::baseline(
//!     Arc::new(UnavailableLocationService),
//!     ReqwestGeoClient::new()?,
//!     &config,
//! )?;
//!
//! match coordinator.get_current_position().await {
//!     Ok(position) => println!("{}, {}", position.latitude(), position.longitude()),
//!     Err(e) => println!("Position unavailable: {}", e),
//! }
//! ```
//!
//! # Components
//!
//! - [`record`] - `PositionRecord`, the immutable result value
//! - [`options`] - `Platform` and `AcquisitionOptions` lookup table
//! - [`error`] - `ProviderError` and `ResolutionError`
//! - [`provider`] - `PositionProvider` trait and `ProviderDescriptor`
//! - [`device`] - `LocationService` callback capability and `RawFix`
//! - [`gps`] - `GpsProvider` over a `LocationService`
//! - [`network`] - `NetworkProvider` stub
//! - [`ip`] - `IpGeolocationProvider` over a `GeoHttpClient`
//! - [`coordinator`] - `ResolutionCoordinator`, the race

mod coordinator;
mod device;
mod error;
mod gps;
pub mod ip;
mod network;
mod options;
mod provider;
mod record;

pub use coordinator::{
    CoordinatorBuilder, CoordinatorError, Resolution, ResolutionCoordinator,
    DEFAULT_FALLBACK_TIMEOUT,
};
pub use device::{DeviceFailure, FixCallback, LocationService, RawFix, UnavailableLocationService};
pub use error::{ProviderError, ResolutionError};
pub use gps::{GpsMode, GpsProvider};
pub use ip::{GeoHttpClient, IpGeolocationProvider, IpLookupError, ReqwestGeoClient};
pub use network::NetworkProvider;
pub use options::{options_for, AcquisitionOptions, Platform};
pub use provider::{
    PositionProvider, ProviderDescriptor, GPS_HIGH_ACCURACY, GPS_STANDARD, IP, NETWORK,
};
pub use record::{InvalidPosition, PositionRecord};
