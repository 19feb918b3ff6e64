//! geofix - Best-effort current position from several unreliable sources
//!
//! This library races device GPS (two accuracy modes), a network-signal
//! estimator and public-IP geolocation, and returns the first position any of
//! them produces. Each source runs under its own platform timeout plus a hard
//! fallback timeout, so a caller always gets an answer or a complete failure
//! report in bounded time.
//!
//! # High-Level API
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
//! let resolution = coordinator.resolve().await?;
//! println!("{} won after {:?}", resolution.provider, resolution.elapsed);
//! ```

pub mod config;
pub mod location;
pub mod logging;

/// Version of the geofix library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
