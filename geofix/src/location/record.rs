//! The position value handed back to callers.
//!
//! A [`PositionRecord`] is built once by a provider and never mutated after it
//! leaves the coordinator. Construction validates the coordinate ranges, so any
//! record a caller holds is known to be on the globe.

use serde::Serialize;
use thiserror::Error;

/// A coordinate or accuracy value that violates the record invariants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidPosition {
    /// Latitude outside [-90, 90] or not finite.
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    /// Longitude outside [-180, 180] or not finite.
    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),

    /// Negative or non-finite accuracy radius.
    #[error("accuracy {0} must be a finite, non-negative number of meters")]
    Accuracy(f64),
}

/// A single resolved position.
///
/// # Optional readings
///
/// Altitude, altitude accuracy, heading and speed are `None` when the source
/// did not report them. They are never defaulted to `0.0`, since zero is a
/// meaningful reading (sea level, due north, stationary).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionRecord {
    latitude: f64,
    longitude: f64,
    accuracy: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    altitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    altitude_accuracy: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    heading: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    speed: Option<f64>,
    timestamp: i64,
}

impl PositionRecord {
    /// Create a record from the mandatory fields.
    ///
    /// # Arguments
    ///
    /// * `latitude` - Degrees, -90 to 90
    /// * `longitude` - Degrees, -180 to 180
    /// * `accuracy` - Horizontal error radius in meters (lower is better)
    /// * `timestamp` - Epoch milliseconds when the reading was taken
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        timestamp: i64,
    ) -> Result<Self, InvalidPosition> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidPosition::Latitude(latitude));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidPosition::Longitude(longitude));
        }
        if !accuracy.is_finite() || accuracy < 0.0 {
            return Err(InvalidPosition::Accuracy(accuracy));
        }

        Ok(Self {
            latitude,
            longitude,
            accuracy,
            altitude: None,
            altitude_accuracy: None,
            heading: None,
            speed: None,
            timestamp,
        })
    }

    /// Attach an altitude in meters.
    pub fn with_altitude(mut self, altitude: Option<f64>) -> Self {
        self.altitude = altitude;
        self
    }

    /// Attach the altitude error in meters.
    pub fn with_altitude_accuracy(mut self, altitude_accuracy: Option<f64>) -> Self {
        self.altitude_accuracy = altitude_accuracy;
        self
    }

    /// Attach a heading in degrees (0-360).
    pub fn with_heading(mut self, heading: Option<f64>) -> Self {
        self.heading = heading;
        self
    }

    /// Attach a ground speed in m/s.
    pub fn with_speed(mut self, speed: Option<f64>) -> Self {
        self.speed = speed;
        self
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Horizontal error radius in meters.
    #[inline]
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    #[inline]
    pub fn altitude(&self) -> Option<f64> {
        self.altitude
    }

    #[inline]
    pub fn altitude_accuracy(&self) -> Option<f64> {
        self.altitude_accuracy
    }

    #[inline]
    pub fn heading(&self) -> Option<f64> {
        self.heading
    }

    #[inline]
    pub fn speed(&self) -> Option<f64> {
        self.speed
    }

    /// Epoch milliseconds when the reading was taken.
    #[inline]
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }
}
