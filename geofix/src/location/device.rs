//! Device location capability.
//!
//! Platform location APIs are callback based: you hand over the options and a
//! completion callback, and the subsystem calls it once with either a raw fix
//! or a failure. [`LocationService`] models exactly that, so platform glue
//! code stays thin and [`super::gps::GpsProvider`] owns the async bridging.

use thiserror::Error;

use super::options::AcquisitionOptions;
use super::record::{InvalidPosition, PositionRecord};

/// Completion callback for a location request. Called at most once.
pub type FixCallback = Box<dyn FnOnce(Result<RawFix, DeviceFailure>) + Send + 'static>;

/// Reasons the device location subsystem reports for a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceFailure {
    /// The user or OS denied location access.
    #[error("permission denied")]
    PermissionDenied,

    /// No fix could be computed (no signal, hardware off).
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),

    /// The subsystem gave up on its own timer.
    #[error("device timeout")]
    Timeout,
}

/// A raw reading as reported by the device.
///
/// Optional readings are `None` when the device did not report them.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RawFix {
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: f64,
    pub altitude: Option<f64>,
    pub altitude_accuracy: Option<f64>,
    pub heading: Option<f64>,
    pub speed: Option<f64>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl RawFix {
    /// Map the fix into a [`PositionRecord`].
    ///
    /// Latitude and longitude are copied exactly. Missing or non-finite
    /// optional readings become unset; genuine zeros are kept.
    pub fn into_record(self) -> Result<PositionRecord, InvalidPosition> {
        Ok(
            PositionRecord::new(self.latitude, self.longitude, self.accuracy, self.timestamp)?
                .with_altitude(reading(self.altitude))
                .with_altitude_accuracy(reading(self.altitude_accuracy))
                .with_heading(reading(self.heading))
                .with_speed(reading(self.speed)),
        )
    }
}

/// Absent or NaN/infinite readings are treated as unreported.
fn reading(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Device location subsystem.
pub trait LocationService: Send + Sync {
    /// Request the current position.
    ///
    /// The implementation must eventually call `callback` with a fix or a
    /// failure, or drop it (which the caller treats as a failure).
    fn request_current_position(&self, options: &AcquisitionOptions, callback: FixCallback);
}

/// Location service for hosts without positioning hardware.
///
/// Fails every request immediately, leaving resolution to the remaining
/// sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableLocationService;

impl LocationService for UnavailableLocationService {
    fn request_current_position(&self, _options: &AcquisitionOptions, callback: FixCallback) {
        callback(Err(DeviceFailure::PositionUnavailable(
            "no device location service on this host".to_string(),
        )));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::mpsc;

    fn fix(lat: f64, lon: f64) -> RawFix {
        RawFix {
            latitude: lat,
            longitude: lon,
            accuracy: 12.0,
            timestamp: 1_700_000_000_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_into_record_copies_required_fields() {
        let record = fix(-23.5, -46.6).into_record().unwrap();
        assert_eq!(record.latitude(), -23.5);
        assert_eq!(record.longitude(), -46.6);
        assert_eq!(record.accuracy(), 12.0);
        assert_eq!(record.timestamp(), 1_700_000_000_000);
    }

    #[test]
    fn test_into_record_absent_fields_unset() {
        let record = fix(10.0, 10.0).into_record().unwrap();
        assert_eq!(record.altitude(), None);
        assert_eq!(record.altitude_accuracy(), None);
        assert_eq!(record.heading(), None);
        assert_eq!(record.speed(), None);
    }

    #[test]
    fn test_into_record_nan_readings_unset() {
        let raw = RawFix {
            heading: Some(f64::NAN),
            speed: Some(f64::INFINITY),
            altitude: Some(812.0),
            ..fix(10.0, 10.0)
        };
        let record = raw.into_record().unwrap();
        assert_eq!(record.heading(), None);
        assert_eq!(record.speed(), None);
        assert_eq!(record.altitude(), Some(812.0));
    }

    #[test]
    fn test_into_record_rejects_invalid_fix() {
        assert!(matches!(
            fix(123.0, 0.0).into_record(),
            Err(InvalidPosition::Latitude(_))
        ));
    }

    #[test]
    fn test_unavailable_service_fails_immediately() {
        let (tx, rx) = mpsc::channel();
        let options = crate::location::Platform::Other.acquisition_options(true);

        UnavailableLocationService.request_current_position(
            &options,
            Box::new(move |result: Result<RawFix, DeviceFailure>| {
                tx.send(result).unwrap();
            }),
        );

        let result = rx.try_recv().unwrap();
        assert!(matches!(result, Err(DeviceFailure::PositionUnavailable(_))));
    }

    #[test]
    fn test_device_failure_display() {
        assert_eq!(DeviceFailure::PermissionDenied.to_string(), "permission denied");
        assert_eq!(
            DeviceFailure::PositionUnavailable("no signal".into()).to_string(),
            "position unavailable: no signal"
        );
    }

    proptest! {
        /// Property: valid coordinates survive mapping unchanged.
        #[test]
        fn prop_coordinates_copied_exactly(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64,
        ) {
            let record = fix(lat, lon).into_record().unwrap();
            prop_assert_eq!(record.latitude(), lat);
            prop_assert_eq!(record.longitude(), lon);
        }

        /// Property: absent optionals are never coerced to zero.
        #[test]
        fn prop_absent_optionals_stay_unset(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64,
            altitude in proptest::option::of(-500.0f64..9000.0),
        ) {
            let raw = RawFix { altitude, ..fix(lat, lon) };
            let record = raw.into_record().unwrap();
            prop_assert_eq!(record.altitude(), altitude);
            prop_assert_eq!(record.heading(), None);
            prop_assert_eq!(record.speed(), None);
        }
    }
}
