//! Device GPS providers.
//!
//! Both accuracy modes share one implementation. The mode only changes the
//! provider name; the options the coordinator derives for the descriptor
//! carry the actual accuracy flag and cache tolerance.
//!
//! # Callback bridging
//!
//! The [`LocationService`] callback is wired to a `oneshot` channel and the
//! receiver is awaited under the options' own timeout. If the service drops
//! the callback without calling it the receiver errors out, which is reported
//! as an acquisition failure rather than left pending.

use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use tokio::sync::oneshot;

use super::device::{DeviceFailure, LocationService, RawFix};
use super::error::ProviderError;
use super::options::AcquisitionOptions;
use super::provider::{PositionProvider, GPS_HIGH_ACCURACY, GPS_STANDARD};
use super::record::PositionRecord;

/// GPS accuracy mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GpsMode {
    /// Most precise fix, tight cache tolerance.
    HighAccuracy,
    /// Cheaper fix, looser cache tolerance.
    Standard,
}

impl GpsMode {
    /// Provider name for this mode.
    pub fn provider_name(self) -> &'static str {
        match self {
            Self::HighAccuracy => GPS_HIGH_ACCURACY,
            Self::Standard => GPS_STANDARD,
        }
    }

    pub fn is_high_accuracy(self) -> bool {
        self == Self::HighAccuracy
    }
}

/// Position provider backed by the device location subsystem.
pub struct GpsProvider {
    mode: GpsMode,
    service: Arc<dyn LocationService>,
}

impl GpsProvider {
    /// Create a GPS provider in the given mode.
    pub fn new(mode: GpsMode, service: Arc<dyn LocationService>) -> Self {
        Self { mode, service }
    }

    async fn acquire(&self, options: &AcquisitionOptions) -> Result<PositionRecord, ProviderError> {
        let (tx, rx) = oneshot::channel();

        self.service.request_current_position(
            options,
            Box::new(move |result: Result<RawFix, DeviceFailure>| {
                // Receiver is gone once the request is abandoned
                let _ = tx.send(result);
            }),
        );

        let outcome = tokio::time::timeout(options.timeout, rx)
            .await
            .map_err(|_| ProviderError::Timeout {
                provider: self.name().to_string(),
                after: options.timeout,
            })?;

        let fix = outcome
            .map_err(|_| self.acquisition_failed("location service dropped the request"))?
            .map_err(|failure| self.acquisition_failed(failure))?;

        let record = fix
            .into_record()
            .map_err(|invalid| self.acquisition_failed(invalid))?;

        tracing::trace!(
            provider = self.name(),
            latitude = record.latitude(),
            longitude = record.longitude(),
            accuracy_m = record.accuracy(),
            "Device fix received"
        );

        Ok(record)
    }

    fn acquisition_failed(&self, reason: impl ToString) -> ProviderError {
        ProviderError::AcquisitionFailed {
            provider: self.name().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl PositionProvider for GpsProvider {
    fn name(&self) -> &str {
        self.mode.provider_name()
    }

    fn resolve<'a>(
        &'a self,
        options: &'a AcquisitionOptions,
    ) -> BoxFuture<'a, Result<PositionRecord, ProviderError>> {
        self.acquire(options).boxed()
    }
}
