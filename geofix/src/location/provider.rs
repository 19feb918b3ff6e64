//! Position provider contract.
//!
//! A [`PositionProvider`] is one strategy for getting a position out of one
//! underlying source. Providers hold no mutable shared state, so a single
//! instance can serve any number of concurrent resolutions.
//!
//! The coordinator stores providers behind `Arc<dyn PositionProvider>`, which
//! is why [`PositionProvider::resolve`] returns a boxed future rather than
//! `impl Future`.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;

use super::error::ProviderError;
use super::options::AcquisitionOptions;
use super::record::PositionRecord;

/// Name of the high-accuracy device GPS provider.
pub const GPS_HIGH_ACCURACY: &str = "gps-high-accuracy";

/// Name of the standard-accuracy device GPS provider.
pub const GPS_STANDARD: &str = "gps-standard";

/// Name of the network-signal provider.
pub const NETWORK: &str = "network";

/// Name of the IP geolocation provider.
pub const IP: &str = "ip";

/// One source of position estimates.
pub trait PositionProvider: Send + Sync {
    /// Unique name, used as the key in diagnostics.
    fn name(&self) -> &str;

    /// Attempt to produce a position.
    ///
    /// Implementations must return every failure as a [`ProviderError`]
    /// carrying [`Self::name`]; they must not panic.
    fn resolve<'a>(
        &'a self,
        options: &'a AcquisitionOptions,
    ) -> BoxFuture<'a, Result<PositionRecord, ProviderError>>;
}

/// A provider plus the metadata the coordinator needs to run it.
///
/// `priority` (lower = preferred) only orders launch and log output. It never
/// decides the winner: the first provider to succeed wins.
#[derive(Clone)]
pub struct ProviderDescriptor {
    priority: u8,
    high_accuracy: bool,
    provider: Arc<dyn PositionProvider>,
}

impl ProviderDescriptor {
    /// Describe a provider.
    ///
    /// # Arguments
    ///
    /// * `priority` - Declared preference, lower first
    /// * `high_accuracy` - Which options row to derive for this provider
    /// * `provider` - The provider itself
    pub fn new(priority: u8, high_accuracy: bool, provider: Arc<dyn PositionProvider>) -> Self {
        Self {
            priority,
            high_accuracy,
            provider,
        }
    }

    pub fn name(&self) -> &str {
        self.provider.name()
    }

    pub fn priority(&self) -> u8 {
        self.priority
    }

    pub fn high_accuracy(&self) -> bool {
        self.high_accuracy
    }

    pub fn provider(&self) -> &Arc<dyn PositionProvider> {
        &self.provider
    }
}

impl fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("name", &self.name())
            .field("priority", &self.priority)
            .field("high_accuracy", &self.high_accuracy)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    struct FixedProvider;

    impl PositionProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        fn resolve<'a>(
            &'a self,
            _options: &'a AcquisitionOptions,
        ) -> BoxFuture<'a, Result<PositionRecord, ProviderError>> {
            async move {
                PositionRecord::new(48.85, 2.35, 50.0, 0).map_err(|e| {
                    ProviderError::AcquisitionFailed {
                        provider: self.name().to_string(),
                        reason: e.to_string(),
                    }
                })
            }
            .boxed()
        }
    }

    #[test]
    fn test_descriptor_accessors() {
        let descriptor = ProviderDescriptor::new(2, true, Arc::new(FixedProvider));
        assert_eq!(descriptor.name(), "fixed");
        assert_eq!(descriptor.priority(), 2);
        assert!(descriptor.high_accuracy());
    }

    #[test]
    fn test_descriptor_debug_shows_name() {
        let descriptor = ProviderDescriptor::new(0, false, Arc::new(FixedProvider));
        let debug = format!("{:?}", descriptor);
        assert!(debug.contains("\"fixed\""));
        assert!(debug.contains("priority: 0"));
    }

    #[tokio::test]
    async fn test_provider_through_descriptor() {
        let descriptor = ProviderDescriptor::new(0, false, Arc::new(FixedProvider));
        let options = crate::location::Platform::Other.acquisition_options(false);

        let record = descriptor.provider().resolve(&options).await.unwrap();
        assert_eq!(record.latitude(), 48.85);
    }
}
