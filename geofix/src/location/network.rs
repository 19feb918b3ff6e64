//! Network-signal position provider.
//!
//! Cell/Wi-Fi based estimation has no backend yet. The provider stays in the
//! race so diagnostics always list all four sources; it fails immediately
//! with [`ProviderError::Unsupported`] and never delays a resolution.

use futures::future::{self, BoxFuture};
use futures::FutureExt;

use super::error::ProviderError;
use super::options::AcquisitionOptions;
use super::provider::{PositionProvider, NETWORK};
use super::record::PositionRecord;

/// Placeholder for a network-signal estimator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkProvider;

impl NetworkProvider {
    pub fn new() -> Self {
        Self
    }
}

impl PositionProvider for NetworkProvider {
    fn name(&self) -> &str {
        NETWORK
    }

    fn resolve<'a>(
        &'a self,
        _options: &'a AcquisitionOptions,
    ) -> BoxFuture<'a, Result<PositionRecord, ProviderError>> {
        future::ready(Err(ProviderError::Unsupported {
            provider: NETWORK.to_string(),
        }))
        .boxed()
    }
}
