//! Resolution Coordinator - races every provider for a single position.
//!
//! Each call to [`ResolutionCoordinator::resolve`] fans out to all providers
//! at once and settles on the first one to succeed. Latency decides, not
//! declared priority: a fast city-level fix beats waiting on a slow GPS lock.
//!
//! # Race mechanics
//!
//! ```text
//! resolve()
//!     │
//!     ├── spawn ─ gps-high-accuracy ─┐
//!     ├── spawn ─ gps-standard ──────┤  timeout(fallback, resolve(options))
//!     ├── spawn ─ network ───────────┤
//!     └── spawn ─ ip ────────────────┘
//!                                    │
//!                      mpsc (capacity = provider count)
//!                                    │
//!              first Ok wins ── all Err → AllSourcesFailed
//! ```
//!
//! - The channel holds one slot per provider, so no producer ever waits on it.
//!   Results sent after the winner are dropped.
//! - Every provider runs under the fallback timeout in addition to its own
//!   internal timeout; whichever fires first applies.
//! - A [`CancellationToken`] drop guard cancels in-flight providers when the
//!   call returns or the caller drops the future. Dropping a provider future
//!   abandons its GPS callback or HTTP request, which touches no shared state.
//!
//! Calls share nothing but the immutable provider set, so concurrent
//! resolutions on one coordinator are independent races.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::device::LocationService;
use super::error::{ProviderError, ResolutionError};
use super::gps::{GpsMode, GpsProvider};
use super::ip::{GeoHttpClient, IpGeolocationProvider};
use super::network::NetworkProvider;
use super::options::Platform;
use super::provider::ProviderDescriptor;
use super::record::PositionRecord;
use crate::config::ConfigFile;

/// Default hard upper bound on any single provider.
pub const DEFAULT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors building a coordinator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoordinatorError {
    /// A coordinator needs at least one provider.
    #[error("no position providers configured")]
    NoProviders,

    /// Two providers share a name, which would merge their diagnostics.
    #[error("duplicate provider name: {0}")]
    DuplicateProvider(String),

    /// The fallback timeout must be positive.
    #[error("fallback timeout must be greater than zero")]
    ZeroFallbackTimeout,
}

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// The winning position.
    pub position: PositionRecord,

    /// Name of the provider that produced it.
    pub provider: String,

    /// Time from launch to the winning result.
    pub elapsed: Duration,
}

/// A provider's report back to the race.
struct SourceOutcome {
    provider: String,
    result: Result<PositionRecord, ProviderError>,
}

/// Races a fixed set of providers for the current position.
#[derive(Debug, Clone)]
pub struct ResolutionCoordinator {
    descriptors: Arc<[ProviderDescriptor]>,
    platform: Platform,
    fallback_timeout: Duration,
}

impl ResolutionCoordinator {
    /// Start building a coordinator with a custom provider set.
    pub fn builder() -> CoordinatorBuilder {
        CoordinatorBuilder::default()
    }

    /// Build the standard four-source coordinator.
    ///
    /// Providers, in declared order: high-accuracy GPS, standard GPS,
    /// network (unsupported stub), IP geolocation.
    pub fn baseline<C>(
        location: Arc<dyn LocationService>,
        http: C,
        config: &ConfigFile,
    ) -> Result<Self, CoordinatorError>
    where
        C: GeoHttpClient + 'static,
    {
        Self::builder()
            .platform(config.platform())
            .fallback_timeout(config.fallback_timeout())
            .provider(ProviderDescriptor::new(
                0,
                true,
                Arc::new(GpsProvider::new(GpsMode::HighAccuracy, Arc::clone(&location))),
            ))
            .provider(ProviderDescriptor::new(
                1,
                false,
                Arc::new(GpsProvider::new(GpsMode::Standard, location)),
            ))
            .provider(ProviderDescriptor::new(2, false, Arc::new(NetworkProvider::new())))
            .provider(ProviderDescriptor::new(
                3,
                false,
                Arc::new(IpGeolocationProvider::new(http, config.ip.endpoint.clone())),
            ))
            .build()
    }

    /// Providers in launch order.
    pub fn descriptors(&self) -> &[ProviderDescriptor] {
        &self.descriptors
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn fallback_timeout(&self) -> Duration {
        self.fallback_timeout
    }

    /// Resolve the current position.
    ///
    /// Returns the first successful provider's record, or
    /// [`ResolutionError::AllSourcesFailed`] with one entry per provider.
    /// Must be called from within a Tokio runtime.
    pub async fn get_current_position(&self) -> Result<PositionRecord, ResolutionError> {
        self.resolve().await.map(|resolution| resolution.position)
    }

    /// Resolve the current position, reporting which provider won and how long it took.
    pub async fn resolve(&self) -> Result<Resolution, ResolutionError> {
        let started = Instant::now();
        let cancellation = CancellationToken::new();
        let _cancel_on_exit = cancellation.clone().drop_guard();

        let (outcome_tx, mut outcome_rx) = mpsc::channel(self.descriptors.len());

        for descriptor in self.descriptors.iter() {
            self.launch(descriptor, outcome_tx.clone(), cancellation.child_token());
        }
        // Only the spawned tasks hold senders now
        drop(outcome_tx);

        let mut failures = BTreeMap::new();

        while let Some(SourceOutcome { provider, result }) = outcome_rx.recv().await {
            match result {
                Ok(position) => {
                    let elapsed = started.elapsed();
                    info!(
                        provider = %provider,
                        elapsed_ms = elapsed.as_millis() as u64,
                        accuracy_m = position.accuracy(),
                        failed_before = failures.len(),
                        "Position resolved"
                    );
                    return Ok(Resolution {
                        position,
                        provider,
                        elapsed,
                    });
                }
                Err(error) => {
                    debug!(provider = %provider, error = %error, "Position source failed");
                    failures.insert(provider, error);
                }
            }
        }

        // Every sender is gone. A provider missing from the map ended without
        // reporting (its task panicked).
        for descriptor in self.descriptors.iter() {
            failures
                .entry(descriptor.name().to_string())
                .or_insert_with(|| ProviderError::Aborted {
                    provider: descriptor.name().to_string(),
                });
        }

        warn!(
            sources = failures.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "All position sources failed"
        );

        Err(ResolutionError::AllSourcesFailed { failures })
    }

    /// Spawn one provider into the race.
    fn launch(
        &self,
        descriptor: &ProviderDescriptor,
        outcome_tx: mpsc::Sender<SourceOutcome>,
        cancellation: CancellationToken,
    ) {
        let provider = Arc::clone(descriptor.provider());
        let options = self.platform.acquisition_options(descriptor.high_accuracy());
        let fallback = self.fallback_timeout;

        debug!(
            provider = descriptor.name(),
            priority = descriptor.priority(),
            high_accuracy = options.enable_high_accuracy,
            timeout_ms = options.timeout.as_millis() as u64,
            "Launching position source"
        );

        tokio::spawn(async move {
            let name = provider.name().to_string();

            let result = tokio::select! {
                biased;

                _ = cancellation.cancelled() => {
                    tracing::trace!(provider = %name, "Position source cancelled");
                    return;
                }

                result = tokio::time::timeout(fallback, provider.resolve(&options)) => {
                    result.unwrap_or_else(|_| {
                        Err(ProviderError::Timeout {
                            provider: name.clone(),
                            after: fallback,
                        })
                    })
                }
            };

            // Fails only once a winner was taken and the receiver dropped
            let _ = outcome_tx.try_send(SourceOutcome {
                provider: name,
                result,
            });
        });
    }
}

/// Builder for [`ResolutionCoordinator`].
#[derive(Debug, Clone)]
pub struct CoordinatorBuilder {
    descriptors: Vec<ProviderDescriptor>,
    platform: Platform,
    fallback_timeout: Duration,
}

impl Default for CoordinatorBuilder {
    fn default() -> Self {
        Self {
            descriptors: Vec::new(),
            platform: Platform::default(),
            fallback_timeout: DEFAULT_FALLBACK_TIMEOUT,
        }
    }
}

impl CoordinatorBuilder {
    /// Set the platform used to derive per-provider options.
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// Set the platform from a user-agent string or OS hint.
    pub fn platform_hint(self, hint: &str) -> Self {
        self.platform(Platform::from_hint(hint))
    }

    /// Set the hard per-provider timeout. Default: 15 seconds.
    pub fn fallback_timeout(mut self, timeout: Duration) -> Self {
        self.fallback_timeout = timeout;
        self
    }

    /// Add a provider.
    pub fn provider(mut self, descriptor: ProviderDescriptor) -> Self {
        self.descriptors.push(descriptor);
        self
    }

    /// Validate and build.
    ///
    /// Providers are launched in ascending priority; equal priorities keep
    /// insertion order.
    pub fn build(mut self) -> Result<ResolutionCoordinator, CoordinatorError> {
        if self.descriptors.is_empty() {
            return Err(CoordinatorError::NoProviders);
        }
        if self.fallback_timeout.is_zero() {
            return Err(CoordinatorError::ZeroFallbackTimeout);
        }

        let mut seen = HashSet::new();
        for descriptor in &self.descriptors {
            if !seen.insert(descriptor.name()) {
                return Err(CoordinatorError::DuplicateProvider(
                    descriptor.name().to_string(),
                ));
            }
        }

        self.descriptors.sort_by_key(ProviderDescriptor::priority);

        Ok(ResolutionCoordinator {
            descriptors: self.descriptors.into(),
            platform: self.platform,
            fallback_timeout: self.fallback_timeout,
        })
    }
}
