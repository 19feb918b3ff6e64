//! Error types for position resolution.
//!
//! Providers never panic or bubble raw transport errors: every failure is
//! converted into a [`ProviderError`] that names the source it came from.
//! Only the aggregate [`ResolutionError`] reaches callers.

use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

/// Failure of a single position source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The device location subsystem reported a failure
    /// (permission denied, no signal, invalid fix).
    #[error("{provider}: location acquisition failed: {reason}")]
    AcquisitionFailed { provider: String, reason: String },

    /// The source did not complete within its allotted window.
    #[error("{provider}: no position within {after:?}")]
    Timeout { provider: String, after: Duration },

    /// Transport or parse failure talking to an external service.
    #[error("{provider}: network failure: {reason}")]
    NetworkFailure { provider: String, reason: String },

    /// The source is intentionally not implemented.
    #[error("{provider}: source not supported")]
    Unsupported { provider: String },

    /// The provider task ended without reporting a result.
    #[error("{provider}: provider task aborted")]
    Aborted { provider: String },
}

impl ProviderError {
    /// Name of the provider that produced this error.
    pub fn provider(&self) -> &str {
        match self {
            Self::AcquisitionFailed { provider, .. }
            | Self::Timeout { provider, .. }
            | Self::NetworkFailure { provider, .. }
            | Self::Unsupported { provider }
            | Self::Aborted { provider } => provider,
        }
    }

    /// Returns true for [`ProviderError::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}

/// Failure of a whole resolution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolutionError {
    /// Every provider failed or timed out. Keyed by provider name.
    #[error("all {} position sources failed", .failures.len())]
    AllSourcesFailed {
        failures: BTreeMap<String, ProviderError>,
    },
}

impl ResolutionError {
    /// Per-provider failure reasons.
    pub fn failures(&self) -> &BTreeMap<String, ProviderError> {
        match self {
            Self::AllSourcesFailed { failures } => failures,
        }
    }
}
