//! HTTP transport for IP geolocation.
//!
//! [`GeoHttpClient`] keeps the provider independent of `reqwest`, so tests can
//! inject canned responses and failures.

use std::future::Future;
use std::time::Duration;

use super::error::IpLookupError;

/// Transport-level timeout for a single lookup.
///
/// The provider applies the platform timeout on top of this.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(20);

/// User-Agent sent with lookups. Several free endpoints reject anonymous clients.
const DEFAULT_USER_AGENT: &str = concat!("geofix/", env!("CARGO_PKG_VERSION"));

/// Trait for the single GET request an IP lookup needs.
pub trait GeoHttpClient: Send + Sync {
    /// Fetch `url` and return the response body.
    ///
    /// Non-success statuses must be reported as errors.
    fn get(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, IpLookupError>> + Send;
}

/// Production client backed by a reusable `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestGeoClient {
    http: reqwest::Client,
}

impl ReqwestGeoClient {
    /// Create a client with the default timeout and User-Agent.
    pub fn new() -> Result<Self, IpLookupError> {
        Self::with_timeout(DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with a custom transport timeout.
    pub fn with_timeout(timeout: Duration) -> Result<Self, IpLookupError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()
            .map_err(|e| IpLookupError::ClientBuild(e.to_string()))?;

        Ok(Self { http })
    }
}

impl GeoHttpClient for ReqwestGeoClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>, IpLookupError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| IpLookupError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IpLookupError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| IpLookupError::Http(e.to_string()))?;

        tracing::trace!(url, bytes = bytes.len(), "IP geolocation response received");

        Ok(bytes.to_vec())
    }
}
