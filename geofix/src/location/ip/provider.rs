//! IP geolocation position provider.

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::Deserialize;

use super::client::GeoHttpClient;
use super::error::IpLookupError;
use crate::location::error::ProviderError;
use crate::location::options::AcquisitionOptions;
use crate::location::provider::{PositionProvider, IP};
use crate::location::record::PositionRecord;

/// Default lookup endpoint. Answers with `latitude`/`longitude` fields.
pub const DEFAULT_IP_ENDPOINT: &str = "https://ipapi.co/json/";

/// Accuracy reported for IP-derived positions (city level, deliberately coarse).
pub const IP_ACCURACY_METERS: f64 = 10_000.0;

/// Lookup response body.
///
/// Only the coordinates are used; other fields are ignored. Some endpoints
/// answer `200 OK` with `{"error": true, "reason": ...}` when rate limited.
#[derive(Debug, Clone, Deserialize)]
pub struct IpLookupResponse {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub error: bool,
    #[serde(default)]
    pub reason: Option<String>,
}

impl IpLookupResponse {
    /// Convert into a record stamped with `timestamp` (epoch ms).
    ///
    /// The endpoint supplies no reading time, so the caller passes the
    /// resolution time.
    pub fn into_record(self, timestamp: i64) -> Result<PositionRecord, IpLookupError> {
        if self.error {
            return Err(IpLookupError::Service(
                self.reason.unwrap_or_else(|| "unspecified".to_string()),
            ));
        }

        let (Some(latitude), Some(longitude)) = (self.latitude, self.longitude) else {
            return Err(IpLookupError::Json(
                "response lacks numeric latitude/longitude".to_string(),
            ));
        };

        Ok(PositionRecord::new(
            latitude,
            longitude,
            IP_ACCURACY_METERS,
            timestamp,
        )?)
    }
}

/// Parse a raw response body.
fn parse_response(body: &[u8], timestamp: i64) -> Result<PositionRecord, IpLookupError> {
    let response: IpLookupResponse =
        serde_json::from_slice(body).map_err(|e| IpLookupError::Json(e.to_string()))?;
    response.into_record(timestamp)
}

/// Position provider that geolocates the host's public IP address.
pub struct IpGeolocationProvider<C: GeoHttpClient> {
    client: C,
    endpoint: String,
}

impl<C: GeoHttpClient> IpGeolocationProvider<C> {
    /// Create a provider querying `endpoint` through `client`.
    pub fn new(client: C, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    async fn lookup(&self) -> Result<PositionRecord, IpLookupError> {
        let body = self.client.get(&self.endpoint).await?;
        let record = parse_response(&body, chrono::Utc::now().timestamp_millis())?;

        tracing::debug!(
            endpoint = %self.endpoint,
            latitude = record.latitude(),
            longitude = record.longitude(),
            "IP geolocation lookup succeeded"
        );

        Ok(record)
    }

    async fn resolve_within(
        &self,
        options: &AcquisitionOptions,
    ) -> Result<PositionRecord, ProviderError> {
        match tokio::time::timeout(options.timeout, self.lookup()).await {
            Ok(Ok(record)) => Ok(record),
            Ok(Err(e)) => Err(ProviderError::NetworkFailure {
                provider: IP.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(ProviderError::Timeout {
                provider: IP.to_string(),
                after: options.timeout,
            }),
        }
    }
}

impl<C: GeoHttpClient> PositionProvider for IpGeolocationProvider<C> {
    fn name(&self) -> &str {
        IP
    }

    fn resolve<'a>(
        &'a self,
        options: &'a AcquisitionOptions,
    ) -> BoxFuture<'a, Result<PositionRecord, ProviderError>> {
        self.resolve_within(options).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::options::Platform;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Mock client returning a canned result and recording requested URLs.
    struct MockGeoClient {
        result: Result<Vec<u8>, IpLookupError>,
        delay: Duration,
        urls: Mutex<Vec<String>>,
    }

    impl MockGeoClient {
        fn with_body(body: &str) -> Self {
            Self {
                result: Ok(body.as_bytes().to_vec()),
                delay: Duration::ZERO,
                urls: Mutex::new(Vec::new()),
            }
        }

        fn with_error(error: IpLookupError) -> Self {
            Self {
                result: Err(error),
                delay: Duration::ZERO,
                urls: Mutex::new(Vec::new()),
            }
        }
    }

    impl GeoHttpClient for MockGeoClient {
        async fn get(&self, url: &str) -> Result<Vec<u8>, IpLookupError> {
            self.urls.lock().unwrap().push(url.to_string());
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.result.clone()
        }
    }

    fn options() -> AcquisitionOptions {
        Platform::Other.acquisition_options(false)
    }

    #[tokio::test]
    async fn test_success_uses_coarse_accuracy() {
        let client = MockGeoClient::with_body(
            r#"{"ip": "203.0.113.7", "city": "São Paulo", "latitude": -23.0, "longitude": -46.0}"#,
        );
        let provider = IpGeolocationProvider::new(client, DEFAULT_IP_ENDPOINT);

        let before = chrono::Utc::now().timestamp_millis();
        let record = provider.resolve(&options()).await.unwrap();
        let after = chrono::Utc::now().timestamp_millis();

        assert_eq!(record.latitude(), -23.0);
        assert_eq!(record.longitude(), -46.0);
        assert_eq!(record.accuracy(), IP_ACCURACY_METERS);
        assert_eq!(record.altitude(), None);
        assert!(record.timestamp() >= before && record.timestamp() <= after);
        assert_eq!(
            provider.client.urls.lock().unwrap().as_slice(),
            &[DEFAULT_IP_ENDPOINT.to_string()]
        );
    }

    #[tokio::test]
    async fn test_transport_error_is_network_failure() {
        let client = MockGeoClient::with_error(IpLookupError::Http("connection refused".into()));
        let provider = IpGeolocationProvider::new(client, "http://localhost:1/json");

        let err = provider.resolve(&options()).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::NetworkFailure {
                provider: "ip".into(),
                reason: "HTTP request failed: connection refused".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_network_failure() {
        let provider =
            IpGeolocationProvider::new(MockGeoClient::with_body("<html>"), DEFAULT_IP_ENDPOINT);

        let err = provider.resolve(&options()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NetworkFailure { .. }));
    }

    #[tokio::test]
    async fn test_missing_coordinates_is_network_failure() {
        let provider = IpGeolocationProvider::new(
            MockGeoClient::with_body(r#"{"latitude": "south", "longitude": 3.0}"#),
            DEFAULT_IP_ENDPOINT,
        );
        assert!(matches!(
            provider.resolve(&options()).await,
            Err(ProviderError::NetworkFailure { .. })
        ));

        let provider = IpGeolocationProvider::new(
            MockGeoClient::with_body(r#"{"city": "Nowhere"}"#),
            DEFAULT_IP_ENDPOINT,
        );
        assert!(matches!(
            provider.resolve(&options()).await,
            Err(ProviderError::NetworkFailure { .. })
        ));
    }

    #[tokio::test]
    async fn test_service_error_body_is_network_failure() {
        let provider = IpGeolocationProvider::new(
            MockGeoClient::with_body(r#"{"error": true, "reason": "RateLimited"}"#),
            DEFAULT_IP_ENDPOINT,
        );

        let err = provider.resolve(&options()).await.unwrap_err();
        match err {
            ProviderError::NetworkFailure { reason, .. } => assert!(reason.contains("RateLimited")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_rejected() {
        let provider = IpGeolocationProvider::new(
            MockGeoClient::with_body(r#"{"latitude": 91.0, "longitude": 0.0}"#),
            DEFAULT_IP_ENDPOINT,
        );
        assert!(matches!(
            provider.resolve(&options()).await,
            Err(ProviderError::NetworkFailure { .. })
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_endpoint_times_out() {
        let client = MockGeoClient {
            delay: Duration::from_secs(60),
            ..MockGeoClient::with_body(r#"{"latitude": 1.0, "longitude": 1.0}"#)
        };
        let provider = IpGeolocationProvider::new(client, DEFAULT_IP_ENDPOINT);

        let err = provider.resolve(&options()).await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::Timeout {
                provider: "ip".into(),
                after: Duration::from_secs(15),
            }
        );
    }

    #[test]
    fn test_parse_response_ignores_extra_fields() {
        let body = br#"{
            "ip": "198.51.100.1",
            "network": "198.51.100.0/24",
            "version": "IPv4",
            "city": "Lisbon",
            "country_code": "PT",
            "latitude": 38.7223,
            "longitude": -9.1393,
            "timezone": "Europe/Lisbon",
            "asn": "AS3243"
        }"#;

        let record = parse_response(body, 7).unwrap();
        assert_eq!(record.latitude(), 38.7223);
        assert_eq!(record.longitude(), -9.1393);
        assert_eq!(record.timestamp(), 7);
    }
}
