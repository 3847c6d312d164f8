//! Shared HTTP plumbing for the provider adapters
//!
//! One request per call: status codes and transport failures are mapped to
//! [`ProviderError`] here, and retrying is left to the application layer.

use peer_review_application::ProviderError;
use peer_review_domain::ReviewError;
use peer_review_domain::core::string::truncate;
use reqwest::{Client, RequestBuilder, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Connect timeout, independent of the per-request timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest response body kept inside an error
const MAX_ERROR_BODY_LEN: usize = 1000;

#[derive(Debug, Clone)]
pub(crate) struct HttpClient {
    client: Client,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, ReviewError> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .map_err(|e| {
                ReviewError::configuration(format!("Failed to build HTTP client: {e}"))
            })?;

        Ok(Self { client, timeout })
    }

    pub fn post(&self, url: &str) -> RequestBuilder {
        self.client.post(url).timeout(self.timeout)
    }

    /// Send `request` and return the body of a successful response.
    pub async fn send(
        &self,
        request: RequestBuilder,
        provider_name: &str,
    ) -> Result<String, ProviderError> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.text().await.map_err(map_transport_error)?;

        debug!(
            provider = provider_name,
            status = status.as_u16(),
            bytes = body.len(),
            "HTTP response received"
        );

        if status.is_success() {
            Ok(body)
        } else {
            Err(map_status(status, &body))
        }
    }
}

/// Map a non-success status to a [`ProviderError`].
///
/// - 401/403 → `Auth`
/// - anything else → `Http { status, body }`
pub(crate) fn map_status(status: StatusCode, body: &str) -> ProviderError {
    let body = truncate(body, MAX_ERROR_BODY_LEN);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::Auth(format!("{status}: {body}"))
        }
        _ => ProviderError::Http {
            status: status.as_u16(),
            body,
        },
    }
}

fn map_transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else if e.is_connect() {
        ProviderError::Connection(e.to_string())
    } else {
        ProviderError::Other(e.to_string())
    }
}

/// Parse a JSON body, mapping failures to `InvalidResponse`.
pub(crate) fn parse_json<T: serde::de::DeserializeOwned>(
    body: &str,
    provider_name: &str,
) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| {
        ProviderError::InvalidResponse(format!("Failed to parse {provider_name} response: {e}"))
    })
}
