//! OpenAI-compatible HTTP client.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use vecsync_core::{Error, Result};

use crate::{OpenAiConfig, TRACING_TARGET_CLIENT};

/// Client for an OpenAI-compatible embeddings endpoint.
///
/// Cheaply cloneable; clones share the same connection pool.
#[derive(Clone)]
pub struct OpenAiClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http: reqwest::Client,
    config: OpenAiConfig,
}

/// Wire request for the `/embeddings` endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct WireRequest<'a> {
    pub model: &'a str,
    pub input: &'a [String],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,
}

/// Wire response from the `/embeddings` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse {
    pub data: Vec<WireEmbedding>,
    pub model: String,
    #[serde(default)]
    pub usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireEmbedding {
    pub embedding: Vec<f32>,
    pub index: usize,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireUsage {
    pub prompt_tokens: u32,
    pub total_tokens: u32,
}

impl OpenAiClient {
    /// Creates a new client from a configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            base_url = config.base_url(),
            model = config.model(),
            "Building OpenAI client from configuration"
        );

        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                Error::configuration()
                    .with_message("failed to build HTTP client")
                    .with_source(e)
            })?;

        Ok(Self {
            inner: Arc::new(ClientInner { http, config }),
        })
    }

    /// Returns the configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.inner.config
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.inner.config.base_url(), path)
    }

    /// POSTs one batched embeddings request.
    pub(crate) async fn post_embeddings(&self, request: &WireRequest<'_>) -> Result<WireResponse> {
        let url = self.endpoint("embeddings");

        let response = self
            .inner
            .http
            .post(&url)
            .bearer_auth(self.inner.config.api_key())
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }

        response.json::<WireResponse>().await.map_err(|e| {
            Error::serialization()
                .with_message("malformed embeddings response")
                .with_source(e)
        })
    }

    /// Probes the API for reachability.
    pub(crate) async fn probe(&self) -> Result<()> {
        let url = self.endpoint("models");

        let response = self
            .inner
            .http
            .get(&url)
            .bearer_auth(self.inner.config.api_key())
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body));
        }
        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::timeout()
            .with_message("embedding request timed out")
            .with_source(e)
    } else {
        Error::network_error()
            .with_message("embedding request failed")
            .with_source(e)
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> Error {
    let error = match status.as_u16() {
        401 | 403 => Error::authentication(),
        429 => Error::rate_limited(),
        500..=599 => Error::service_unavailable(),
        _ => Error::external_error(),
    };
    error.with_message(format!("upstream returned {}: {}", status, body))
}

#[cfg(test)]
mod tests {
    use vecsync_core::ErrorKind;

    use super::*;

    #[test]
    fn status_codes_map_to_error_kinds() {
        let unauthorized = status_error(reqwest::StatusCode::UNAUTHORIZED, "no key");
        assert_eq!(unauthorized.kind(), ErrorKind::Authentication);

        let throttled = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "slow down");
        assert_eq!(throttled.kind(), ErrorKind::RateLimited);

        let upstream = status_error(reqwest::StatusCode::BAD_GATEWAY, "bad gateway");
        assert_eq!(upstream.kind(), ErrorKind::ServiceUnavailable);

        let other = status_error(reqwest::StatusCode::BAD_REQUEST, "bad input");
        assert_eq!(other.kind(), ErrorKind::ExternalError);
    }

    #[test]
    fn status_error_carries_status_and_body() {
        let err = status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "quota exceeded");
        let rendered = err.to_string();
        assert!(rendered.contains("429"));
        assert!(rendered.contains("quota exceeded"));
    }

    #[test]
    fn wire_request_omits_absent_dimensions() {
        let input = vec!["hello".to_string()];
        let request = WireRequest {
            model: "text-embedding-3-small",
            input: &input,
            dimensions: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("dimensions").is_none());
        assert_eq!(json["input"], serde_json::json!(["hello"]));
    }
}
