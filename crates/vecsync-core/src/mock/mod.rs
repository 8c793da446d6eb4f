//! Mock embedding provider for testing.
//!
//! This module provides a deterministic [`EmbeddingProvider`] useful for
//! unit and integration testing: the same text always produces the same
//! vector, and a failure mode can be configured to exercise error paths.
//!
//! # Feature Flag
//!
//! This module is only available when the `test-utils` feature is enabled:
//!
//! ```toml
//! [dev-dependencies]
//! vecsync-core = { version = "...", features = ["test-utils"] }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::emb::{EmbeddingData, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
use crate::{Error, Result, ServiceHealth};

/// Configuration for the mock provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct MockConfig {
    /// Dimensions of mock embedding vectors.
    #[cfg_attr(
        feature = "config",
        arg(
            long = "mock-embedding-dimensions",
            env = "MOCK_EMBEDDING_DIMENSIONS",
            default_value = "8"
        )
    )]
    #[serde(default = "default_dimensions")]
    pub dimensions: usize,

    /// When set, every generate call fails with this message.
    #[cfg_attr(feature = "config", arg(long = "mock-fail-with", env = "MOCK_FAIL_WITH"))]
    #[serde(default)]
    pub fail_with: Option<String>,
}

fn default_dimensions() -> usize {
    8
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            dimensions: default_dimensions(),
            fail_with: None,
        }
    }
}

/// Deterministic mock embedding provider.
///
/// Vectors are derived from the bytes of the input text, so repeated
/// calls with the same text return identical embeddings. Tracks how many
/// generate calls were made, which tests use to assert batching behavior.
#[derive(Clone, Debug)]
pub struct MockProvider {
    config: Arc<MockConfig>,
    calls: Arc<AtomicUsize>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(MockConfig::default())
    }
}

impl MockProvider {
    /// Creates a new mock provider with the given configuration.
    pub fn new(config: MockConfig) -> Self {
        Self {
            config: Arc::new(config),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Creates a provider that produces vectors of the given length.
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self::new(MockConfig {
            dimensions,
            ..MockConfig::default()
        })
    }

    /// Creates a provider whose generate calls always fail.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(MockConfig {
            fail_with: Some(message.into()),
            ..MockConfig::default()
        })
    }

    /// Returns the number of generate calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let seed: u32 = text.bytes().map(u32::from).sum();
        (0..self.config.dimensions)
            .map(|i| ((seed.wrapping_mul(i as u32 + 1)) % 1000) as f32 / 1000.0)
            .collect()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for MockProvider {
    async fn generate_embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.config.fail_with {
            return Err(Error::external_error().with_message(message.clone()));
        }

        let data = request
            .texts
            .iter()
            .enumerate()
            .map(|(index, text)| EmbeddingData::new(self.embed_text(text), index))
            .collect();

        Ok(EmbeddingResponse::new(
            request.request_id,
            data,
            request.model.clone(),
        ))
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_is_deterministic() {
        let provider = MockProvider::with_dimensions(4);
        let request = EmbeddingRequest::new("mock-model").with_text("Alice");

        let first = provider.generate_embeddings(&request).await.unwrap();
        let second = provider.generate_embeddings(&request).await.unwrap();

        assert_eq!(first.data, second.data);
        assert_eq!(first.embedding_dimensions(), Some(4));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn mock_returns_one_vector_per_text() {
        let provider = MockProvider::default();
        let request = EmbeddingRequest::new("mock-model")
            .with_text("one")
            .with_text("two")
            .with_text("three");

        let response = provider.generate_embeddings(&request).await.unwrap();
        assert_eq!(response.embedding_count(), 3);
        assert!(response.validate().is_ok());
    }

    #[tokio::test]
    async fn failing_mock_returns_structured_error() {
        let provider = MockProvider::failing("simulated outage");
        let request = EmbeddingRequest::new("mock-model").with_text("Alice");

        let err = provider.generate_embeddings(&request).await.unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ExternalError);
        assert!(err.to_string().contains("simulated outage"));
    }
}
