//! Configuration for the OpenAI-compatible embedding client.

use std::time::Duration;

use derive_builder::Builder;

/// Default values for configuration options.
mod defaults {
    use std::time::Duration;

    /// OpenAI API base URL.
    pub const BASE_URL: &str = "https://api.openai.com/v1";

    /// Default embedding model.
    pub const MODEL: &str = "text-embedding-3-small";

    /// Vector length of the default model.
    pub const DIMENSIONS: usize = 1536;

    /// Default request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// Configuration for [`OpenAiClient`](crate::OpenAiClient).
///
/// # Examples
///
/// ```rust
/// use vecsync_openai::OpenAiConfig;
///
/// let config = OpenAiConfig::builder()
///     .with_api_key("sk-test")
///     .with_model("text-embedding-3-large")
///     .with_dimensions(3072usize)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.model(), "text-embedding-3-large");
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(
    setter(into, prefix = "with"),
    build_fn(validate = "validate_config")
)]
pub struct OpenAiConfig {
    /// API key used as a bearer token.
    api_key: String,

    /// Base URL of the API; override to target a compatible server.
    #[builder(default = "defaults::BASE_URL.to_string()")]
    base_url: String,

    /// Embedding model name.
    #[builder(default = "defaults::MODEL.to_string()")]
    model: String,

    /// Vector length the configured model produces.
    #[builder(default = "defaults::DIMENSIONS")]
    dimensions: usize,

    /// Per-request timeout; an elapsed timeout is treated as a failed
    /// call.
    #[builder(default = "defaults::REQUEST_TIMEOUT")]
    request_timeout: Duration,
}

/// Validates the configuration before building.
fn validate_config(builder: &OpenAiConfigBuilder) -> Result<(), String> {
    if let Some(api_key) = &builder.api_key
        && api_key.is_empty()
    {
        return Err("API key must not be empty".to_string());
    }

    if let Some(base_url) = &builder.base_url
        && !base_url.starts_with("http://")
        && !base_url.starts_with("https://")
    {
        return Err(format!(
            "Base URL must start with http:// or https://, got {}",
            base_url
        ));
    }

    if let Some(dimensions) = builder.dimensions
        && dimensions == 0
    {
        return Err("Dimensions must be greater than 0".to_string());
    }

    Ok(())
}

impl OpenAiConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> OpenAiConfigBuilder {
        OpenAiConfigBuilder::default()
    }

    /// Returns the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Returns the base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the vector length the configured model produces.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Returns the per-request timeout.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_applied() {
        let config = OpenAiConfig::builder().with_api_key("sk-test").build().unwrap();

        assert_eq!(config.base_url(), "https://api.openai.com/v1");
        assert_eq!(config.model(), "text-embedding-3-small");
        assert_eq!(config.dimensions(), 1536);
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(OpenAiConfig::builder().with_api_key("").build().is_err());
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        let result = OpenAiConfig::builder()
            .with_api_key("sk-test")
            .with_base_url("localhost:8080")
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let result = OpenAiConfig::builder()
            .with_api_key("sk-test")
            .with_dimensions(0usize)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = OpenAiConfig::builder()
            .with_api_key("sk-test")
            .with_base_url("https://example.com/v1/")
            .build()
            .unwrap();
        assert_eq!(config.base_url(), "https://example.com/v1");
    }
}
