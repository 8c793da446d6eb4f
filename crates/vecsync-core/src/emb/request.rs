//! Request types for embedding operations.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A batched request for embedding generation.
///
/// One request carries every text that a single mutation needs embedded,
/// so each mutation costs at most one outbound provider call.
///
/// # Examples
///
/// ```rust
/// use vecsync_core::emb::EmbeddingRequest;
///
/// let request = EmbeddingRequest::new("text-embedding-3-small")
///     .with_text("Alice")
///     .with_text("Alice\nBio: loves music");
///
/// assert_eq!(request.text_count(), 2);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Unique identifier for this request.
    pub request_id: Uuid,

    /// The texts to generate embeddings for, in order.
    pub texts: Vec<String>,

    /// The model to use for embedding generation.
    pub model: String,

    /// The number of dimensions the resulting output embeddings should
    /// have. Only supported by some models.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<u32>,

    /// Additional parameters specific to the embedding provider.
    #[serde(flatten)]
    pub additional_params: HashMap<String, serde_json::Value>,
}

impl EmbeddingRequest {
    /// Maximum number of texts accepted in one batch.
    pub const MAX_BATCH_SIZE: usize = 2048;

    /// Maximum length of a single input text, in bytes.
    pub const MAX_TEXT_LEN: usize = 1_000_000;

    /// Creates a new embedding request for the specified model.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            texts: Vec::new(),
            model: model.into(),
            dimensions: None,
            additional_params: HashMap::new(),
        }
    }

    /// Sets the request ID.
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    /// Adds a single text to the batch.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.texts.push(text.into());
        self
    }

    /// Sets all texts for the batch.
    pub fn with_texts<I, S>(mut self, texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.texts = texts.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the number of dimensions for the output embeddings.
    pub fn with_dimensions(mut self, dimensions: u32) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Adds an additional provider-specific parameter.
    pub fn with_additional_param(
        mut self,
        key: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.additional_params.insert(key.into(), value);
        self
    }

    /// Returns the number of texts in this batch.
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Estimates the total size of all texts, for rate limiting.
    pub fn estimated_total_size(&self) -> usize {
        self.texts.iter().map(String::len).sum()
    }

    /// Validates the request parameters.
    pub fn validate(&self) -> Result<(), String> {
        if self.texts.is_empty() {
            return Err("Request must contain at least one text".to_string());
        }

        if self.model.is_empty() {
            return Err("Model must be specified".to_string());
        }

        if self.texts.len() > Self::MAX_BATCH_SIZE {
            return Err("Too many texts in batch request".to_string());
        }

        for (i, text) in self.texts.iter().enumerate() {
            if text.len() > Self::MAX_TEXT_LEN {
                return Err(format!("Text {} too long", i));
            }
        }

        Ok(())
    }
}
