//! Response types for embedding operations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response from an embedding generation request.
///
/// Entries in `data` are positionally paired with the texts of the
/// originating request; [`EmbeddingResponse::validate`] checks that the
/// indices are sequential and the dimensions consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// Unique identifier for this response, matching the request ID.
    pub request_id: Uuid,

    /// The embedding data for each input text, in input order.
    pub data: Vec<EmbeddingData>,

    /// The model used for generating embeddings.
    pub model: String,

    /// Usage statistics for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<EmbeddingUsage>,
}

/// Individual embedding for a single input text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingData {
    /// The embedding vector.
    pub embedding: Vec<f32>,

    /// The index of this embedding in the original request.
    pub index: usize,
}

/// Usage statistics for embedding generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingUsage {
    /// Number of tokens in the input(s).
    pub prompt_tokens: u32,

    /// Total number of tokens used.
    pub total_tokens: u32,
}

impl EmbeddingResponse {
    /// Creates a new embedding response.
    pub fn new(request_id: Uuid, data: Vec<EmbeddingData>, model: impl Into<String>) -> Self {
        Self {
            request_id,
            data,
            model: model.into(),
            usage: None,
        }
    }

    /// Sets the usage statistics.
    pub fn with_usage(mut self, usage: EmbeddingUsage) -> Self {
        self.usage = Some(usage);
        self
    }

    /// Returns the number of embeddings in this response.
    pub fn embedding_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the dimensionality of the embeddings.
    ///
    /// Returns `None` if the response is empty.
    pub fn embedding_dimensions(&self) -> Option<usize> {
        self.data.first().map(|data| data.embedding.len())
    }

    /// Returns true if all embeddings have the same dimensionality.
    pub fn has_consistent_dimensions(&self) -> bool {
        match self.embedding_dimensions() {
            Some(expected) => self.data.iter().all(|data| data.embedding.len() == expected),
            None => true,
        }
    }

    /// Consumes the response, returning the vectors in input order.
    pub fn into_vectors(self) -> Vec<Vec<f32>> {
        self.data.into_iter().map(|data| data.embedding).collect()
    }

    /// Validates the response structure.
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("Model must be specified in response".to_string());
        }

        if !self.has_consistent_dimensions() {
            return Err("All embeddings must have the same dimensionality".to_string());
        }

        for (expected_index, data) in self.data.iter().enumerate() {
            if data.index != expected_index {
                return Err(format!(
                    "Embedding index mismatch: expected {}, got {}",
                    expected_index, data.index
                ));
            }

            if data.embedding.is_empty() {
                return Err(format!("Embedding {} cannot be empty", expected_index));
            }
        }

        Ok(())
    }
}

impl EmbeddingData {
    /// Creates a new embedding data entry.
    pub fn new(embedding: Vec<f32>, index: usize) -> Self {
        Self { embedding, index }
    }

    /// Returns the dimensionality of this embedding.
    pub fn dimensions(&self) -> usize {
        self.embedding.len()
    }
}

impl EmbeddingUsage {
    /// Creates a new usage statistics entry.
    pub fn new(prompt_tokens: u32, total_tokens: u32) -> Self {
        Self {
            prompt_tokens,
            total_tokens,
        }
    }
}
