//! Embedding provider abstractions.
//!
//! This module defines the contract between the synchronization pipeline
//! and embedding providers: a batched request of texts goes out, one
//! vector per text comes back in the same order. Concrete providers live
//! in their own crates and implement [`EmbeddingProvider`].

mod request;
mod response;

pub use request::EmbeddingRequest;
pub use response::{EmbeddingData, EmbeddingResponse, EmbeddingUsage};

use crate::{Result, ServiceHealth};

/// Tracing target for embedding operations.
pub const TRACING_TARGET: &str = "vecsync_core::emb";

/// Type alias for a shared, dynamically dispatched embedding provider.
pub type BoxedEmbeddingProvider = Box<dyn EmbeddingProvider>;

/// Core trait for embedding provider implementations.
///
/// Implementations must uphold the batch contract: on success, exactly
/// one vector per input text, in input order. Failures are returned as
/// structured errors, never panics, so callers can surface them against
/// the destination fields of the batch.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Generates one embedding vector per input text.
    ///
    /// The response's data entries are positionally paired with the
    /// request's texts; providers must preserve input order.
    async fn generate_embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse>;

    /// Declares the vector length this provider produces for its
    /// configured model and options.
    ///
    /// Used for schema declaration by callers; the pipeline does not
    /// verify returned vectors against it at runtime.
    fn dimensions(&self) -> usize;

    /// Verifies that the provider is reachable and properly configured.
    async fn health_check(&self) -> Result<ServiceHealth>;
}
