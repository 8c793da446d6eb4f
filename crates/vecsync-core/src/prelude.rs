//! Convenient re-exports for common use.

pub use crate::emb::{
    BoxedEmbeddingProvider, EmbeddingData, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
pub use crate::error::{BoxedError, Error, ErrorKind, Result};
pub use crate::health::{ServiceHealth, ServiceStatus};
pub use crate::record::{PendingMutation, Record, RecordRef};
