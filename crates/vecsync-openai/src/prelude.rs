//! Commonly used types and traits.
//!
//! ```rust
//! use vecsync_openai::prelude::*;
//! ```

pub use vecsync_core::emb::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};

pub use crate::{OpenAiClient, OpenAiConfig, OpenAiConfigBuilder};
