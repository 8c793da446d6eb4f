//! Convenient re-exports for common use.

pub use crate::config::{EmbeddingModelRef, ResourceConfig, ResourceConfigBuilder, ResourceRegistry};
pub use crate::error::{Error, Result};
pub use crate::field::{FieldSource, TextBuilder, VectorField};
pub use crate::hook::MutationHook;
pub use crate::job::JobSink;
pub use crate::pipeline::refresh_fields;
pub use crate::refresh::Refresher;
pub use crate::store::RecordStore;
pub use crate::strategy::SyncStrategy;
pub use crate::write::apply_vectors;
