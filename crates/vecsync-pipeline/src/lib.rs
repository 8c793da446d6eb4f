#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for refresh runs (gate, extract, adapter call, write).
pub const TRACING_TARGET_RUN: &str = "vecsync_pipeline::run";

/// Tracing target for mutation hook dispatch.
pub const TRACING_TARGET_HOOK: &str = "vecsync_pipeline::hook";

/// Tracing target for manual and worker-driven refreshes.
pub const TRACING_TARGET_REFRESH: &str = "vecsync_pipeline::refresh";

mod config;
mod error;
mod extract;
mod field;
mod hook;
mod job;
mod pipeline;
mod refresh;
mod store;
mod strategy;
mod write;

pub mod prelude;

pub use config::{EmbeddingModelRef, ResourceConfig, ResourceConfigBuilder, ResourceRegistry};
pub use error::{Error, Result};
pub use field::{FieldSource, TextBuilder, VectorField};
pub use hook::MutationHook;
pub use job::JobSink;
pub use pipeline::refresh_fields;
pub use refresh::Refresher;
pub use store::RecordStore;
pub use strategy::SyncStrategy;
pub use write::apply_vectors;
