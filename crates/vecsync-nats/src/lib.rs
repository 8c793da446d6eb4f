#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for NATS client operations.
///
/// Use this target for logging client initialization, configuration, and client-level errors.
pub const TRACING_TARGET_CLIENT: &str = "vecsync_nats::client";

/// Tracing target for NATS connection operations.
///
/// Use this target for logging connection establishment, reconnection, and connection errors.
pub const TRACING_TARGET_CONNECTION: &str = "vecsync_nats::connection";

/// Tracing target for refresh queue operations.
///
/// Use this target for logging job submission, consumption, and queue-related errors.
pub const TRACING_TARGET_QUEUE: &str = "vecsync_nats::queue";

mod client;
mod error;
pub mod queue;

pub mod prelude;

// Re-export async_nats types needed by consumers
pub use async_nats::jetstream;
pub use client::{NatsClient, NatsConfig};
pub use error::{Error, Result};
