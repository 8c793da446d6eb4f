#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

/// Tracing target for OpenAI client operations.
pub const TRACING_TARGET_CLIENT: &str = "vecsync_openai::client";

mod client;
mod config;
mod provider;

pub mod prelude;

pub use client::OpenAiClient;
pub use config::{OpenAiConfig, OpenAiConfigBuilder};
