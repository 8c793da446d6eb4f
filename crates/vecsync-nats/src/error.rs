//! Error types and utilities for NATS operations.

use std::time::Duration;

/// Result type for all NATS operations in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Unified error type for NATS operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// NATS client/connection errors
    #[error("NATS connection error: {0}")]
    Connection(#[from] async_nats::Error),

    /// Serialization errors when sending or receiving messages
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Operation timeout
    #[error("Operation timed out after {timeout:?}")]
    Timeout { timeout: Duration },

    /// Message delivery failed
    #[error("Message delivery failed to subject '{subject}': {reason}")]
    DeliveryFailed { subject: String, reason: String },

    /// Stream operation failed
    #[error("Stream operation failed on '{stream}': {error}")]
    StreamError { stream: String, error: String },

    /// Consumer operation failed
    #[error("Consumer '{consumer}' error: {reason}")]
    ConsumerError { consumer: String, reason: String },

    /// Generic operation error with context
    #[error("NATS operation failed: {operation} - {details}")]
    Operation { operation: String, details: String },
}

impl Error {
    /// Create a delivery failed error
    pub fn delivery_failed(subject: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DeliveryFailed {
            subject: subject.into(),
            reason: reason.into(),
        }
    }

    /// Create a stream error
    pub fn stream_error(stream: impl Into<String>, error: impl Into<String>) -> Self {
        Self::StreamError {
            stream: stream.into(),
            error: error.into(),
        }
    }

    /// Create a consumer error
    pub fn consumer_error(consumer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConsumerError {
            consumer: consumer.into(),
            reason: reason.into(),
        }
    }

    /// Create a generic operation error
    pub fn operation(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Operation {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Converts this error into the shared structured error type, so
    /// queue failures can cross the pipeline's collaborator seams.
    pub fn into_core(self) -> vecsync_core::Error {
        let kind = match &self {
            Self::Timeout { .. } => vecsync_core::ErrorKind::Timeout,
            Self::Serialization(_) => vecsync_core::ErrorKind::Serialization,
            _ => vecsync_core::ErrorKind::ServiceUnavailable,
        };
        vecsync_core::Error::new(kind).with_message(self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_maps_to_core_timeout() {
        let err = Error::Timeout {
            timeout: Duration::from_secs(5),
        };
        assert_eq!(err.into_core().kind(), vecsync_core::ErrorKind::Timeout);
    }

    #[test]
    fn delivery_failure_maps_to_service_unavailable() {
        let err = Error::delivery_failed("vecrefresh.default", "no responders");
        let core = err.into_core();
        assert_eq!(core.kind(), vecsync_core::ErrorKind::ServiceUnavailable);
        assert!(core.to_string().contains("vecrefresh.default"));
    }
}
