//! Pipeline error types.

use vecsync_core::BoxedError;

/// Result type for pipeline operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised by the embedding synchronization pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A resource configuration is malformed. Raised at registry build
    /// time, never per mutation.
    #[error("invalid configuration: {reason}")]
    Configuration { reason: String },

    /// No configuration is registered for the given resource.
    #[error("unknown resource: {resource}")]
    UnknownResource { resource: String },

    /// The embedding provider call failed. Carries every destination
    /// field of the batch; none of them were written.
    #[error("embedding generation failed for [{}]: {message}", fields.join(", "))]
    Adapter {
        fields: Vec<String>,
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// The provider returned a different number of vectors than texts
    /// submitted. Fails fast, nothing is partially applied.
    #[error("vector count mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// The host record store failed to load or commit.
    #[error("record store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },

    /// Enqueueing a deferred refresh job failed.
    #[error("job enqueue failed: {message}")]
    Enqueue {
        message: String,
        #[source]
        source: Option<BoxedError>,
    },
}

impl Error {
    /// Creates a configuration error.
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration {
            reason: reason.into(),
        }
    }

    /// Creates an unknown resource error.
    pub fn unknown_resource(resource: impl Into<String>) -> Self {
        Self::UnknownResource {
            resource: resource.into(),
        }
    }

    /// Wraps a provider failure, tagging it with every destination field
    /// of the batched call.
    pub fn adapter(fields: Vec<String>, source: vecsync_core::Error) -> Self {
        Self::Adapter {
            fields,
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a shape mismatch error.
    pub fn shape_mismatch(expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch { expected, actual }
    }

    /// Wraps a record store failure.
    pub fn store(source: vecsync_core::Error) -> Self {
        Self::Store {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Wraps a job sink failure.
    pub fn enqueue(source: vecsync_core::Error) -> Self {
        Self::Enqueue {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Returns the destination fields affected by this error, if it is
    /// field-scoped.
    pub fn fields(&self) -> &[String] {
        match self {
            Self::Adapter { fields, .. } => fields,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_error_names_every_field() {
        let source = vecsync_core::Error::external_error().with_message("rate limited");
        let err = Error::adapter(
            vec!["vectorized_name".into(), "vectorized_bio".into()],
            source,
        );

        let rendered = err.to_string();
        assert!(rendered.contains("vectorized_name"));
        assert!(rendered.contains("vectorized_bio"));
        assert_eq!(err.fields().len(), 2);
    }

    #[test]
    fn shape_mismatch_is_not_field_scoped() {
        let err = Error::shape_mismatch(2, 1);
        assert!(err.fields().is_empty());
        assert!(err.to_string().contains("expected 2, got 1"));
    }
}
