//! Job-queue collaborator seam for the deferred strategy.

use vecsync_core::RecordRef;

/// Destination for deferred refresh jobs.
///
/// The message carries only the record's identity; the worker re-reads
/// the record when the job runs, so duplicate or late delivery is safe
/// (last write wins on the vector fields). Delivery semantics (retries,
/// backoff, at-least-once) belong to the implementing queue.
#[async_trait::async_trait]
pub trait JobSink: Send + Sync {
    /// Enqueues a refresh for the given record.
    async fn enqueue(&self, record: &RecordRef) -> vecsync_core::Result<()>;
}
