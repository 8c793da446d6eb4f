//! Host persistence collaborator seam.

use vecsync_core::{PendingMutation, Record, RecordRef};

/// Read/commit access to the host persistence layer, used by the manual
/// and worker-driven refresh paths.
///
/// The pipeline never touches stored state directly: it loads a record
/// through this trait, computes vectors, and hands back a follow-up
/// mutation for the store to commit.
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Loads the current state of a record.
    async fn load(&self, record: &RecordRef) -> vecsync_core::Result<Record>;

    /// Commits a follow-up mutation against a record.
    async fn commit(&self, record: &RecordRef, mutation: PendingMutation)
    -> vecsync_core::Result<()>;
}
