//! Manual and worker-driven refresh.

use std::sync::Arc;

use vecsync_core::{PendingMutation, RecordRef};

use crate::TRACING_TARGET_REFRESH;
use crate::config::ResourceRegistry;
use crate::error::{Error, Result};
use crate::pipeline::refresh_fields;
use crate::store::RecordStore;
use crate::write::apply_vectors;

/// Recomputes vector fields against already-persisted records and
/// commits the results as follow-up mutations.
///
/// This is the entry point for both the manual strategy (invoked
/// directly by the caller, e.g. for backfills) and the deferred
/// strategy's worker (invoked with the identity carried by a job). Every
/// run re-reads the record, recomputes all declared fields with no
/// change filter, and commits — so repeated runs on an unchanged record
/// are idempotent, and concurrent runs degrade to last write wins.
#[derive(Clone)]
pub struct Refresher {
    registry: Arc<ResourceRegistry>,
    store: Arc<dyn RecordStore>,
}

impl Refresher {
    /// Creates a refresher over the given registry and record store.
    pub fn new(registry: Arc<ResourceRegistry>, store: Arc<dyn RecordStore>) -> Self {
        Self { registry, store }
    }

    /// Recomputes and commits all vector fields for one record.
    #[tracing::instrument(skip(self), target = TRACING_TARGET_REFRESH)]
    pub async fn refresh_record(&self, record_ref: &RecordRef) -> Result<()> {
        let config = self.registry.require(&record_ref.resource)?;
        let record = self.store.load(record_ref).await.map_err(Error::store)?;

        let pairs = refresh_fields(config, &record, None).await?;
        if pairs.is_empty() {
            return Ok(());
        }

        let (destinations, vectors): (Vec<String>, Vec<Vec<f32>>) = pairs.into_iter().unzip();
        let mut mutation = PendingMutation::new();
        apply_vectors(&mut mutation, &destinations, vectors)?;

        self.store
            .commit(record_ref, mutation)
            .await
            .map_err(Error::store)?;

        tracing::debug!(
            target: TRACING_TARGET_REFRESH,
            record = %record_ref,
            fields = ?destinations,
            "Committed refreshed vectors"
        );
        Ok(())
    }

    /// Recomputes and commits vector fields for a collection of records.
    ///
    /// Stops at the first failure; records already refreshed stay
    /// committed. Returns the number of records refreshed.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_REFRESH, fields(count = records.len()))]
    pub async fn refresh_many(&self, records: &[RecordRef]) -> Result<usize> {
        for (done, record_ref) in records.iter().enumerate() {
            if let Err(e) = self.refresh_record(record_ref).await {
                tracing::warn!(
                    target: TRACING_TARGET_REFRESH,
                    record = %record_ref,
                    refreshed = done,
                    error = %e,
                    "Bulk refresh aborted"
                );
                return Err(e);
            }
        }
        Ok(records.len())
    }
}
