//! Mutation lifecycle hook.
//!
//! The host persistence layer calls [`MutationHook::before_commit`] with
//! the record's stored state and the pending mutation, and
//! [`MutationHook::after_commit`] once the mutation is durable. The hook
//! has no knowledge of the host's internals beyond that contract.

use std::sync::Arc;

use vecsync_core::{PendingMutation, Record};

use crate::TRACING_TARGET_HOOK;
use crate::config::ResourceRegistry;
use crate::error::{Error, Result};
use crate::job::JobSink;
use crate::pipeline::refresh_fields;
use crate::write::apply_vectors;

/// Pre-/post-commit extension point dispatching on each resource's
/// synchronization strategy.
#[derive(Clone)]
pub struct MutationHook {
    registry: Arc<ResourceRegistry>,
    sink: Option<Arc<dyn JobSink>>,
}

impl MutationHook {
    /// Creates a hook over the given registry.
    pub fn new(registry: Arc<ResourceRegistry>) -> Self {
        Self {
            registry,
            sink: None,
        }
    }

    /// Attaches the job sink used by resources with the deferred
    /// strategy.
    pub fn with_job_sink(mut self, sink: Arc<dyn JobSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Runs immediately before the mutation's storage commit, within the
    /// same transactional boundary.
    ///
    /// For inline resources this runs the full refresh sequence and
    /// returns the mutation augmented with fresh vectors; an adapter
    /// failure is returned so the host aborts the mutation. For deferred
    /// and manual resources (and unregistered ones) the mutation passes
    /// through untouched.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_HOOK, fields(resource = %record.resource, record_id = %record.id))]
    pub async fn before_commit(
        &self,
        record: &Record,
        mut mutation: PendingMutation,
    ) -> Result<PendingMutation> {
        let Some(config) = self.registry.get(&record.resource) else {
            return Ok(mutation);
        };

        if !config.strategy().is_inline() {
            return Ok(mutation);
        }

        let changed = mutation.changed_attrs();
        let pending_view = mutation.apply_to(record);
        let pairs = refresh_fields(config, &pending_view, Some(&changed)).await?;
        if pairs.is_empty() {
            return Ok(mutation);
        }

        let (destinations, vectors): (Vec<String>, Vec<Vec<f32>>) = pairs.into_iter().unzip();
        apply_vectors(&mut mutation, &destinations, vectors)?;

        tracing::debug!(
            target: TRACING_TARGET_HOOK,
            fields = ?destinations,
            "Mutation augmented with fresh vectors"
        );
        Ok(mutation)
    }

    /// Runs immediately after the mutation's storage commit.
    ///
    /// For deferred resources this enqueues a refresh job carrying the
    /// record's identity, provided at least one vector field's gate
    /// passes for the committed change-set. A no-op for inline and
    /// manual resources. The original mutation is already committed and
    /// unaffected by any failure here.
    #[tracing::instrument(skip_all, target = TRACING_TARGET_HOOK, fields(resource = %record.resource, record_id = %record.id))]
    pub async fn after_commit(
        &self,
        record: &Record,
        mutation: &PendingMutation,
    ) -> Result<()> {
        let Some(config) = self.registry.get(&record.resource) else {
            return Ok(());
        };

        if !config.strategy().is_deferred() {
            return Ok(());
        }

        let changed = mutation.changed_attrs();
        if !config
            .fields()
            .iter()
            .any(|field| field.should_refresh(&changed))
        {
            return Ok(());
        }

        let sink = self.sink.as_ref().ok_or_else(|| {
            Error::configuration(format!(
                "resource '{}' uses the deferred strategy but no job sink is attached",
                record.resource
            ))
        })?;

        let record_ref = record.record_ref();
        sink.enqueue(&record_ref).await.map_err(Error::enqueue)?;

        tracing::debug!(
            target: TRACING_TARGET_HOOK,
            "Enqueued deferred vector refresh"
        );
        Ok(())
    }
}
