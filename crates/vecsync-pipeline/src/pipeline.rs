//! The gate → extract → adapter → pair sequence.

use std::collections::HashSet;

use vecsync_core::Record;
use vecsync_core::emb::EmbeddingRequest;

use crate::TRACING_TARGET_RUN;
use crate::config::ResourceConfig;
use crate::error::{Error, Result};
use crate::extract;

/// Computes fresh vectors for every field of `config` that needs
/// recomputation, returning ordered (destination, vector) pairs.
///
/// `changed` is the mutation's set of changed attributes; pass `None`
/// for a full recompute (manual and worker paths). `record` must be the
/// post-mutation pending view so same-mutation edits are reflected.
///
/// All texts go out in one batched provider call, so a mutation costs at
/// most one outbound request. A provider failure is returned as an
/// [`Error::Adapter`] naming every destination field of the batch.
pub async fn refresh_fields(
    config: &ResourceConfig,
    record: &Record,
    changed: Option<&HashSet<&str>>,
) -> Result<Vec<(String, Vec<f32>)>> {
    let planned = extract::plan(config.fields(), changed);
    if planned.is_empty() {
        tracing::debug!(
            target: TRACING_TARGET_RUN,
            resource = config.resource(),
            record_id = %record.id,
            "No vector fields need recomputation"
        );
        return Ok(Vec::new());
    }

    let pairs = extract::extract(record, &planned);
    let (destinations, texts): (Vec<String>, Vec<String>) = pairs.into_iter().unzip();

    let request = EmbeddingRequest::new(config.model().model()).with_texts(texts);
    let text_count = request.text_count();

    tracing::debug!(
        target: TRACING_TARGET_RUN,
        resource = config.resource(),
        record_id = %record.id,
        request_id = %request.request_id,
        model = config.model().model(),
        fields = ?destinations,
        "Generating embeddings"
    );

    let response = config
        .model()
        .provider()
        .generate_embeddings(&request)
        .await
        .map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET_RUN,
                resource = config.resource(),
                record_id = %record.id,
                request_id = %request.request_id,
                error = %e,
                "Embedding generation failed"
            );
            Error::adapter(destinations.clone(), e)
        })?;

    if response.embedding_count() != text_count {
        return Err(Error::shape_mismatch(text_count, response.embedding_count()));
    }

    tracing::debug!(
        target: TRACING_TARGET_RUN,
        resource = config.resource(),
        record_id = %record.id,
        request_id = %request.request_id,
        count = response.embedding_count(),
        dimensions = response.embedding_dimensions(),
        "Embeddings generated"
    );

    Ok(destinations
        .into_iter()
        .zip(response.into_vectors())
        .collect())
}
