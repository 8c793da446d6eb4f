//! End-to-end pipeline behavior through the mutation hook.

use std::sync::{Arc, Mutex};

use serde_json::json;
use uuid::Uuid;
use vecsync_core::emb::{
    EmbeddingData, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};
use vecsync_core::mock::MockProvider;
use vecsync_core::{PendingMutation, Record, Result as CoreResult, ServiceHealth};
use vecsync_pipeline::{
    EmbeddingModelRef, MutationHook, ResourceConfig, ResourceRegistry, SyncStrategy, VectorField,
};

/// Provider that replays scripted vectors and records the texts it saw.
struct ScriptedProvider {
    vectors: Vec<Vec<f32>>,
    seen: Mutex<Vec<Vec<String>>>,
}

impl ScriptedProvider {
    fn new(vectors: Vec<Vec<f32>>) -> Self {
        Self {
            vectors,
            seen: Mutex::new(Vec::new()),
        }
    }

    fn seen_batches(&self) -> Vec<Vec<String>> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for ScriptedProvider {
    async fn generate_embeddings(&self, request: &EmbeddingRequest) -> CoreResult<EmbeddingResponse> {
        self.seen.lock().unwrap().push(request.texts.clone());
        let data = self
            .vectors
            .iter()
            .take(request.text_count())
            .cloned()
            .enumerate()
            .map(|(index, embedding)| EmbeddingData::new(embedding, index))
            .collect();
        Ok(EmbeddingResponse::new(
            request.request_id,
            data,
            request.model.clone(),
        ))
    }

    fn dimensions(&self) -> usize {
        self.vectors.first().map(Vec::len).unwrap_or_default()
    }

    async fn health_check(&self) -> CoreResult<ServiceHealth> {
        Ok(ServiceHealth::healthy())
    }
}

fn user_config(provider: Arc<dyn EmbeddingProvider>, strategy: SyncStrategy) -> ResourceConfig {
    ResourceConfig::builder("user")
        .with_model(EmbeddingModelRef::new(provider, "mock-model"))
        .with_strategy(strategy)
        .with_field(VectorField::from_attribute("name", "vectorized_name"))
        .with_field(VectorField::synthesized(
            "vectorized_bio",
            ["name", "biography"],
            |record| {
                format!(
                    "{}\nBio: {}",
                    record.text_attr("name").unwrap_or_default(),
                    record.text_attr("biography").unwrap_or_default()
                )
            },
        ))
        .build()
        .unwrap()
}

fn inline_hook(provider: Arc<dyn EmbeddingProvider>) -> MutationHook {
    let registry = ResourceRegistry::new([user_config(provider, SyncStrategy::Inline)]).unwrap();
    MutationHook::new(Arc::new(registry))
}

fn alice() -> Record {
    Record::new("user", Uuid::new_v4())
        .with_attr("name", "Alice")
        .with_attr("biography", "loves music")
        .with_attr("age", 32)
}

#[tokio::test]
async fn scripted_vectors_land_on_matching_fields() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        vec![0.1, 0.2],
        vec![0.3, 0.4],
    ]));
    let hook = inline_hook(provider.clone());

    let mutation = PendingMutation::new()
        .with("name", "Alice")
        .with("biography", "loves music");
    let augmented = hook.before_commit(&alice(), mutation).await.unwrap();

    assert_eq!(augmented.get("vectorized_name"), Some(&json!([0.1, 0.2])));
    assert_eq!(augmented.get("vectorized_bio"), Some(&json!([0.3, 0.4])));

    // The batch went out as one call, texts in declaration order.
    let batches = provider.seen_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], ["Alice", "Alice\nBio: loves music"]);
}

#[tokio::test]
async fn unrelated_change_skips_triggered_fields_only() {
    let provider = Arc::new(ScriptedProvider::new(vec![vec![0.5, 0.6]]));
    let hook = inline_hook(provider.clone());

    let mutation = PendingMutation::new().with("age", 33);
    let augmented = hook.before_commit(&alice(), mutation).await.unwrap();

    // No trigger list on the direct field: always recomputed. The bio
    // field is triggered only by name/biography and stays untouched.
    assert_eq!(augmented.get("vectorized_name"), Some(&json!([0.5, 0.6])));
    assert!(augmented.get("vectorized_bio").is_none());

    let batches = provider.seen_batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], ["Alice"]);
}

#[tokio::test]
async fn failed_batch_rejects_mutation_naming_both_fields() {
    let provider = Arc::new(MockProvider::failing("rate limited"));
    let hook = inline_hook(provider);

    let mutation = PendingMutation::new().with("name", "Bob");
    let err = hook.before_commit(&alice(), mutation).await.unwrap_err();

    let mut fields = err.fields().to_vec();
    fields.sort();
    assert_eq!(fields, ["vectorized_bio", "vectorized_name"]);
}

#[tokio::test]
async fn strategy_changes_when_not_what() {
    // Same record, same change-set: the inline run's computed vectors
    // must equal what a deferred worker would compute later.
    let provider = Arc::new(MockProvider::with_dimensions(4));
    let record = alice();
    let mutation = PendingMutation::new().with("name", "Bob");

    let inline_registry = ResourceRegistry::new([user_config(
        provider.clone(),
        SyncStrategy::Inline,
    )])
    .unwrap();
    let inline = MutationHook::new(Arc::new(inline_registry))
        .before_commit(&record, mutation.clone())
        .await
        .unwrap();

    let deferred_config = user_config(provider, SyncStrategy::Deferred);
    let changed = mutation.changed_attrs();
    let pending_view = mutation.apply_to(&record);
    let pairs = vecsync_pipeline::refresh_fields(&deferred_config, &pending_view, Some(&changed))
        .await
        .unwrap();

    for (destination, vector) in pairs {
        assert_eq!(inline.get(&destination), Some(&json!(vector)));
    }
}
