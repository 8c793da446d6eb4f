//! [`EmbeddingProvider`] implementation for [`OpenAiClient`].

use jiff::Timestamp;
use vecsync_core::emb::{
    EmbeddingData, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use vecsync_core::{Error, Result, ServiceHealth};

use crate::client::{OpenAiClient, WireRequest};
use crate::TRACING_TARGET_CLIENT;

#[async_trait::async_trait]
impl EmbeddingProvider for OpenAiClient {
    #[tracing::instrument(
        skip(self, request),
        target = TRACING_TARGET_CLIENT,
        fields(request_id = %request.request_id, texts = request.text_count())
    )]
    async fn generate_embeddings(&self, request: &EmbeddingRequest) -> Result<EmbeddingResponse> {
        request
            .validate()
            .map_err(|reason| Error::invalid_input().with_message(reason))?;

        let model = if request.model.is_empty() {
            self.config().model()
        } else {
            &request.model
        };

        let wire = WireRequest {
            model,
            input: &request.texts,
            dimensions: request.dimensions,
        };

        let started = Timestamp::now();
        let response = self.post_embeddings(&wire).await.inspect_err(|error| {
            tracing::error!(
                target: TRACING_TARGET_CLIENT,
                error = %error,
                "Embedding request failed"
            );
        })?;
        let elapsed = started.duration_until(Timestamp::now());

        tracing::debug!(
            target: TRACING_TARGET_CLIENT,
            model = response.model,
            embeddings = response.data.len(),
            elapsed = %elapsed,
            "Embedding request completed"
        );

        // The API may return entries out of order; restore input order
        // before positional pairing downstream.
        let mut data = response.data;
        data.sort_by_key(|entry| entry.index);

        let data = data
            .into_iter()
            .map(|entry| EmbeddingData::new(entry.embedding, entry.index))
            .collect();

        let mut result = EmbeddingResponse::new(request.request_id, data, response.model);
        if let Some(usage) = response.usage {
            result = result.with_usage(EmbeddingUsage::new(usage.prompt_tokens, usage.total_tokens));
        }

        result
            .validate()
            .map_err(|reason| Error::external_error().with_message(reason))?;

        if result.embedding_count() != request.text_count() {
            return Err(Error::external_error().with_message(format!(
                "expected {} embeddings, got {}",
                request.text_count(),
                result.embedding_count()
            )));
        }

        Ok(result)
    }

    fn dimensions(&self) -> usize {
        self.config().dimensions()
    }

    async fn health_check(&self) -> Result<ServiceHealth> {
        let started = Timestamp::now();
        match self.probe().await {
            Ok(()) => {
                let elapsed = started
                    .duration_until(Timestamp::now())
                    .unsigned_abs();
                Ok(ServiceHealth::healthy().with_response_time(elapsed))
            }
            Err(error) => Ok(ServiceHealth::unhealthy(error.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use vecsync_core::ErrorKind;

    use super::*;
    use crate::OpenAiConfig;

    fn client() -> OpenAiClient {
        let config = OpenAiConfig::builder()
            .with_api_key("sk-test")
            .with_dimensions(256usize)
            .build()
            .unwrap();
        OpenAiClient::new(config).unwrap()
    }

    #[test]
    fn declared_dimensions_come_from_config() {
        assert_eq!(client().dimensions(), 256);
    }

    #[tokio::test]
    async fn empty_request_is_rejected_before_any_call() {
        let request = EmbeddingRequest::new("text-embedding-3-small");
        let error = client().generate_embeddings(&request).await.unwrap_err();
        assert_eq!(error.kind(), ErrorKind::InvalidInput);
    }
}
