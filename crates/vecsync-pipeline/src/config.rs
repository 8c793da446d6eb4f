//! Resource configuration and the immutable registry.
//!
//! All configuration is resolved once at process start: vector field
//! declarations, the embedding model reference, and the synchronization
//! strategy are bundled per resource and validated up front, so the hot
//! path never performs name lookups or revalidation.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use vecsync_core::emb::EmbeddingProvider;

use crate::error::{Error, Result};
use crate::field::VectorField;
use crate::strategy::SyncStrategy;

/// A resolved reference to an embedding provider: the provider handle,
/// the model it is configured for, and the vector length it declares.
///
/// The declared dimensions are informational (schema declaration); the
/// pipeline does not verify returned vectors against them.
#[derive(Clone)]
pub struct EmbeddingModelRef {
    provider: Arc<dyn EmbeddingProvider>,
    model: String,
    dimensions: usize,
}

impl EmbeddingModelRef {
    /// Creates a model reference, capturing the provider's declared
    /// dimensions.
    pub fn new(provider: Arc<dyn EmbeddingProvider>, model: impl Into<String>) -> Self {
        let dimensions = provider.dimensions();
        Self {
            provider,
            model: model.into(),
            dimensions,
        }
    }

    /// Returns the provider handle.
    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Returns the configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the declared vector length.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }
}

impl fmt::Debug for EmbeddingModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbeddingModelRef")
            .field("model", &self.model)
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

/// Per-resource pipeline configuration: vector fields, embedding model,
/// and synchronization strategy. Immutable once built.
#[derive(Debug, Clone)]
pub struct ResourceConfig {
    resource: String,
    fields: Vec<VectorField>,
    model: EmbeddingModelRef,
    strategy: SyncStrategy,
}

impl ResourceConfig {
    /// Starts building a configuration for the named resource.
    pub fn builder(resource: impl Into<String>) -> ResourceConfigBuilder {
        ResourceConfigBuilder {
            resource: resource.into(),
            fields: Vec::new(),
            model: None,
            strategy: SyncStrategy::default(),
        }
    }

    /// Returns the resource name.
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Returns the vector field declarations, in declaration order.
    pub fn fields(&self) -> &[VectorField] {
        &self.fields
    }

    /// Returns the embedding model reference.
    pub fn model(&self) -> &EmbeddingModelRef {
        &self.model
    }

    /// Returns the active synchronization strategy.
    pub fn strategy(&self) -> SyncStrategy {
        self.strategy
    }
}

/// Builder for [`ResourceConfig`] with setup-time validation.
#[derive(Debug)]
pub struct ResourceConfigBuilder {
    resource: String,
    fields: Vec<VectorField>,
    model: Option<EmbeddingModelRef>,
    strategy: SyncStrategy,
}

impl ResourceConfigBuilder {
    /// Adds a vector field declaration.
    pub fn with_field(mut self, field: VectorField) -> Self {
        self.fields.push(field);
        self
    }

    /// Sets the embedding model reference.
    pub fn with_model(mut self, model: EmbeddingModelRef) -> Self {
        self.model = Some(model);
        self
    }

    /// Sets the synchronization strategy.
    pub fn with_strategy(mut self, strategy: SyncStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Validates and builds the configuration.
    ///
    /// Fails on an empty resource name, a missing model, no declared
    /// fields, or duplicate destination attributes.
    pub fn build(self) -> Result<ResourceConfig> {
        if self.resource.is_empty() {
            return Err(Error::configuration("resource name must not be empty"));
        }

        if self.fields.is_empty() {
            return Err(Error::configuration(format!(
                "resource '{}' declares no vector fields",
                self.resource
            )));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.destination().is_empty() {
                return Err(Error::configuration(format!(
                    "resource '{}' declares a vector field with an empty destination",
                    self.resource
                )));
            }
            if !seen.insert(field.destination()) {
                return Err(Error::configuration(format!(
                    "resource '{}' declares duplicate destination '{}'",
                    self.resource,
                    field.destination()
                )));
            }
        }

        let model = self.model.ok_or_else(|| {
            Error::configuration(format!(
                "resource '{}' has no embedding model configured",
                self.resource
            ))
        })?;

        Ok(ResourceConfig {
            resource: self.resource,
            fields: self.fields,
            model,
            strategy: self.strategy,
        })
    }
}

/// Immutable map from resource name to its pipeline configuration,
/// resolved once at process start.
#[derive(Debug, Default, Clone)]
pub struct ResourceRegistry {
    resources: HashMap<String, Arc<ResourceConfig>>,
}

impl ResourceRegistry {
    /// Builds a registry from resolved configurations.
    ///
    /// Fails if two configurations claim the same resource name.
    pub fn new<I>(configs: I) -> Result<Self>
    where
        I: IntoIterator<Item = ResourceConfig>,
    {
        let mut resources = HashMap::new();
        for config in configs {
            let name = config.resource().to_string();
            if resources.insert(name.clone(), Arc::new(config)).is_some() {
                return Err(Error::configuration(format!(
                    "duplicate configuration for resource '{}'",
                    name
                )));
            }
        }
        Ok(Self { resources })
    }

    /// Returns the configuration for a resource, if registered.
    pub fn get(&self, resource: &str) -> Option<&Arc<ResourceConfig>> {
        self.resources.get(resource)
    }

    /// Returns the configuration for a resource, or an error naming it.
    pub fn require(&self, resource: &str) -> Result<&Arc<ResourceConfig>> {
        self.get(resource)
            .ok_or_else(|| Error::unknown_resource(resource))
    }

    /// Returns the number of registered resources.
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Returns true if no resources are registered.
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Iterates over the registered configurations.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ResourceConfig>> {
        self.resources.values()
    }
}

#[cfg(test)]
mod tests {
    use vecsync_core::mock::MockProvider;

    use super::*;

    fn model() -> EmbeddingModelRef {
        EmbeddingModelRef::new(Arc::new(MockProvider::with_dimensions(2)), "mock-model")
    }

    #[test]
    fn build_requires_a_model() {
        let err = ResourceConfig::builder("user")
            .with_field(VectorField::from_attribute("name", "vectorized_name"))
            .build()
            .unwrap_err();

        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn build_requires_fields() {
        let err = ResourceConfig::builder("user")
            .with_model(model())
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("no vector fields"));
    }

    #[test]
    fn build_rejects_duplicate_destinations() {
        let err = ResourceConfig::builder("user")
            .with_model(model())
            .with_field(VectorField::from_attribute("name", "vectorized_name"))
            .with_field(VectorField::from_attribute("alias", "vectorized_name"))
            .build()
            .unwrap_err();

        assert!(err.to_string().contains("duplicate destination"));
    }

    #[test]
    fn model_ref_captures_declared_dimensions() {
        assert_eq!(model().dimensions(), 2);
    }

    #[test]
    fn registry_rejects_duplicate_resources() {
        let make = || {
            ResourceConfig::builder("user")
                .with_model(model())
                .with_field(VectorField::from_attribute("name", "vectorized_name"))
                .build()
                .unwrap()
        };

        let err = ResourceRegistry::new([make(), make()]).unwrap_err();
        assert!(err.to_string().contains("duplicate configuration"));
    }

    #[test]
    fn registry_lookup() {
        let config = ResourceConfig::builder("user")
            .with_model(model())
            .with_field(VectorField::from_attribute("name", "vectorized_name"))
            .build()
            .unwrap();

        let registry = ResourceRegistry::new([config]).unwrap();
        assert!(registry.get("user").is_some());
        assert!(matches!(
            registry.require("post").unwrap_err(),
            Error::UnknownResource { .. }
        ));
    }
}
