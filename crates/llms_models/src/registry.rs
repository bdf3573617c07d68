//! Model provider registry.

use crate::error::CreateModelError;
use crate::llm::{Model, ModelProvider};
use std::collections::HashMap;
use std::sync::Arc;

/// Registry for model provider implementations.
///
/// # For Consumers
///
/// Access models using provider/model identifiers (e.g., `"openai/gpt-4o"`).
/// See [`model()`](Self::model) for details.
///
/// # For Provider Authors
///
/// Providers implement [`ModelProvider`] and are registered under a name once,
/// usually at application startup. The registry can then be shared read-only.
///
/// ```
/// # use llms_models::ModelRegistry;
/// # use llms_models::error::CreateModelError;
/// # use llms_models::llm::{FakeModel, Model, ModelProvider};
/// # use std::sync::Arc;
/// struct MyProvider;
///
/// impl ModelProvider for MyProvider {
///     fn create_model(&self, model: &str) -> Result<Arc<dyn Model>, CreateModelError> {
///         match model {
///             "tiny" => Ok(Arc::new(FakeModel::new(["hello"]))),
///             other => Err(CreateModelError::UnsupportedModel(other.to_string())),
///         }
///     }
/// }
///
/// let mut registry = ModelRegistry::new();
/// registry.register_provider("my_provider", Arc::new(MyProvider))?;
///
/// let model = registry.model("my_provider/tiny")?;
/// # Ok::<(), CreateModelError>(())
/// ```
#[derive(Default)]
pub struct ModelRegistry {
    // Maps provider names to implementations.
    providers: HashMap<String, Arc<dyn ModelProvider>>,
}

impl core::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("providers", &self.provider_names())
            .finish()
    }
}

impl ModelRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Resolves a model by identifier.
    ///
    /// # Arguments
    ///
    /// * `model_id` - Identifier in `"provider/model"` format (e.g., `"openai/gpt-4o"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the `model_id` structure is invalid, the provider is not
    /// registered, or the provider does not serve the model.
    pub fn model(&self, model_id: impl AsRef<str>) -> Result<Arc<dyn Model>, CreateModelError> {
        let model_id = model_id.as_ref();

        let (provider_name, model_name) = model_id
            .split_once('/')
            .filter(|(provider, model)| !provider.is_empty() && !model.is_empty())
            .ok_or_else(|| CreateModelError::InvalidModelId(model_id.to_string()))?;

        let provider = self
            .get_provider(provider_name)
            .ok_or_else(|| CreateModelError::UnknownProvider(provider_name.to_string()))?;

        provider.create_model(model_name)
    }

    /// Registers a provider.
    ///
    /// # Arguments
    ///
    /// * `name` - Provider name used in identifiers (e.g., `"openai"` for `"openai/gpt-4o"`)
    /// * `provider` - The provider implementation
    ///
    /// # Errors
    ///
    /// Returns [`CreateModelError::DuplicateProvider`] if a provider with the same
    /// name is already registered.
    pub fn register_provider<P: ModelProvider>(
        &mut self,
        name: impl Into<String>,
        provider: Arc<P>,
    ) -> Result<(), CreateModelError> {
        let name = name.into();
        if self.providers.contains_key(&name) {
            return Err(CreateModelError::DuplicateProvider(name));
        }

        tracing::debug!(provider = %name, "Registered model provider");
        self.providers.insert(name, provider as Arc<dyn ModelProvider>);
        Ok(())
    }

    /// Returns a provider by name.
    #[must_use]
    pub fn get_provider(&self, name: impl AsRef<str>) -> Option<Arc<dyn ModelProvider>> {
        self.providers.get(name.as_ref()).cloned()
    }

    /// Checks if a provider is registered.
    #[must_use]
    pub fn has_provider(&self, name: impl AsRef<str>) -> bool {
        self.providers.contains_key(name.as_ref())
    }

    /// Lists registered provider names, sorted.
    #[must_use]
    pub fn provider_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.providers.keys().cloned().collect();
        names.sort();
        names
    }
}
