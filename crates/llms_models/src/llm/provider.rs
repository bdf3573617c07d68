//! The [`ModelProvider`] trait for model provider backends.

use super::model::Model;
use crate::error::CreateModelError;
use std::sync::Arc;

/// Trait implemented by provider backends that hand out [`Model`]s by name.
///
/// Providers are registered with a [`ModelRegistry`](crate::ModelRegistry)
/// so consumers can resolve `"provider/model"` identifiers at runtime.
pub trait ModelProvider: Send + Sync + 'static {
    /// Creates a handle to the named model.
    ///
    /// # Arguments
    ///
    /// * `model` - The model name, without the provider prefix
    ///
    /// # Errors
    ///
    /// Returns [`CreateModelError::UnsupportedModel`] if the provider does not
    /// serve `model`.
    fn create_model(&self, model: &str) -> Result<Arc<dyn Model>, CreateModelError>;
}
