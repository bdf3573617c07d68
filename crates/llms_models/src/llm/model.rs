//! The [`Model`] trait implemented by model adapters.

use super::error::{CompletionError, GenerationError};
use super::generate::generate_from_single_prompt;
use super::options::CallOptions;
use super::types::{ContentResponse, MessageContent};
use crate::context::Context;
use async_trait::async_trait;

/// A multi-modal language model.
///
/// Adapters for concrete providers (HTTP clients, local inference servers,
/// test doubles) implement this trait. Implementations must be safe for
/// concurrent use; callers share them as `Arc<dyn Model>`.
#[async_trait]
pub trait Model: Send + Sync + 'static {
    /// Generates content from a sequence of messages.
    ///
    /// This is the most general entry point for chat-like interactions. The
    /// returned response is expected to hold at least one choice, but that is
    /// not enforced here.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Cancellation and deadline of the call
    /// * `messages` - The conversation, in order; must not be empty
    /// * `options` - Provider-interpreted generation options
    ///
    /// # Errors
    ///
    /// Returns whatever [`GenerationError`] the adapter reports.
    async fn generate_content(
        &self,
        ctx: &Context,
        messages: &[MessageContent],
        options: &CallOptions,
    ) -> Result<ContentResponse, GenerationError>;

    /// Generates a single string response from a single string prompt.
    ///
    /// Equivalent to [`generate_from_single_prompt`], which it delegates to.
    ///
    /// # Errors
    ///
    /// See [`generate_from_single_prompt`].
    #[deprecated(note = "use `generate_content` or `generate_from_single_prompt` instead")]
    async fn call(
        &self,
        ctx: &Context,
        prompt: &str,
        options: &CallOptions,
    ) -> Result<String, CompletionError> {
        generate_from_single_prompt(self, ctx, prompt, options).await
    }
}
