//! Scripted in-memory model for tests and offline development.

use super::error::GenerationError;
use super::model::Model;
use super::options::CallOptions;
use super::provider::ModelProvider;
use super::types::{ContentResponse, MessageContent};
use crate::context::Context;
use crate::error::CreateModelError;
use async_trait::async_trait;
use core::time::Duration;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// One scripted outcome of a [`FakeModel`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum FakeReply {
    /// Return this response.
    Response(ContentResponse),
    /// Fail with [`GenerationError::Provider`] carrying this message.
    Error(String),
}

impl FakeReply {
    /// Creates a reply that fails with the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error(message.into())
    }
}

impl From<&str> for FakeReply {
    fn from(text: &str) -> Self {
        Self::Response(ContentResponse::from_text(text))
    }
}

impl From<String> for FakeReply {
    fn from(text: String) -> Self {
        Self::Response(ContentResponse::from_text(text))
    }
}

impl From<ContentResponse> for FakeReply {
    fn from(response: ContentResponse) -> Self {
        Self::Response(response)
    }
}

/// A call received by a [`FakeModel`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// The messages passed to the model.
    pub messages: Vec<MessageContent>,
    /// The options passed to the model.
    pub options: CallOptions,
}

#[derive(Debug, Default)]
struct FakeState {
    replies: Vec<FakeReply>,
    cursor: usize,
    calls: Vec<RecordedCall>,
}

/// A [`Model`] that answers from a fixed script.
///
/// Replies are handed out in order and wrap around once exhausted. A reply is
/// only consumed by a call that completes; a call cut short by its [`Context`]
/// during the configured latency leaves the script where it was.
///
/// Every call that reaches the model is recorded and can be inspected with
/// [`calls`](Self::calls). The log is never truncated on its own; long-running
/// users should call [`reset`](Self::reset) periodically.
#[derive(Debug, Default)]
pub struct FakeModel {
    state: Mutex<FakeState>,
    latency: Option<Duration>,
}

impl FakeModel {
    /// Creates a fake model that answers with `replies` in order.
    pub fn new<I, R>(replies: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<FakeReply>,
    {
        Self {
            state: Mutex::new(FakeState {
                replies: replies.into_iter().map(Into::into).collect(),
                ..FakeState::default()
            }),
            latency: None,
        }
    }

    /// Delays every answer by `latency`, honoring the call's [`Context`].
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Appends a reply to the end of the script.
    pub fn add_reply(&self, reply: impl Into<FakeReply>) {
        self.state.lock().replies.push(reply.into());
    }

    /// Rewinds the script to its first reply and forgets recorded calls.
    pub fn reset(&self) {
        let mut state = self.state.lock();
        state.cursor = 0;
        state.calls.clear();
    }

    /// Returns the calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    /// Returns the number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    fn record_call(&self, messages: &[MessageContent], options: &CallOptions) {
        self.state.lock().calls.push(RecordedCall {
            messages: messages.to_vec(),
            options: options.clone(),
        });
    }

    fn next_reply(&self) -> Option<FakeReply> {
        let mut state = self.state.lock();
        if state.replies.is_empty() {
            return None;
        }
        let index = state.cursor % state.replies.len();
        state.cursor = index + 1;
        Some(state.replies[index].clone())
    }
}

#[async_trait]
impl Model for FakeModel {
    async fn generate_content(
        &self,
        ctx: &Context,
        messages: &[MessageContent],
        options: &CallOptions,
    ) -> Result<ContentResponse, GenerationError> {
        if let Some(err) = ctx.err() {
            return Err(err);
        }
        if messages.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "at least one message is required".to_string(),
            ));
        }

        self.record_call(messages, options);

        if let Some(latency) = self.latency {
            ctx.run(tokio::time::sleep(latency)).await?;
        }

        match self.next_reply() {
            Some(FakeReply::Response(response)) => Ok(response),
            Some(FakeReply::Error(message)) => Err(GenerationError::provider(message)),
            None => Err(GenerationError::InvalidRequest(
                "fake model has no replies configured".to_string(),
            )),
        }
    }
}

/// A [`ModelProvider`] serving named [`FakeModel`]s.
///
/// # Example
///
/// ```
/// use llms_models::ModelRegistry;
/// use llms_models::llm::{FakeModel, FakeProvider};
/// use std::sync::Arc;
///
/// let provider = FakeProvider::new().with_model("echo", FakeModel::new(["hi"]));
///
/// let mut registry = ModelRegistry::new();
/// registry.register_provider("fake", Arc::new(provider)).unwrap();
///
/// assert!(registry.model("fake/echo").is_ok());
/// assert!(registry.model("fake/missing").is_err());
/// ```
#[derive(Debug, Default)]
pub struct FakeProvider {
    models: HashMap<String, Arc<FakeModel>>,
}

impl FakeProvider {
    /// Creates a provider with no models.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a model under `name`.
    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, model: FakeModel) -> Self {
        self.models.insert(name.into(), Arc::new(model));
        self
    }

    /// Returns the fake registered under `name`, for inspecting its calls.
    #[must_use]
    pub fn fake(&self, name: &str) -> Option<Arc<FakeModel>> {
        self.models.get(name).cloned()
    }
}

impl ModelProvider for FakeProvider {
    fn create_model(&self, model: &str) -> Result<Arc<dyn Model>, CreateModelError> {
        self.models
            .get(model)
            .map(|fake| Arc::clone(fake) as Arc<dyn Model>)
            .ok_or_else(|| CreateModelError::UnsupportedModel(model.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::ContentChoice;

    fn prompt(text: &str) -> Vec<MessageContent> {
        vec![MessageContent::human(text)]
    }

    #[tokio::test]
    async fn replies_cycle_in_order() {
        let model = FakeModel::new(["one", "two"]);
        let ctx = Context::new();
        let options = CallOptions::new();

        let mut seen = Vec::new();
        for _ in 0..3 {
            let response = model
                .generate_content(&ctx, &prompt("next"), &options)
                .await
                .unwrap();
            seen.push(response.choices[0].content.clone());
        }

        assert_eq!(seen, ["one", "two", "one"]);
        assert_eq!(model.call_count(), 3);
    }

    #[tokio::test]
    async fn records_messages_and_options() {
        let model = FakeModel::new(["ok"]);
        let options = CallOptions::new().with_max_tokens(5);

        model
            .generate_content(&Context::new(), &prompt("hello"), &options)
            .await
            .unwrap();

        let calls = model.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages, prompt("hello"));
        assert_eq!(calls[0].options, options);
    }

    #[tokio::test]
    async fn scripted_error_and_full_response() {
        let model = FakeModel::new([
            FakeReply::error("quota exhausted"),
            FakeReply::from(ContentResponse::new(vec![
                ContentChoice::new("a"),
                ContentChoice::new("b"),
            ])),
        ]);
        let ctx = Context::new();

        let err = model
            .generate_content(&ctx, &prompt("x"), &CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            GenerationError::Provider { ref message, .. } if message == "quota exhausted"
        ));

        let response = model
            .generate_content(&ctx, &prompt("x"), &CallOptions::new())
            .await
            .unwrap();
        assert_eq!(response.choices.len(), 2);
    }

    #[tokio::test]
    async fn reset_rewinds_script() {
        let model = FakeModel::new(["first"]);
        model.add_reply("second");

        let ctx = Context::new();
        let options = CallOptions::new();
        model
            .generate_content(&ctx, &prompt("x"), &options)
            .await
            .unwrap();
        model.reset();
        assert_eq!(model.call_count(), 0);

        let response = model
            .generate_content(&ctx, &prompt("x"), &options)
            .await
            .unwrap();
        assert_eq!(response.choices[0].content, "first");
    }

    #[tokio::test]
    async fn empty_script_and_empty_messages_fail() {
        let model = FakeModel::default();
        let ctx = Context::new();

        let err = model
            .generate_content(&ctx, &prompt("x"), &CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(_)));

        let err = model
            .generate_content(&ctx, &[], &CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::InvalidRequest(_)));
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn cancelled_context_is_honored() {
        let model = FakeModel::new(["never"]);
        let ctx = Context::new();
        ctx.cancel();

        let err = model
            .generate_content(&ctx, &prompt("x"), &CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Cancelled));
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn latency_is_cut_short_by_deadline() {
        let model = FakeModel::new(["slow"]).with_latency(Duration::from_secs(30));
        let ctx = Context::new().with_timeout(Duration::from_millis(20));

        let err = model
            .generate_content(&ctx, &prompt("x"), &CallOptions::new())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn interrupted_call_does_not_consume_reply() {
        let model = Arc::new(
            FakeModel::new(["first", "second"]).with_latency(Duration::from_millis(20)),
        );
        let ctx = Context::new();

        let task = {
            let model = Arc::clone(&model);
            let ctx = ctx.clone();
            tokio::spawn(async move {
                model
                    .generate_content(&ctx, &prompt("x"), &CallOptions::new())
                    .await
            })
        };

        // Cancel only once the call is sleeping inside the model.
        while model.call_count() == 0 {
            tokio::task::yield_now().await;
        }
        ctx.cancel();
        assert!(matches!(
            task.await.unwrap(),
            Err(GenerationError::Cancelled)
        ));

        let response = model
            .generate_content(&Context::new(), &prompt("x"), &CallOptions::new())
            .await
            .unwrap();
        assert_eq!(response.choices[0].content, "first");
        assert_eq!(model.call_count(), 2);
    }

    #[test]
    fn provider_serves_registered_fakes() {
        let provider = FakeProvider::new().with_model("echo", FakeModel::new(["hi"]));

        assert!(provider.create_model("echo").is_ok());
        assert!(provider.fake("echo").is_some());
        assert!(matches!(
            provider.create_model("other"),
            Err(CreateModelError::UnsupportedModel(name)) if name == "other"
        ));
    }
}
