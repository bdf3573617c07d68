//! Shared test helpers for generation tests.

use async_trait::async_trait;
use llms_models::context::Context;
use llms_models::llm::{
    CallOptions, ContentChoice, ContentResponse, GenerationError, MessageContent, Model,
};
use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A simple person struct for testing structured output.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: u32,
    pub occupation: Option<String>,
}

/// A call observed by a [`StubModel`].
#[derive(Debug, Clone)]
pub struct StubCall {
    pub ctx: Context,
    pub messages: Vec<MessageContent>,
    pub options: CallOptions,
}

type Respond = dyn Fn(&[MessageContent]) -> Result<ContentResponse, GenerationError> + Send + Sync;

/// A model whose answer is computed from the messages it receives.
pub struct StubModel {
    respond: Box<Respond>,
    calls: Mutex<Vec<StubCall>>,
}

impl StubModel {
    pub fn new(
        respond: impl Fn(&[MessageContent]) -> Result<ContentResponse, GenerationError>
        + Send
        + Sync
        + 'static,
    ) -> Self {
        Self {
            respond: Box::new(respond),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answers with one choice per entry of `contents`.
    pub fn answering(contents: &'static [&'static str]) -> Self {
        Self::new(move |_| {
            Ok(ContentResponse::new(
                contents.iter().map(|c| ContentChoice::new(*c)).collect(),
            ))
        })
    }

    /// Always answers with zero choices.
    pub fn empty() -> Self {
        Self::new(|_| Ok(ContentResponse::default()))
    }

    /// Always fails with the error built by `err`.
    pub fn failing(err: impl Fn() -> GenerationError + Send + Sync + 'static) -> Self {
        Self::new(move |_| Err(err()))
    }

    /// Answers with the text of the last message it receives.
    pub fn echo() -> Self {
        Self::new(|messages| {
            let last = messages.last().map(MessageContent::text_content);
            Ok(ContentResponse::from_text(last.unwrap_or_default()))
        })
    }

    pub fn calls(&self) -> Vec<StubCall> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl Model for StubModel {
    async fn generate_content(
        &self,
        ctx: &Context,
        messages: &[MessageContent],
        options: &CallOptions,
    ) -> Result<ContentResponse, GenerationError> {
        self.calls.lock().push(StubCall {
            ctx: ctx.clone(),
            messages: messages.to_vec(),
            options: options.clone(),
        });
        (self.respond)(messages)
    }
}
