//! Convenience helpers built on [`Model::generate_content`].

use super::error::{CompletionError, ExtractionError};
use super::model::Model;
use super::options::CallOptions;
use super::types::{ChatMessageType, ContentPart, ContentResponse, MessageContent};
use crate::context::Context;
use crate::schema::generate_json_schema;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

/// Instruction sent ahead of the schema by [`generate_structured_content`].
pub const JSON_OUTPUT_INSTRUCTION: &str =
    "Always give output in JSON format. Please find JSON schema below: ";

/// Calls a model with a single prompt and returns the text of its first choice.
///
/// The prompt is sent as one human message with a single text part. `ctx` and
/// `options` are passed to the model unchanged. When the model returns several
/// choices only the first one is used.
///
/// # Errors
///
/// - [`CompletionError::Generation`] with the model's error, unaltered
/// - [`CompletionError::EmptyResponse`] if the model returned no choices
pub async fn generate_from_single_prompt<M>(
    model: &M,
    ctx: &Context,
    prompt: &str,
    options: &CallOptions,
) -> Result<String, CompletionError>
where
    M: Model + ?Sized,
{
    let messages = [MessageContent::text(ChatMessageType::Human, prompt)];

    let response = model.generate_content(ctx, &messages, options).await?;
    first_choice_content(response)
}

/// Asks a model for JSON matching the schema of `T` and parses its answer.
///
/// A human message carrying [`JSON_OUTPUT_INSTRUCTION`] and the schema of `T`,
/// as two separate text parts, is appended to a copy of `messages`. The first
/// choice is cleaned with [`strip_code_fence`] and deserialized into `T`.
/// No retry is attempted when the answer does not parse.
///
/// # Errors
///
/// - [`ExtractionError::Schema`] if the schema of `T` cannot be rendered; the model is not
///   called. Schemas derived with `schemars` always render, so this only arises from
///   hand-written [`JsonSchema`] implementations.
/// - [`ExtractionError::Generation`] with the model's error, unaltered
/// - [`ExtractionError::EmptyResponse`] if the model returned no choices
/// - [`ExtractionError::Deserialization`] if the answer is not valid JSON for `T`
pub async fn generate_structured<T, M>(
    model: &M,
    ctx: &Context,
    messages: &[MessageContent],
    options: &CallOptions,
) -> Result<T, ExtractionError>
where
    T: JsonSchema + DeserializeOwned,
    M: Model + ?Sized,
{
    let schema = generate_json_schema::<T>()?;

    let mut messages = messages.to_vec();
    messages.push(MessageContent::new(
        ChatMessageType::Human,
        vec![
            ContentPart::text(JSON_OUTPUT_INSTRUCTION),
            ContentPart::text(schema),
        ],
    ));

    tracing::debug!(
        messages = messages.len(),
        "Requesting structured output from model"
    );
    let response = model.generate_content(ctx, &messages, options).await?;
    let content = first_choice_content(response)?;

    serde_json::from_str(strip_code_fence(&content)).map_err(|err| {
        tracing::warn!(error = %err, "Model output did not match the requested JSON schema");
        ExtractionError::Deserialization(err)
    })
}

/// Asks a model for JSON matching the shape of `output` and stores the result in it.
///
/// Behaves like [`generate_structured`]. `output` is only written once the
/// answer has been fully parsed; on error it is left untouched.
///
/// The parsed value replaces `output` as a whole. Fields missing from the
/// answer are not filled from the current value of `output`; unless `T` gives
/// them a serde default the answer fails to deserialize.
///
/// # Errors
///
/// See [`generate_structured`].
///
/// # Example
///
/// ```
/// use llms_models::context::Context;
/// use llms_models::llm::{CallOptions, FakeModel, MessageContent, generate_structured_content};
/// use schemars::JsonSchema;
/// use serde::Deserialize;
///
/// #[derive(Debug, Default, Deserialize, JsonSchema)]
/// struct Capital {
///     country: String,
///     city: String,
/// }
///
/// # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
/// let model = FakeModel::new(["```json\n{\"country\":\"France\",\"city\":\"Paris\"}\n```"]);
/// let history = vec![MessageContent::human("What is the capital of France?")];
///
/// let mut capital = Capital::default();
/// generate_structured_content(&model, &Context::new(), &history, &mut capital, &CallOptions::new())
///     .await?;
///
/// assert_eq!(capital.city, "Paris");
/// # Ok::<(), llms_models::llm::ExtractionError>(())
/// # }).unwrap();
/// ```
pub async fn generate_structured_content<T, M>(
    model: &M,
    ctx: &Context,
    messages: &[MessageContent],
    output: &mut T,
    options: &CallOptions,
) -> Result<(), ExtractionError>
where
    T: JsonSchema + DeserializeOwned,
    M: Model + ?Sized,
{
    *output = generate_structured::<T, M>(model, ctx, messages, options).await?;
    Ok(())
}

/// Removes markdown code fencing around a model answer.
///
/// Trims every backtick from both ends, then every `j`, `s`, `o` and `n`
/// character from both ends. This handles the usual `` ```json ... ``` ``
/// wrapping but is a character trim, not a fence parser: a bare top-level
/// `null` loses its letters, and whitespace after a closing fence stops the
/// trim. Text without fencing around a JSON object or array is returned
/// unchanged.
#[must_use]
pub fn strip_code_fence(text: &str) -> &str {
    text.trim_matches('`').trim_matches(|c: char| matches!(c, 'j' | 's' | 'o' | 'n'))
}

fn first_choice_content(response: ContentResponse) -> Result<String, CompletionError> {
    tracing::debug!(choices = response.choices.len(), "Model returned response");

    match response.choices.into_iter().next() {
        Some(choice) => Ok(choice.content),
        None => {
            tracing::warn!("Model returned a response without choices");
            Err(CompletionError::EmptyResponse)
        }
    }
}
