//! Core types for model requests and responses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─────────────────────
// Messages
// ─────────────────────

/// The role of the author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMessageType {
    /// Instructions that frame the conversation.
    System,
    /// A message from the user.
    Human,
    /// A message from the model.
    Ai,
    /// The result of a legacy function call.
    Function,
    /// The result of a tool call.
    Tool,
    /// A message with no specific role.
    Generic,
}

impl core::fmt::Display for ChatMessageType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let role = match self {
            Self::System => "system",
            Self::Human => "human",
            Self::Ai => "ai",
            Self::Function => "function",
            Self::Tool => "tool",
            Self::Generic => "generic",
        };
        f.write_str(role)
    }
}

/// One turn in a conversation.
///
/// Parts are kept in presentation order. Since models may not support all
/// part kinds, the conversion to provider-specific formats may be lossy
/// (e.g., images may be omitted for text-only models).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageContent {
    /// The author of the message.
    pub role: ChatMessageType,
    /// The content parts of the message, in order.
    pub parts: Vec<ContentPart>,
}

impl MessageContent {
    /// Creates a message from a role and parts.
    #[must_use]
    pub fn new(role: ChatMessageType, parts: Vec<ContentPart>) -> Self {
        Self { role, parts }
    }

    /// Creates a message with a single text part.
    #[must_use]
    pub fn text(role: ChatMessageType, text: impl Into<String>) -> Self {
        Self::new(role, vec![ContentPart::text(text)])
    }

    /// Creates a human message with a single text part.
    #[must_use]
    pub fn human(text: impl Into<String>) -> Self {
        Self::text(ChatMessageType::Human, text)
    }

    /// Creates a system message with a single text part.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self::text(ChatMessageType::System, text)
    }

    /// Creates an AI message with a single text part.
    #[must_use]
    pub fn ai(text: impl Into<String>) -> Self {
        Self::text(ChatMessageType::Ai, text)
    }

    /// Creates a tool message answering the tool call `tool_call_id`.
    #[must_use]
    pub fn tool_response(
        tool_call_id: impl Into<String>,
        name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::new(
            ChatMessageType::Tool,
            vec![ContentPart::ToolCallResponse(ToolCallResponse {
                tool_call_id: tool_call_id.into(),
                name: name.into(),
                content: content.into(),
            })],
        )
    }

    /// Appends a part to the message.
    #[must_use]
    pub fn with_part(mut self, part: ContentPart) -> Self {
        self.parts.push(part);
        self
    }

    /// Returns all text parts concatenated in order.
    ///
    /// Returns an empty string if the message has no text parts.
    #[must_use]
    pub fn text_content(&self) -> String {
        self.parts
            .iter()
            .filter_map(ContentPart::as_text)
            .collect::<Vec<_>>()
            .join("")
    }
}

// ─────────────────────
// Content Parts
// ─────────────────────

/// One piece of a message payload.
///
/// Only [`Text`](Self::Text) is interpreted by the generation helpers; the
/// other kinds are carried through for model adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text content.
    Text {
        /// The text.
        text: String,
    },
    /// An image referenced by URL (including `data:` URLs).
    ImageUrl {
        /// Location of the image.
        url: String,
        /// Optional fidelity hint (e.g. `"low"`, `"high"`).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// Inline binary content such as an image or audio clip.
    Binary {
        /// The MIME type of `data`.
        mime_type: String,
        /// The raw bytes. Serialized as standard base64.
        #[serde(with = "base64_bytes")]
        data: Vec<u8>,
    },
    /// A tool call requested by the model.
    ToolCall(ToolCall),
    /// The result of a tool call.
    ToolCallResponse(ToolCallResponse),
}

impl ContentPart {
    /// Creates a text part.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Creates an image part referenced by URL.
    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            url: url.into(),
            detail: None,
        }
    }

    /// Creates an image part referenced by URL with a fidelity hint.
    #[must_use]
    pub fn image_url_with_detail(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::ImageUrl {
            url: url.into(),
            detail: Some(detail.into()),
        }
    }

    /// Creates an inline binary part.
    #[must_use]
    pub fn binary(mime_type: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self::Binary {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Returns the text if this is a text part.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }
}

mod base64_bytes {
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(data: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

// ─────────────────────
// Tool Calling
// ─────────────────────

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Unique identifier for this tool call.
    pub id: String,
    /// The kind of tool, usually `"function"`.
    pub kind: String,
    /// The function to call.
    pub function: FunctionCall,
}

/// A function invocation inside a [`ToolCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// The name of the function to call.
    pub name: String,
    /// The arguments, as the JSON text produced by the model.
    pub arguments: String,
}

/// The result of executing a [`ToolCall`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallResponse {
    /// Identifier of the tool call this answers.
    pub tool_call_id: String,
    /// Name of the tool that was called.
    pub name: String,
    /// The tool output.
    pub content: String,
}

/// Definition of a tool that can be called by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Name of the tool (e.g., `get_weather`, `search_database`).
    pub name: String,
    /// Human-readable description of what the tool does.
    pub description: String,
    /// JSON Schema defining the tool's parameters.
    pub parameters: Value,
}

/// Controls how the model should select tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolChoice {
    /// Model decides whether to call tools or respond with text.
    Auto,
    /// Model must call at least one tool.
    Required,
    /// Model must call this specific tool.
    Specific(String),
    /// Model must not call any tools.
    None,
}

// ─────────────────────
// Response
// ─────────────────────

/// The result of a generation call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentResponse {
    /// Candidate answers, in the order the model returned them.
    pub choices: Vec<ContentChoice>,
}

impl ContentResponse {
    /// Creates a response from its choices.
    #[must_use]
    pub fn new(choices: Vec<ContentChoice>) -> Self {
        Self { choices }
    }

    /// Creates a response with a single text choice.
    #[must_use]
    pub fn from_text(content: impl Into<String>) -> Self {
        Self::new(vec![ContentChoice::new(content)])
    }

    /// Returns the first choice, if any.
    #[must_use]
    pub fn first(&self) -> Option<&ContentChoice> {
        self.choices.first()
    }

    /// Returns `true` if the response has no choices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// One candidate answer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentChoice {
    /// The generated text.
    pub content: String,
    /// Why the model stopped generating, as reported by the provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
    /// Provider-specific details about the generation.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub generation_info: Map<String, Value>,
    /// Tool calls requested by the model.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
    /// Reasoning/thinking text, for models that expose it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning_content: Option<String>,
    /// Token usage information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

impl ContentChoice {
    /// Creates a choice with only text content.
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    /// Sets the stop reason.
    #[must_use]
    pub fn with_stop_reason(mut self, reason: impl Into<String>) -> Self {
        self.stop_reason = Some(reason.into());
        self
    }

    /// Sets the token usage.
    #[must_use]
    pub fn with_usage(mut self, usage: Usage) -> Self {
        self.usage = Some(usage);
        self
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    /// Number of tokens in the input.
    pub input_tokens: Option<u64>,
    /// Number of tokens in the output.
    pub output_tokens: Option<u64>,
    /// Total tokens (input + output).
    pub total_tokens: Option<u64>,
}
