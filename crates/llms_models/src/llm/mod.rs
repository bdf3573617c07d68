//! LLM (Large Language Model) generation capabilities.
//!
//! This module provides the core trait and types for text generation
//! with LLMs, including:
//!
//! - The [`Model`] contract implemented by provider adapters
//! - Single prompt completion
//! - Structured outputs parsed from JSON answers
//! - Multi-modal inputs (images, binary data, tool calls)

mod error;
mod fake;
mod generate;
mod model;
mod options;
mod provider;
mod types;

pub use error::{CompletionError, ExtractionError, GenerationError};
pub use fake::{FakeModel, FakeProvider, FakeReply, RecordedCall};
pub use generate::{
    JSON_OUTPUT_INSTRUCTION, generate_from_single_prompt, generate_structured,
    generate_structured_content, strip_code_fence,
};
pub use model::Model;
pub use options::CallOptions;
pub use provider::ModelProvider;
pub use types::{
    ChatMessageType, ContentChoice, ContentPart, ContentResponse, FunctionCall, MessageContent,
    ToolCall, ToolCallResponse, ToolChoice, ToolDefinition, Usage,
};
