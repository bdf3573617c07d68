//! A vendor-neutral interface for calling large language models.
//!
//! Provider adapters implement [`Model`](llm::Model); application code calls
//! them directly or through the helpers for single prompt completion and
//! structured JSON output.
//!
//! ```
//! use llms::prelude::*;
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, JsonSchema)]
//! struct Sentiment {
//!     label: String,
//!     score: f32,
//! }
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let model = FakeModel::new([r#"```json
//! {"label": "positive", "score": 0.92}
//! ```"#]);
//!
//! let sentiment: Sentiment = generate_structured(
//!     &model,
//!     &Context::new(),
//!     &[MessageContent::human("I love this library!")],
//!     &CallOptions::new(),
//! )
//! .await?;
//!
//! assert_eq!(sentiment.label, "positive");
//! # Ok::<(), ExtractionError>(())
//! # }).unwrap();
//! ```

pub use llms_models::*;

/// Logging setup, re-exported from `llms_tracing`.
#[cfg(feature = "tracing-subscriber")]
pub use llms_tracing as tracing_setup;

/// Re-export all common types for easy access.
pub mod prelude {
    pub use llms_models::ModelRegistry;
    pub use llms_models::context::Context;
    pub use llms_models::llm::{
        CallOptions, ChatMessageType, CompletionError, ContentChoice, ContentPart,
        ContentResponse, ExtractionError, FakeModel, GenerationError, MessageContent, Model,
        ModelProvider, generate_from_single_prompt, generate_structured,
        generate_structured_content,
    };
}
