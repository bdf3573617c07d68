//! Vendor-neutral model interface for `llms`.
//!
//! Provides a uniform contract for invoking large language models, decoupling
//! consumers from provider implementations.
//!
//! # Overview
//!
//! - Provider-agnostic: Consumers depend only on the [`Model`](llm::Model) trait,
//!   never on a specific backend. Adapters for concrete vendors live elsewhere.
//!
//! - Helpers: [`generate_from_single_prompt`](llm::generate_from_single_prompt) covers
//!   plain text completion, [`generate_structured_content`](llm::generate_structured_content)
//!   covers schema-constrained JSON extraction.
//!
//! - Cancellation: every call takes a [`Context`](context::Context) which is forwarded
//!   untouched to the model.
//!
//! # Example
//!
//! ```
//! use llms_models::context::Context;
//! use llms_models::llm::{CallOptions, FakeModel, generate_from_single_prompt};
//!
//! # tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(async {
//! let model = FakeModel::new(["Paris"]);
//!
//! let answer = generate_from_single_prompt(
//!     &model,
//!     &Context::new(),
//!     "What is the capital of France?",
//!     &CallOptions::new().with_temperature(0.0),
//! )
//! .await?;
//!
//! assert_eq!(answer, "Paris");
//! # Ok::<(), llms_models::llm::CompletionError>(())
//! # }).unwrap();
//! ```

pub mod context;
pub mod error;
pub mod llm;
mod registry;
pub mod schema;

pub use registry::ModelRegistry;
