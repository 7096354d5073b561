//! textfill_llm builds instruction-driven conversations and turns a chat
//! model's loosely structured reply into a field value.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   take_messages()   ┌─────────────────────────┐
//! │ ConversationBuilder  │ ──────────────────▶ │    GenerationClient     │
//! │  policy directives   │                     │  Partition ─▶ batches   │
//! │  + context + request │                     │  ChatTransport (n = 1)  │
//! └──────────────────────┘                     │  concat ─▶ decode()     │
//!                                              └────────────┬────────────┘
//!                                                           ▼
//!                                                  body text / raw text
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use textfill_llm::{ConversationBuilder, GenerationClient, PolicyConfig, Role};
//!
//! # async fn run() -> textfill_llm::Result<()> {
//! let policy = PolicyConfig::builder().language("ru").max_body_length(300).build()?;
//! let mut conversation = ConversationBuilder::new(policy);
//! conversation.add_instruction("Where to buy a house in London?");
//! conversation.add_message(Role::Assistant, "You are a real estate agent");
//!
//! let client = GenerationClient::openai("sk-...")?;
//! let body = client.generate_default(&mut conversation).await?;
//! assert!(conversation.is_empty());
//! # let _ = body;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod conversation;
pub mod decode;
pub mod error;
pub mod partition;
pub mod policy;
pub mod transport;
pub mod types;

#[cfg(test)]
mod tests;

pub use client::{DEFAULT_TEMPERATURE, GenerationClient, MAX_BATCH_SIZE};
pub use conversation::ConversationBuilder;
pub use decode::{Envelope, decode, repair_quotes};
pub use error::{Error, Result};
pub use partition::{CountPartition, Partition, TokenEstimatePartition};
pub use policy::{DEFAULT_ALLOWED_TAGS, PolicyBuilder, PolicyConfig};
pub use transport::openai::{OpenAIConfig, OpenAITransport};
pub use transport::{ChatRequest, ChatResponse, ChatTransport};
pub use types::{Message, ModelTier, Role, Usage};
