//! OpenAI transport module
//!
//! Sends batches to the Chat Completions API.
//! API docs: https://platform.openai.com/docs/api-reference/chat

mod convert;
mod transport;
mod types;

pub use transport::OpenAITransport;
pub use types::{OpenAIConfig, OpenAIRequest, OpenAIResponse};
