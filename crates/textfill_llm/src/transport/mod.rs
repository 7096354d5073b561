//! Chat transport trait and its implementations

pub mod openai;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Message, Usage};

/// One chat-completion call: a batch of messages plus sampling limits.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Number of candidates to produce. The client always asks for one.
    pub n: u32,
}

/// Candidates returned for one [`ChatRequest`], in endpoint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    pub candidates: Vec<String>,
    pub usage: Option<Usage>,
}

impl ChatResponse {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![text.into()],
            usage: None,
        }
    }

    /// Text of the first candidate.
    pub fn first_text(&self) -> Option<&str> {
        self.candidates.first().map(String::as_str)
    }
}

/// Remote text-generation endpoint.
///
/// Implementations own transport and authentication; timeouts, if any, are
/// theirs to impose.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Identifier used in logs (e.g. "openai").
    fn transport_id(&self) -> &str;

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse>;
}
