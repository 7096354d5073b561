//! Conversion between transport types and OpenAI wire types

use super::types::{OpenAIMessage, OpenAIRequest, OpenAIResponse};
use crate::error::{Error, Result};
use crate::transport::{ChatRequest, ChatResponse};
use crate::types::Usage;

pub fn to_openai_request(req: &ChatRequest) -> OpenAIRequest {
    OpenAIRequest {
        model: req.model.clone(),
        messages: req
            .messages
            .iter()
            .map(|msg| OpenAIMessage {
                role: msg.role.as_str().to_string(),
                content: msg.content.clone(),
            })
            .collect(),
        max_tokens: req.max_tokens,
        temperature: req.temperature,
        n: req.n,
    }
}

/// A choice without content counts as an empty candidate.
pub fn from_openai_response(resp: OpenAIResponse) -> Result<ChatResponse> {
    if resp.choices.is_empty() {
        return Err(Error::invalid_response("No choices in OpenAI response"));
    }

    let candidates = resp
        .choices
        .into_iter()
        .map(|choice| choice.message.content.unwrap_or_default())
        .collect();

    let usage = resp.usage.map(|u| Usage {
        prompt_tokens: u.prompt_tokens,
        completion_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(ChatResponse { candidates, usage })
}
