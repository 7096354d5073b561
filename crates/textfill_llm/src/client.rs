//! Generation client: batches the conversation, calls the transport, decodes.

use std::sync::Arc;
use std::time::Instant;

use textfill_observability::{generation_span, record_duration, record_error};
use tracing::{Instrument, debug, info};
use uuid::Uuid;

use crate::conversation::ConversationBuilder;
use crate::decode::decode;
use crate::error::{Error, Result};
use crate::partition::{CountPartition, Partition};
use crate::transport::openai::{OpenAIConfig, OpenAITransport};
use crate::transport::{ChatRequest, ChatTransport};
use crate::types::Usage;

/// Messages per request, and the response ceiling of each request.
pub const MAX_BATCH_SIZE: usize = 1000;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Sends a conversation to a chat transport and returns the decoded body.
///
/// Batches are submitted strictly one after another and their outputs are
/// concatenated in submission order. Transport failures are returned as a
/// single [`Error::Generation`]; a reply that cannot be decoded is returned
/// as raw text instead.
#[derive(Clone)]
pub struct GenerationClient {
    transport: Arc<dyn ChatTransport>,
    partition: Arc<dyn Partition>,
    max_tokens_per_request: u32,
}

impl GenerationClient {
    pub fn new<T: ChatTransport + 'static>(transport: T) -> Self {
        Self::from_arc(Arc::new(transport))
    }

    pub fn from_arc(transport: Arc<dyn ChatTransport>) -> Self {
        Self {
            transport,
            partition: Arc::new(CountPartition::new(MAX_BATCH_SIZE)),
            max_tokens_per_request: MAX_BATCH_SIZE as u32,
        }
    }

    /// Client backed by the OpenAI transport with the given key.
    pub fn openai(api_key: impl Into<String>) -> Result<Self> {
        Ok(Self::new(OpenAITransport::new(OpenAIConfig::new(api_key))?))
    }

    pub fn with_partition<P: Partition + 'static>(mut self, partition: P) -> Self {
        self.partition = Arc::new(partition);
        self
    }

    pub fn with_max_tokens_per_request(mut self, max_tokens: u32) -> Self {
        self.max_tokens_per_request = max_tokens.max(1);
        self
    }

    pub fn transport_id(&self) -> &str {
        self.transport.transport_id()
    }

    /// [`generate`](Self::generate) at [`DEFAULT_TEMPERATURE`].
    pub async fn generate_default(&self, conversation: &mut ConversationBuilder) -> Result<String> {
        self.generate(conversation, DEFAULT_TEMPERATURE).await
    }

    /// Send the conversation and decode the combined reply.
    ///
    /// The builder is emptied before the first request, so it is empty
    /// afterwards whether this returns a body, raw text or an error.
    pub async fn generate(
        &self,
        conversation: &mut ConversationBuilder,
        temperature: f32,
    ) -> Result<String> {
        let messages = conversation.take_messages();
        let model = conversation.policy().model_tier().model_id();

        if messages.is_empty() {
            debug!("Empty conversation, nothing to generate");
            return Ok(String::new());
        }

        let batches = self.partition.partition(&messages);
        let generation_id = Uuid::new_v4().to_string();
        let span = generation_span!(
            generation_id.as_str(),
            model,
            messages.len(),
            batches.len()
        );

        async {
            let started = Instant::now();
            let mut parts = Vec::with_capacity(batches.len());
            let mut usage = Usage::default();

            for (index, batch) in batches.iter().enumerate() {
                let request = ChatRequest {
                    model: model.to_string(),
                    messages: batch.to_vec(),
                    max_tokens: self.max_tokens_per_request,
                    temperature,
                    n: 1,
                };

                let response = match self.transport.complete(request).await {
                    Ok(response) => response,
                    Err(e) => {
                        record_error(&e);
                        return Err(e.into_generation());
                    }
                };

                let Some(text) = response.first_text() else {
                    let e = Error::invalid_response(format!("batch {} returned no candidates", index));
                    record_error(&e);
                    return Err(e.into_generation());
                };

                debug!(batch = index, chars = text.len(), "Batch completed");
                parts.push(text.to_string());
                if let Some(ref batch_usage) = response.usage {
                    usage.add(batch_usage);
                }
            }

            let combined = parts.concat();
            record_duration("duration_ms", started.elapsed());
            info!(
                transport = self.transport.transport_id(),
                chars = combined.len(),
                total_tokens = usage.total_tokens,
                "Generation completed"
            );

            Ok(decode(&combined))
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for GenerationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationClient")
            .field("transport", &self.transport.transport_id())
            .field("max_tokens_per_request", &self.max_tokens_per_request)
            .finish()
    }
}
