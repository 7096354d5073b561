//! OpenAI transport implementation

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::convert::{from_openai_response, to_openai_request};
use super::types::{OpenAIConfig, OpenAIResponse};
use crate::error::{Error, Result};
use crate::transport::{ChatRequest, ChatResponse, ChatTransport};

/// OpenAI Chat Completions transport
pub struct OpenAITransport {
    config: OpenAIConfig,
    client: Client,
}

impl OpenAITransport {
    /// Environment variable for API key
    pub const API_KEY_ENV: &'static str = "OPENAI_API_KEY";

    /// Create a new transport. The key is fixed for the transport's lifetime.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("openai".to_string()));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { config, client })
    }

    /// Create transport from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("openai".to_string()))?;

        Self::new(OpenAIConfig::new(api_key))
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl ChatTransport for OpenAITransport {
    fn transport_id(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);
        let body = to_openai_request(&request);

        debug!(
            model = %body.model,
            messages = body.messages.len(),
            max_tokens = body.max_tokens,
            "Sending chat completion request"
        );

        let mut req = self.client.post(&url).bearer_auth(&self.config.api_key);
        if let Some(ref org_id) = self.config.organization_id {
            req = req.header("OpenAI-Organization", org_id);
        }

        let response = req.json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(Error::provider_error(format!(
                "OpenAI API error {}: {}",
                status, error_text
            )));
        }

        let openai_resp: OpenAIResponse = response.json().await?;
        debug!(
            id = openai_resp.id.as_deref().unwrap_or("-"),
            choices = openai_resp.choices.len(),
            "Received chat completion response"
        );
        from_openai_response(openai_resp)
    }
}
