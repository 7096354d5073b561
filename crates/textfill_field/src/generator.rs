use async_trait::async_trait;
use textfill_llm::GenerationClient;

use crate::content::{ContentRequest, get_content_with};
use crate::error::Result;
use crate::settings::Settings;

/// Source of generated field content.
///
/// Save hooks only talk to this trait so hosts and tests can swap the
/// remote model for something local.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    async fn generate(&self, request: &ContentRequest) -> Result<String>;
}

/// Generator backed by [`Settings`] and a [`GenerationClient`].
#[derive(Debug, Clone)]
pub struct SettingsGenerator {
    settings: Settings,
    client: GenerationClient,
}

impl SettingsGenerator {
    /// Build an OpenAI-backed generator for `settings`.
    pub fn new(settings: Settings) -> Result<Self> {
        let client = GenerationClient::new(settings.transport()?);
        Ok(Self { settings, client })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(Settings::from_env()?)
    }

    /// Use an existing client, e.g. one with a custom transport or partition.
    pub fn with_client(settings: Settings, client: GenerationClient) -> Self {
        Self { settings, client }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

#[async_trait]
impl ContentGenerator for SettingsGenerator {
    async fn generate(&self, request: &ContentRequest) -> Result<String> {
        get_content_with(&self.client, &self.settings, request).await
    }
}
