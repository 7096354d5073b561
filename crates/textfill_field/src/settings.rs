//! Process-wide generation settings.
//!
//! Read once at startup (from the environment or a host config file) and then
//! passed by reference; nothing here is mutated after construction.

use serde::Deserialize;
use textfill_llm::{ModelTier, OpenAIConfig, OpenAITransport};
use tracing::warn;

use crate::error::{FieldError, Result};

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Clone, Deserialize)]
pub struct Settings {
    pub api_key: String,
    #[serde(default)]
    pub model_tier: ModelTier,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl Settings {
    pub const API_KEY_ENV: &'static str = "TEXTFILL_API_KEY";
    pub const FALLBACK_API_KEY_ENV: &'static str = "OPENAI_API_KEY";
    pub const MODEL_TIER_ENV: &'static str = "TEXTFILL_MODEL_TIER";
    pub const LANGUAGE_ENV: &'static str = "TEXTFILL_LANGUAGE";
    /// General site language, used when no generation language is set.
    pub const SITE_LANGUAGE_ENV: &'static str = "LANGUAGE_CODE";
    pub const BASE_URL_ENV: &'static str = "TEXTFILL_BASE_URL";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model_tier: ModelTier::default(),
            language: default_language(),
            base_url: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings from an arbitrary variable source.
    ///
    /// An unknown tier falls back to basic with a warning; a missing key is a
    /// configuration error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = non_empty(Self::API_KEY_ENV)
            .or_else(|| non_empty(Self::FALLBACK_API_KEY_ENV))
            .ok_or_else(|| {
                FieldError::Config(format!(
                    "{} (or {}) is not set",
                    Self::API_KEY_ENV,
                    Self::FALLBACK_API_KEY_ENV
                ))
            })?;

        let model_tier = match non_empty(Self::MODEL_TIER_ENV) {
            Some(value) => value.parse().unwrap_or_else(|e| {
                warn!(value = %value, error = %e, "Unknown model tier, using basic");
                ModelTier::Basic
            }),
            None => ModelTier::default(),
        };

        let language = non_empty(Self::LANGUAGE_ENV)
            .or_else(|| non_empty(Self::SITE_LANGUAGE_ENV))
            .unwrap_or_else(default_language);

        Ok(Self {
            api_key,
            model_tier,
            language,
            base_url: non_empty(Self::BASE_URL_ENV),
        })
    }

    pub fn with_model_tier(mut self, tier: ModelTier) -> Self {
        self.model_tier = tier;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// OpenAI transport carrying this credential.
    pub fn transport(&self) -> Result<OpenAITransport> {
        let mut config = OpenAIConfig::new(self.api_key.clone());
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url.clone());
        }
        Ok(OpenAITransport::new(config)?)
    }

    /// Key with everything but the last four characters hidden.
    pub fn masked_key(&self) -> String {
        let chars: Vec<char> = self.api_key.chars().collect();
        if chars.len() <= 4 {
            return "****".to_string();
        }
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("****{}", tail)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &self.masked_key())
            .field("model_tier", &self.model_tier)
            .field("language", &self.language)
            .field("base_url", &self.base_url)
            .finish()
    }
}
