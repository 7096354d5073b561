//! Generation policy and the system directives derived from it.

use crate::decode::Envelope;
use crate::error::{Error, Result};
use crate::types::{Message, ModelTier};

/// Markup tags allowed when markup output is enabled and no explicit set is given.
pub const DEFAULT_ALLOWED_TAGS: &[&str] = &[
    "p",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "ul",
    "ol",
    "li",
    "a",
    "br",
    "b",
    "i",
    "strong",
    "em",
    "u",
    "code",
    "hr",
    "blockquote",
    "div",
];

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_MAX_BODY_LENGTH: u32 = 300;

/// Language, length and output-format contract for one builder.
///
/// Built through [`PolicyConfig::builder`]; immutable afterwards. When markup
/// is disabled `allowed_tags` is always empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    model_tier: ModelTier,
    language: String,
    max_body_length: u32,
    markup_enabled: bool,
    allowed_tags: Vec<String>,
}

impl PolicyConfig {
    pub fn builder() -> PolicyBuilder {
        PolicyBuilder::default()
    }

    pub fn model_tier(&self) -> ModelTier {
        self.model_tier
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn max_body_length(&self) -> u32 {
        self.max_body_length
    }

    pub fn markup_enabled(&self) -> bool {
        self.markup_enabled
    }

    pub fn allowed_tags(&self) -> &[String] {
        &self.allowed_tags
    }

    /// System directives in send order: language, length, envelope, then tags.
    pub fn directives(&self) -> Vec<Message> {
        let mut directives = vec![
            Message::system(format!("Your language (iso): {}", self.language)),
            Message::system(format!(
                "Use max_length: {} in json.body",
                self.max_body_length
            )),
            Message::system(format!(
                "Return response in JSON format with double quotes. Example: {}",
                Envelope::example_json()
            )),
        ];

        if let Some(tags) = self.tag_directive() {
            directives.push(Message::system(tags));
        }

        directives
    }

    fn tag_directive(&self) -> Option<String> {
        if !self.markup_enabled || self.allowed_tags.is_empty() {
            return None;
        }

        let tags = self
            .allowed_tags
            .iter()
            .map(|tag| format!("<{}>", tag))
            .collect::<Vec<_>>()
            .join(", ");
        Some(format!("In json.body use html tags: {}.", tags))
    }
}

impl Default for PolicyConfig {
    fn default() -> Self {
        PolicyBuilder::default().resolve()
    }
}

/// Builder for [`PolicyConfig`].
#[derive(Debug, Clone)]
pub struct PolicyBuilder {
    model_tier: ModelTier,
    language: String,
    max_body_length: u32,
    markup_enabled: bool,
    allowed_tags: Vec<String>,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self {
            model_tier: ModelTier::default(),
            language: DEFAULT_LANGUAGE.to_string(),
            max_body_length: DEFAULT_MAX_BODY_LENGTH,
            markup_enabled: true,
            allowed_tags: Vec::new(),
        }
    }
}

impl PolicyBuilder {
    pub fn model_tier(mut self, tier: ModelTier) -> Self {
        self.model_tier = tier;
        self
    }

    /// ISO language code the body must be written in. Blank values keep the default.
    pub fn language(mut self, language: impl Into<String>) -> Self {
        let language = language.into();
        if !language.trim().is_empty() {
            self.language = language.trim().to_string();
        }
        self
    }

    pub fn max_body_length(mut self, length: u32) -> Self {
        self.max_body_length = length;
        self
    }

    pub fn markup(mut self, enabled: bool) -> Self {
        self.markup_enabled = enabled;
        self
    }

    /// Explicit markup subset. An empty set falls back to [`DEFAULT_ALLOWED_TAGS`].
    pub fn allowed_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn build(self) -> Result<PolicyConfig> {
        if self.max_body_length == 0 {
            return Err(Error::Config(
                "max body length must be a positive number".to_string(),
            ));
        }
        Ok(self.resolve())
    }

    fn resolve(self) -> PolicyConfig {
        let allowed_tags = match (self.markup_enabled, self.allowed_tags.is_empty()) {
            (false, _) => Vec::new(),
            (true, true) => DEFAULT_ALLOWED_TAGS.iter().map(|t| t.to_string()).collect(),
            (true, false) => self.allowed_tags,
        };

        PolicyConfig {
            model_tier: self.model_tier,
            language: self.language,
            max_body_length: self.max_body_length,
            markup_enabled: self.markup_enabled,
            allowed_tags,
        }
    }
}
