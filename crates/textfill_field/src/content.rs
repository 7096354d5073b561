//! `get_content`: one instruction in, one field value out.

use serde::Deserialize;
use textfill_llm::{ConversationBuilder, DEFAULT_TEMPERATURE, GenerationClient, PolicyConfig, Role};

use crate::error::Result;
use crate::settings::Settings;

/// Everything the field knows when it asks for new content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ContentRequest {
    pub instruction: String,
    /// Current value of the target attribute, offered as context.
    #[serde(default)]
    pub previous_content: Option<String>,
    pub max_body_length: u32,
    /// Extra system directive describing the writer's role.
    #[serde(default)]
    pub role_directive: Option<String>,
    #[serde(default)]
    pub allowed_tags: Vec<String>,
    #[serde(default)]
    pub markup_enabled: bool,
}

impl ContentRequest {
    pub fn new(instruction: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            previous_content: None,
            max_body_length: textfill_llm::policy::DEFAULT_MAX_BODY_LENGTH,
            role_directive: None,
            allowed_tags: Vec::new(),
            markup_enabled: false,
        }
    }

    pub fn with_previous_content(mut self, content: impl Into<String>) -> Self {
        self.previous_content = Some(content.into());
        self
    }

    pub fn with_max_body_length(mut self, length: u32) -> Self {
        self.max_body_length = length;
        self
    }

    pub fn with_role_directive(mut self, role: impl Into<String>) -> Self {
        self.role_directive = Some(role.into());
        self
    }

    pub fn with_markup<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markup_enabled = true;
        self.allowed_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn policy(&self, settings: &Settings) -> Result<PolicyConfig> {
        Ok(PolicyConfig::builder()
            .model_tier(settings.model_tier)
            .language(settings.language.clone())
            .max_body_length(self.max_body_length)
            .markup(self.markup_enabled)
            .allowed_tags(self.allowed_tags.iter().cloned())
            .build()?)
    }

    /// Directives, then the role directive, the previous content and finally
    /// the instruction. Blank role and previous content are left out.
    pub fn conversation(&self, settings: &Settings) -> Result<ConversationBuilder> {
        let mut conversation = ConversationBuilder::new(self.policy(settings)?);

        let role = self
            .role_directive
            .as_deref()
            .filter(|role| !role.trim().is_empty());
        conversation.add_message(Role::System, role);

        if let Some(previous) = self
            .previous_content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
        {
            conversation.add_message(Role::Assistant, format!("Previous content: {}", previous));
        }

        conversation.add_instruction(self.instruction.as_str());
        Ok(conversation)
    }
}

/// Generate content with a fresh OpenAI-backed client built from `settings`.
pub async fn get_content(settings: &Settings, request: &ContentRequest) -> Result<String> {
    let client = GenerationClient::new(settings.transport()?);
    get_content_with(&client, settings, request).await
}

/// Generate content through an existing client.
pub async fn get_content_with(
    client: &GenerationClient,
    settings: &Settings,
    request: &ContentRequest,
) -> Result<String> {
    let mut conversation = request.conversation(settings)?;
    Ok(client.generate(&mut conversation, DEFAULT_TEMPERATURE).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use textfill_llm::ModelTier;

    fn settings() -> Settings {
        Settings::new("k").with_language("fr")
    }

    #[test]
    fn test_conversation_order() {
        let request = ContentRequest::new("Describe the villa")
            .with_previous_content("Old text")
            .with_role_directive("You are a real estate agent")
            .with_markup(["p", "b"]);

        let conversation = request.conversation(&settings()).unwrap();
        let contents: Vec<&str> = conversation
            .messages()
            .iter()
            .map(|m| m.content.as_str())
            .collect();

        assert_eq!(contents.len(), 7);
        assert_eq!(contents[0], "Your language (iso): fr");
        assert_eq!(contents[3], "In json.body use html tags: <p>, <b>.");
        assert_eq!(contents[4], "You are a real estate agent");
        assert_eq!(contents[5], "Previous content: Old text");
        assert_eq!(contents[6], "Describe the villa");
        assert_eq!(conversation.messages()[5].role, Role::Assistant);
        assert_eq!(conversation.messages()[6].role, Role::User);
    }

    #[test]
    fn test_blank_role_and_previous_content_skipped() {
        let request = ContentRequest::new("Describe the villa")
            .with_previous_content("   ")
            .with_role_directive("");

        let conversation = request.conversation(&settings()).unwrap();
        assert_eq!(conversation.len(), 4);
    }

    #[test]
    fn test_policy_uses_settings_tier() {
        let settings = settings().with_model_tier(ModelTier::Advanced);
        let policy = ContentRequest::new("x").policy(&settings).unwrap();
        assert_eq!(policy.model_tier(), ModelTier::Advanced);
        assert!(!policy.markup_enabled());
        assert!(policy.allowed_tags().is_empty());
    }

    #[test]
    fn test_zero_length_is_config_error() {
        let result = ContentRequest::new("x").with_max_body_length(0).policy(&settings());
        assert!(result.is_err());
    }
}
