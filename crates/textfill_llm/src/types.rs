//! Message and model types shared by the builder, the client and transports.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Author of a message in the conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A role-tagged piece of the prompt. Position in the conversation is its priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Cheaper or more capable generation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelTier {
    #[default]
    Basic,
    Advanced,
}

impl ModelTier {
    /// Model identifier sent to the chat completions endpoint.
    pub fn model_id(&self) -> &'static str {
        match self {
            ModelTier::Basic => "gpt-3.5-turbo",
            ModelTier::Advanced => "gpt-4",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelTier::Basic => "basic",
            ModelTier::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ModelTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelTier {
    type Err = Error;

    /// Accepts tier names as well as the legacy version numbers `3` and `4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" | "3" => Ok(ModelTier::Basic),
            "advanced" | "4" => Ok(ModelTier::Advanced),
            other => Err(Error::Config(format!(
                "unknown model tier '{}' (expected basic, advanced, 3 or 4)",
                other
            ))),
        }
    }
}

/// Token accounting reported by the endpoint, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

impl Usage {
    pub fn add(&mut self, other: &Usage) {
        self.prompt_tokens += other.prompt_tokens;
        self.completion_tokens += other.completion_tokens;
        self.total_tokens += other.total_tokens;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&Message::assistant("hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn test_model_tier_from_version_numbers() {
        assert_eq!("3".parse::<ModelTier>().unwrap(), ModelTier::Basic);
        assert_eq!("4".parse::<ModelTier>().unwrap(), ModelTier::Advanced);
        assert_eq!(" Advanced ".parse::<ModelTier>().unwrap(), ModelTier::Advanced);
        assert!("5".parse::<ModelTier>().is_err());
    }

    #[test]
    fn test_model_ids() {
        assert_eq!(ModelTier::Basic.model_id(), "gpt-3.5-turbo");
        assert_eq!(ModelTier::Advanced.model_id(), "gpt-4");
    }
}
