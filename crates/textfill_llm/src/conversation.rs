//! Conversation builder: policy directives first, context second, instruction last.

use serde_json::Value;
use tracing::debug;

use crate::policy::PolicyConfig;
use crate::types::{Message, Role};

/// Ordered, role-tagged messages for one generation cycle.
///
/// Directives derived from the policy are added at construction. After the
/// sequence has been emptied (by [`reset`](Self::reset) or by the client
/// taking it), the directives are synthesized again before the next message is
/// appended, so every conversation that reaches the endpoint starts with them.
#[derive(Debug, Clone)]
pub struct ConversationBuilder {
    policy: PolicyConfig,
    messages: Vec<Message>,
}

impl ConversationBuilder {
    pub fn new(policy: PolicyConfig) -> Self {
        let messages = policy.directives();
        Self { policy, messages }
    }

    pub fn policy(&self) -> &PolicyConfig {
        &self.policy
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Append a message when `content` is text. Anything else (null, numbers,
    /// objects) is dropped and `false` is returned.
    pub fn add_message(&mut self, role: Role, content: impl Into<Value>) -> bool {
        match content.into() {
            Value::String(text) => {
                if self.messages.is_empty() {
                    self.messages = self.policy.directives();
                }
                self.messages.push(Message::new(role, text));
                true
            }
            other => {
                debug!(
                    role = %role,
                    kind = value_kind(&other),
                    "Dropping non-text message content"
                );
                false
            }
        }
    }

    /// Append the user's instruction.
    pub fn add_instruction(&mut self, content: impl Into<Value>) -> bool {
        self.add_message(Role::User, content)
    }

    /// Empty the message sequence. The policy is kept.
    pub fn reset(&mut self) {
        self.messages.clear();
    }

    /// Move the messages out, leaving the builder empty.
    pub fn take_messages(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn plain_policy() -> PolicyConfig {
        PolicyConfig::builder().markup(false).build().unwrap()
    }

    #[test]
    fn test_new_builder_holds_directives() {
        let builder = ConversationBuilder::new(plain_policy());
        assert_eq!(builder.len(), 3);

        let builder = ConversationBuilder::new(PolicyConfig::default());
        assert_eq!(builder.len(), 4);
    }

    #[test]
    fn test_add_instruction_appends_user_message() {
        let mut builder = ConversationBuilder::new(plain_policy());
        assert!(builder.add_instruction("Describe the flat"));

        let last = builder.messages().last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "Describe the flat");
    }

    #[test]
    fn test_non_text_content_is_dropped() {
        let mut builder = ConversationBuilder::new(plain_policy());
        let before = builder.len();

        assert!(!builder.add_message(Role::System, Value::Null));
        assert!(!builder.add_message(Role::User, 42));
        assert!(!builder.add_message(Role::User, json!({"text": "hi"})));
        assert!(!builder.add_message(Role::System, None::<String>));

        assert_eq!(builder.len(), before);
    }

    #[test]
    fn test_optional_text_is_appended() {
        let mut builder = ConversationBuilder::new(plain_policy());
        assert!(builder.add_message(Role::System, Some("You are a copywriter")));
        assert_eq!(builder.len(), 4);
    }

    #[test]
    fn test_reset_then_append_restores_directives() {
        let mut builder = ConversationBuilder::new(plain_policy());
        builder.add_instruction("first");
        builder.reset();
        assert!(builder.is_empty());

        builder.add_instruction("second");
        assert_eq!(builder.len(), 4);
        assert_eq!(builder.messages()[0].content, "Your language (iso): en");
        assert_eq!(builder.messages()[3].content, "second");
    }

    #[test]
    fn test_take_messages_empties_builder() {
        let mut builder = ConversationBuilder::new(plain_policy());
        builder.add_instruction("hello");

        let taken = builder.take_messages();
        assert_eq!(taken.len(), 4);
        assert!(builder.is_empty());
    }
}
