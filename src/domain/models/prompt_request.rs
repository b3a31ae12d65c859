use super::ChatMessage;
use crate::domain::DomainError;

/// A single system + user prompt addressed to one model.
///
/// Built once per run and never mutated; [`PromptRequest::messages`] yields the
/// ordered message list a chat-completion endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest {
    model: String,
    system_message: String,
    user_message: String,
}

impl PromptRequest {
    pub fn new(
        model: impl Into<String>,
        system_message: impl Into<String>,
        user_message: impl Into<String>,
    ) -> Self {
        Self {
            model: model.into(),
            system_message: system_message.into(),
            user_message: user_message.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn system_message(&self) -> &str {
        &self.system_message
    }

    pub fn user_message(&self) -> &str {
        &self.user_message
    }

    /// The system message followed by the user message.
    pub fn messages(&self) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(&self.system_message),
            ChatMessage::user(&self.user_message),
        ]
    }

    /// Both messages must be non-empty and the model id non-blank before the
    /// request is sent. Whitespace-only messages are sent as-is.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.model.trim().is_empty() {
            return Err(DomainError::invalid_input("model identifier is empty"));
        }
        if self.system_message.is_empty() {
            return Err(DomainError::invalid_input("system message is empty"));
        }
        if self.user_message.is_empty() {
            return Err(DomainError::invalid_input("user message is empty"));
        }
        Ok(())
    }
}
