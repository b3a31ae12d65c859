use super::Role;
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMessage {
    role: Role,
    content: Option<String>,
}

impl ResponseMessage {
    pub fn new(role: Role, content: Option<String>) -> Self {
        Self { role, content }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    message: ResponseMessage,
}

impl Choice {
    pub fn new(message: ResponseMessage) -> Self {
        Self { message }
    }

    pub fn message(&self) -> &ResponseMessage {
        &self.message
    }
}

/// The result of one chat completion. Only the first choice's content is read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptResponse {
    choices: Vec<Choice>,
}

impl PromptResponse {
    pub fn new(choices: Vec<Choice>) -> Self {
        Self { choices }
    }

    /// A response holding a single assistant choice with `text` as content.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self::new(vec![Choice::new(ResponseMessage::new(
            Role::Assistant,
            Some(text.into()),
        ))])
    }

    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    pub fn first_content(&self) -> Result<&str, DomainError> {
        let choice = self
            .choices
            .first()
            .ok_or_else(|| DomainError::malformed_response("response contains no choices"))?;

        choice.message().content().ok_or_else(|| {
            DomainError::malformed_response("first choice has no message content")
        })
    }
}
