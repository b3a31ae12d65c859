use std::sync::Mutex;

use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{DomainError, PromptRequest, PromptResponse};

enum MockReply {
    Echo,
    Response(PromptResponse),
    Fail(String),
}

/// A [`ChatClient`] that never touches the network.
///
/// Every request it receives is recorded, so callers can assert on the exact
/// messages sent and on how many calls were made. By default it echoes the
/// user message back; [`MockChatClient::with_reply`] and friends script a fixed
/// answer instead.
pub struct MockChatClient {
    reply: MockReply,
    requests: Mutex<Vec<PromptRequest>>,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::with_reply_kind(MockReply::Echo)
    }

    pub fn with_reply(text: impl Into<String>) -> Self {
        Self::with_response(PromptResponse::from_text(text))
    }

    pub fn with_response(response: PromptResponse) -> Self {
        Self::with_reply_kind(MockReply::Response(response))
    }

    /// Every call fails with a transport error carrying `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply_kind(MockReply::Fail(message.into()))
    }

    fn with_reply_kind(reply: MockReply) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.lock().len()
    }

    pub fn requests(&self) -> Vec<PromptRequest> {
        self.lock().clone()
    }

    pub fn last_request(&self) -> Option<PromptRequest> {
        self.lock().last().cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<PromptRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn complete(&self, request: &PromptRequest) -> Result<PromptResponse, DomainError> {
        self.lock().push(request.clone());
        debug!("MockChatClient: recorded request for model {}", request.model());

        match &self.reply {
            MockReply::Echo => Ok(PromptResponse::from_text(format!(
                "[mock:{}] {}",
                request.model(),
                request.user_message()
            ))),
            MockReply::Response(response) => Ok(response.clone()),
            MockReply::Fail(message) => Err(DomainError::transport(message.clone())),
        }
    }
}
