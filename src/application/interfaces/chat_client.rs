use async_trait::async_trait;

use crate::domain::{DomainError, PromptRequest, PromptResponse};

/// An interface for sending a chat-style prompt to an LLM and receiving its completion.
///
/// Implementors encapsulate credentials, transport, serialization, and
/// vendor-specific API details. The prompt use cases only ever see
/// [`PromptRequest`] and [`PromptResponse`], so they can run against a scripted
/// client in tests instead of a live endpoint.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the request's `system` and `user` messages to `request.model()` and
    /// return the raw completion.
    async fn complete(&self, request: &PromptRequest) -> Result<PromptResponse, DomainError>;
}
