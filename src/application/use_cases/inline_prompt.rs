use std::io::Write;
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{DomainError, PromptRequest};

pub const INLINE_SYSTEM_PROMPT: &str = "You are a helpful code assistant.";
pub const INLINE_USER_PROMPT: &str =
    "Generate Svelte code for a 3x3 image grid with drag-and-drop support.";

/// Use case for sending the built-in prompt and printing the model's answer as-is.
pub struct InlinePromptUseCase {
    client: Arc<dyn ChatClient>,
    model: String,
}

impl InlinePromptUseCase {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn request(&self) -> PromptRequest {
        PromptRequest::new(&self.model, INLINE_SYSTEM_PROMPT, INLINE_USER_PROMPT)
    }

    /// Writes the completion text to `out` untrimmed, followed by a newline,
    /// and returns it.
    pub async fn execute(&self, out: &mut dyn Write) -> Result<String, DomainError> {
        let request = self.request();
        request.validate()?;

        info!("Requesting inline completion from {}", self.model);
        let response = self.client.complete(&request).await?;
        let text = response.first_content()?;
        debug!("Inline completion returned {} bytes", text.len());

        writeln!(out, "{text}")?;
        out.flush()?;

        Ok(text.to_string())
    }
}
