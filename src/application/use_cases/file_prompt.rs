use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::application::ChatClient;
use crate::domain::{DomainError, PromptRequest};

pub const FILE_SYSTEM_PROMPT: &str = "You are a helpful developer assistant.";
pub const DEFAULT_PROMPT_PATH: &str = "scripts/prompt.txt";
pub const DEFAULT_OUTPUT_PATH: &str = "src/lib/GeneratedComponent.svelte";

/// Use case for generating a file from a prompt stored on disk.
///
/// The prompt file is read in full and sent verbatim as the user message. The
/// trimmed completion replaces the output file, which is only touched once a
/// completion has been obtained.
pub struct FilePromptUseCase {
    client: Arc<dyn ChatClient>,
    model: String,
    prompt_path: PathBuf,
    output_path: PathBuf,
}

impl FilePromptUseCase {
    pub fn new(client: Arc<dyn ChatClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            prompt_path: PathBuf::from(DEFAULT_PROMPT_PATH),
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
        }
    }

    pub fn with_prompt_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.prompt_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    pub fn prompt_path(&self) -> &Path {
        &self.prompt_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub async fn execute(&self, out: &mut dyn Write) -> Result<PathBuf, DomainError> {
        let prompt = self.read_prompt().await?;
        let request = PromptRequest::new(&self.model, FILE_SYSTEM_PROMPT, prompt);
        request.validate()?;

        info!(
            "Requesting completion from {} for {}",
            self.model,
            self.prompt_path.display()
        );
        let response = self.client.complete(&request).await?;
        let code = response.first_content()?.trim();
        debug!("Completion returned {} bytes after trimming", code.len());

        tokio::fs::write(&self.output_path, code)
            .await
            .map_err(|e| {
                std::io::Error::new(e.kind(), format!("{}: {e}", self.output_path.display()))
            })?;
        info!("Wrote {}", self.output_path.display());

        writeln!(out, "✅ Code written to {}", self.output_path.display())?;
        out.flush()?;

        Ok(self.output_path.clone())
    }

    async fn read_prompt(&self) -> Result<String, DomainError> {
        tokio::fs::read_to_string(&self.prompt_path)
            .await
            .map_err(|e| {
                DomainError::file_not_found(format!("{}: {e}", self.prompt_path.display()))
            })
    }
}
