use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::application::ChatClient;
use crate::domain::{
    ChatMessage, Choice, DomainError, PromptRequest, PromptResponse, ResponseMessage, Role,
};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
const BASE_URL_VAR: &str = "OPENAI_BASE_URL";
const MODEL_VAR: &str = "OPENAI_MODEL";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
/// Matches the request budget of the official OpenAI SDKs.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// Chat Completions request payload.
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> ApiRequest<'a> {
    fn new(model: &'a str, messages: &'a [ChatMessage]) -> Self {
        Self {
            model,
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role().as_str(),
                    content: m.content(),
                })
                .collect(),
        }
    }
}

/// Minimal subset of the Chat Completions response we care about.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    #[serde(default)]
    message: Option<ApiResponseMessage>,
}

#[derive(Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

impl ApiResponse {
    fn into_prompt_response(self) -> PromptResponse {
        let choices = self
            .choices
            .into_iter()
            .map(|choice| {
                let (role, content) = match choice.message {
                    Some(message) => (parse_role(message.role.as_deref()), message.content),
                    None => (Role::Assistant, None),
                };
                Choice::new(ResponseMessage::new(role, content))
            })
            .collect();
        PromptResponse::new(choices)
    }
}

/// First non-blank of `cli_model` and `env_model`, else [`DEFAULT_MODEL`].
pub fn resolve_model(cli_model: Option<String>, env_model: Option<String>) -> String {
    cli_model
        .filter(|m| !m.trim().is_empty())
        .or_else(|| env_model.filter(|m| !m.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_MODEL.to_string())
}

fn parse_role(role: Option<&str>) -> Role {
    match role {
        Some("system") => Role::System,
        Some("user") => Role::User,
        _ => Role::Assistant,
    }
}

/// HTTP client for the OpenAI Chat Completions API (and compatible endpoints).
///
/// Implements [`ChatClient`] so the prompt use cases stay decoupled from
/// transport and serialization details.
///
/// Configuration comes from the environment:
///
/// | Variable          | Default                  | Purpose                     |
/// |-------------------|--------------------------|-----------------------------|
/// | `OPENAI_API_KEY`  | none                     | Bearer credential           |
/// | `OPENAI_BASE_URL` | `https://api.openai.com` | Any compatible server       |
/// | `OPENAI_MODEL`    | `gpt-4`                  | Model used by the runners   |
///
/// A missing key is not an error at construction time. It surfaces as
/// [`DomainError::MissingCredential`] from [`ChatClient::complete`], before any
/// connection is opened.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    api_key: Option<String>,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiChatClient {
    pub fn new(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(DEFAULT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            url,
        }
    }

    pub fn from_env() -> Self {
        let key = std::env::var(API_KEY_VAR).ok();
        let base =
            std::env::var(BASE_URL_VAR).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, base)
    }

    /// Model id from `cli_model`, then `OPENAI_MODEL`, then [`DEFAULT_MODEL`].
    pub fn configured_model(cli_model: Option<String>) -> String {
        resolve_model(cli_model, std::env::var(MODEL_VAR).ok())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl ChatClient for OpenAiChatClient {
    async fn complete(&self, request: &PromptRequest) -> Result<PromptResponse, DomainError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            DomainError::missing_credential(format!("{API_KEY_VAR} is not set"))
        })?;

        let messages = request.messages();
        let payload = ApiRequest::new(request.model(), &messages);

        debug!(
            "OpenAiChatClient: POST {} model={} prompt_chars={}",
            self.url,
            request.model(),
            request.user_message().len()
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("OpenAiChatClient: request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenAiChatClient: API returned {status}: {body}");
            return Err(DomainError::transport(format!(
                "OpenAiChatClient: API returned {status}"
            )));
        }

        let body = response.text().await.map_err(|e| {
            DomainError::transport(format!("OpenAiChatClient: failed to read response: {e}"))
        })?;

        let api_response: ApiResponse = serde_json::from_str(&body).map_err(|e| {
            DomainError::malformed_response(format!(
                "OpenAiChatClient: failed to parse response: {e}"
            ))
        })?;

        debug!(
            "OpenAiChatClient: received {} choice(s)",
            api_response.choices.len()
        );

        Ok(api_response.into_prompt_response())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> PromptResponse {
        serde_json::from_str::<ApiResponse>(json)
            .unwrap()
            .into_prompt_response()
    }

    #[test]
    fn new_joins_base_url_and_path() {
        let client = OpenAiChatClient::new(None, "http://localhost:8080/");
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let client = OpenAiChatClient::new(Some("  ".to_string()), DEFAULT_BASE_URL);
        assert!(!client.has_api_key());
    }

    #[test]
    fn resolve_model_prefers_cli_then_env_then_default() {
        assert_eq!(
            resolve_model(Some("gpt-4o".into()), Some("gpt-3.5-turbo".into())),
            "gpt-4o"
        );
        assert_eq!(resolve_model(None, Some("gpt-3.5-turbo".into())), "gpt-3.5-turbo");
        assert_eq!(resolve_model(None, None), "gpt-4");
    }

    #[test]
    fn resolve_model_skips_blank_values() {
        assert_eq!(resolve_model(None, Some("   ".into())), DEFAULT_MODEL);
        assert_eq!(resolve_model(Some("".into()), Some("gpt-4o".into())), "gpt-4o");
    }

    // Every test touching the process environment lives here so they cannot race.
    #[test]
    fn from_env_reads_base_url_key_and_model() {
        let saved: Vec<(&str, Option<String>)> = [API_KEY_VAR, BASE_URL_VAR, MODEL_VAR]
            .into_iter()
            .map(|var| (var, std::env::var(var).ok()))
            .collect();

        std::env::remove_var(API_KEY_VAR);
        std::env::remove_var(BASE_URL_VAR);
        std::env::remove_var(MODEL_VAR);
        let client = OpenAiChatClient::from_env();
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
        assert!(!client.has_api_key());
        assert_eq!(OpenAiChatClient::configured_model(None), "gpt-4");

        std::env::set_var(API_KEY_VAR, "sk-env");
        std::env::set_var(BASE_URL_VAR, "http://localhost:1234/");
        std::env::set_var(MODEL_VAR, "gpt-4o-mini");
        let client = OpenAiChatClient::from_env();
        assert_eq!(client.url(), "http://localhost:1234/v1/chat/completions");
        assert!(client.has_api_key());
        assert_eq!(OpenAiChatClient::configured_model(None), "gpt-4o-mini");
        assert_eq!(
            OpenAiChatClient::configured_model(Some("gpt-4-turbo".into())),
            "gpt-4-turbo"
        );

        std::env::set_var(MODEL_VAR, "  ");
        assert_eq!(OpenAiChatClient::configured_model(None), "gpt-4");

        for (var, value) in saved {
            match value {
                Some(v) => std::env::set_var(var, v),
                None => std::env::remove_var(var),
            }
        }
    }

    #[test]
    fn request_payload_has_model_and_ordered_messages() {
        let request = PromptRequest::new("gpt-4", "You are a helpful code assistant.", "hi");
        let messages = request.messages();
        let payload = serde_json::to_value(ApiRequest::new(request.model(), &messages)).unwrap();

        assert_eq!(
            payload,
            serde_json::json!({
                "model": "gpt-4",
                "messages": [
                    {"role": "system", "content": "You are a helpful code assistant."},
                    {"role": "user", "content": "hi"}
                ]
            })
        );
    }

    #[test]
    fn response_maps_first_choice_content() {
        let response = parse(
            r#"{
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "choices": [
                    {"index": 0, "message": {"role": "assistant", "content": "<div/>"}, "finish_reason": "stop"}
                ],
                "usage": {"prompt_tokens": 5, "completion_tokens": 2, "total_tokens": 7}
            }"#,
        );
        assert_eq!(response.first_content().unwrap(), "<div/>");
        assert_eq!(response.choices()[0].message().role(), Role::Assistant);
    }

    #[test]
    fn response_without_choices_is_malformed() {
        let response = parse(r#"{"id": "chatcmpl-1"}"#);
        assert!(response.first_content().unwrap_err().is_malformed_response());
    }

    #[test]
    fn response_with_null_content_is_malformed() {
        let response = parse(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#);
        assert!(response.first_content().unwrap_err().is_malformed_response());
    }

    #[tokio::test]
    async fn complete_without_key_fails_before_sending() {
        // Port 9 (discard) is never contacted: the key check comes first.
        let client = OpenAiChatClient::new(None, "http://127.0.0.1:9");
        let request = PromptRequest::new("gpt-4", "sys", "user");

        let err = client.complete(&request).await.unwrap_err();
        assert!(err.is_missing_credential());
    }
}
