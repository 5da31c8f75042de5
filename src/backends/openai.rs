//! OpenAI API client implementation
//!
//! Speaks the `chat/completions` wire format, which most hosted and
//! self-hosted inference servers accept, so this one backend covers
//! any OpenAI-compatible endpoint via `base_url`.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatMessage, ChatProvider, ChatResponse, ChatRole};
use crate::error::DebateError;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Client for an OpenAI-compatible chat API.
#[derive(Debug)]
pub struct OpenAI {
    api_key: SecretString,
    base_url: reqwest::Url,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_seconds: Option<u64>,
    client: reqwest::Client,
}

/// Request payload for the chat completions endpoint.
#[derive(Serialize, Debug)]
struct OpenAIChatRequest<'a> {
    model: &'a str,
    messages: Vec<OpenAIChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize, Debug)]
struct OpenAIChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize, Debug)]
pub struct OpenAIChatResponse {
    choices: Vec<OpenAIChatChoice>,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatChoice {
    message: OpenAIChatMsg,
}

#[derive(Deserialize, Debug)]
struct OpenAIChatMsg {
    content: Option<String>,
}

impl std::fmt::Display for OpenAIChatResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.text() {
            Some(text) => write!(f, "{text}"),
            None => write!(f, "No response content"),
        }
    }
}

impl ChatResponse for OpenAIChatResponse {
    fn text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.clone())
    }
}

impl OpenAI {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - API key; must not be empty
    /// * `base_url` - Endpoint base URL (defaults to the OpenAI API)
    /// * `model` - Model to use
    /// * `temperature` - Sampling temperature
    /// * `max_tokens` - Maximum tokens to generate
    /// * `timeout_seconds` - Request timeout in seconds
    pub fn new(
        api_key: impl Into<String>,
        base_url: Option<String>,
        model: Option<String>,
        temperature: Option<f32>,
        max_tokens: Option<u32>,
        timeout_seconds: Option<u64>,
    ) -> Result<Self, DebateError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DebateError::AuthError("Missing OpenAI API key".to_string()));
        }
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = reqwest::Url::parse(&base_url)
            .map_err(|e| DebateError::InvalidRequest(format!("invalid base URL: {e}")))?;
        Ok(Self {
            api_key: SecretString::new(api_key),
            base_url,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature,
            max_tokens,
            timeout_seconds,
            client: reqwest::Client::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    fn completions_url(&self) -> Result<reqwest::Url, DebateError> {
        self.base_url
            .join("chat/completions")
            .map_err(|e| DebateError::HttpError(e.to_string()))
    }

    fn apply_timeout(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.timeout_seconds {
            Some(timeout) => request.timeout(Duration::from_secs(timeout)),
            None => request,
        }
    }

    fn log_request_payload<T: Serialize>(&self, label: &str, body: &T) {
        if !log::log_enabled!(log::Level::Trace) {
            return;
        }
        if let Ok(json) = serde_json::to_string(body) {
            log::trace!("{label}: {json}");
        }
    }

    async fn ensure_success_response(
        &self,
        response: reqwest::Response,
        context: &str,
    ) -> Result<reqwest::Response, DebateError> {
        log::debug!("{context} HTTP status: {}", response.status());
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let error_text = response.text().await?;
        Err(DebateError::ResponseFormatError {
            message: format!("{context} returned error status: {status}"),
            raw_response: error_text,
        })
    }
}

fn wire_role(role: ChatRole) -> &'static str {
    match role {
        ChatRole::System => "system",
        ChatRole::User => "user",
        ChatRole::Assistant => "assistant",
    }
}

#[async_trait]
impl ChatProvider for OpenAI {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<Box<dyn ChatResponse>, DebateError> {
        const CONTEXT: &str = "OpenAI chat API";

        let body = OpenAIChatRequest {
            model: &self.model,
            messages: messages
                .iter()
                .map(|msg| OpenAIChatMessage {
                    role: wire_role(msg.role),
                    content: &msg.content,
                })
                .collect(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };
        self.log_request_payload(CONTEXT, &body);

        let url = self.completions_url()?;
        let mut request = self
            .client
            .post(url)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body);
        request = self.apply_timeout(request);

        let response = request.send().await?;
        let response = self.ensure_success_response(response, CONTEXT).await?;
        let resp_text = response.text().await?;
        let parsed: OpenAIChatResponse =
            serde_json::from_str(&resp_text).map_err(|e| DebateError::ResponseFormatError {
                message: format!("Failed to decode {CONTEXT} response: {e}"),
                raw_response: resp_text,
            })?;
        Ok(Box::new(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_for(server: &mockito::ServerGuard) -> OpenAI {
        OpenAI::new(
            "test-key",
            Some(format!("{}/", server.url())),
            Some("test-model".to_string()),
            Some(0.0),
            None,
            None,
        )
        .expect("client")
    }

    #[test]
    fn new_rejects_empty_api_key() {
        let err = OpenAI::new("", None, None, None, None, None).unwrap_err();
        assert!(matches!(err, DebateError::AuthError(_)));
    }

    #[tokio::test]
    async fn chat_maps_roles_and_returns_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "test-model",
                "messages": [
                    {"role": "system", "content": "persona"},
                    {"role": "user", "content": "argue"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices": [{"message": {"content": "my argument"}}]}"#)
            .create_async()
            .await;

        let client = client_for(&server);
        let messages = [
            ChatMessage::system().content("persona").build(),
            ChatMessage::user().content("argue").build(),
        ];
        let response = client.chat(&messages).await.expect("chat");
        assert_eq!(response.text().as_deref(), Some("my argument"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn chat_surfaces_error_status_with_raw_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body("rate limited")
            .create_async()
            .await;

        let client = client_for(&server);
        let err = client.chat(&[]).await.unwrap_err();
        match err {
            DebateError::ResponseFormatError { raw_response, .. } => {
                assert_eq!(raw_response, "rate limited");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
