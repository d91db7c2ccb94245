//! Chat-completion HTTP client.
//!
//! Talks to an OpenAI-compatible completions endpoint: one POST per
//! submitted message, carrying the full message history, a fixed model
//! identifier, and a sampling temperature. No retries, no streaming.

use crate::chat::{Message, Role};
use crate::config::Config;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Client for a chat-completion endpoint with bearer-token auth.
#[derive(Debug, Clone)]
pub struct CompletionClient {
    http: Client,
    api_url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl CompletionClient {
    /// Create a client from configuration and an API key.
    pub fn new(config: &Config, api_key: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
        }
    }

    /// The model identifier sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send the full message history and return the reply text.
    pub async fn complete(&self, history: &[Message]) -> Result<String, ClientError> {
        let body = CompletionRequest::new(history, &self.model, self.temperature);

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status,
                message: extract_error_message(&body_text),
            });
        }

        let parsed: CompletionResponse = response.json().await?;
        extract_reply(parsed)
    }
}

/// Errors from the completion client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport failure or undecodable response body.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status.
    #[error("completion endpoint returned {status}: {message}")]
    Status {
        status: StatusCode,
        message: String,
    },

    /// Response parsed but carried no reply content.
    #[error("completion response contained no reply")]
    EmptyReply,
}

#[derive(Debug, Serialize)]
struct CompletionRequest {
    messages: Vec<WireMessage>,
    model: String,
    temperature: f32,
}

impl CompletionRequest {
    fn new(history: &[Message], model: &str, temperature: f32) -> Self {
        Self {
            messages: history.iter().map(WireMessage::from).collect(),
            model: model.to_string(),
            temperature,
        }
    }
}

/// What actually crosses the wire: role and content only.
#[derive(Debug, Serialize)]
struct WireMessage {
    role: Role,
    content: String,
}

impl From<&Message> for WireMessage {
    fn from(msg: &Message) -> Self {
        Self {
            role: msg.role,
            content: msg.content.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn extract_reply(response: CompletionResponse) -> Result<String, ClientError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(ClientError::EmptyReply)
}

/// Pull the human-readable message out of an error body when it is the
/// usual `{"error": {"message": ...}}` shape, otherwise return it verbatim.
fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or_else(|_| body.to_string())
}
