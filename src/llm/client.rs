//! Chat-completion HTTP client.
//!
//! One POST per [`PromptRequest`], no retries. A failed call is surfaced as a
//! [`CompletionError`] and the user decides whether to regenerate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, Sampling};
use crate::error::CompletionError;

/// Output budget for commit messages and pull request titles.
pub const SHORT_RESPONSE_TOKENS: u32 = 100;

/// Output budget for pull request descriptions.
pub const DESCRIPTION_RESPONSE_TOKENS: u32 = 2000;

/// Maximum characters of an error response body kept in diagnostics.
const ERROR_BODY_EXCERPT: usize = 500;

/// A single completion request. Built fresh for every call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub model: String,
    pub message_text: String,
    pub temperature: f32,
    pub top_p: f32,
    pub max_tokens: u32,
    pub seed: u64,
}

impl PromptRequest {
    pub fn new(model: &str, message_text: String, sampling: Sampling, max_tokens: u32) -> Self {
        Self {
            model: model.to_string(),
            message_text,
            temperature: sampling.temperature,
            top_p: sampling.top_p,
            max_tokens,
            seed: sampling.seed,
        }
    }
}

/// Anything that can turn a prompt into completion text.
///
/// This abstraction lets the workflows run against a scripted backend in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Return the first completion's text, trimmed.
    async fn complete(&self, request: &PromptRequest) -> Result<String, CompletionError>;
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    top_p: f32,
    max_tokens: u32,
    stream: bool,
    safe_prompt: bool,
    random_seed: u64,
}

impl<'a> From<&'a PromptRequest> for ChatRequestBody<'a> {
    fn from(request: &'a PromptRequest) -> Self {
        Self {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.message_text,
            }],
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
            stream: false,
            safe_prompt: false,
            random_seed: request.seed,
        }
    }
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// [`CompletionBackend`] for OpenAI-style `/chat/completions` endpoints.
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ChatClient {
    pub fn new(config: &Config) -> Result<Self, CompletionError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(CompletionError::Client)?;

        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CompletionBackend for ChatClient {
    async fn complete(&self, request: &PromptRequest) -> Result<String, CompletionError> {
        debug!(
            "POST {} model={} prompt_chars={} max_tokens={}",
            self.endpoint,
            request.model,
            request.message_text.len(),
            request.max_tokens
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ChatRequestBody::from(request))
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        let body = response.text().await.map_err(CompletionError::Transport)?;

        if !status.is_success() {
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body: body.chars().take(ERROR_BODY_EXCERPT).collect(),
            });
        }

        parse_completion(&body)
    }
}

/// Extract `choices[0].message.content` from a response body.
fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::MalformedResponse("response has no choices".into()))?;

    let content = choice
        .message
        .content
        .ok_or_else(|| CompletionError::MalformedResponse("choice has no message content".into()))?;

    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(CompletionError::EmptyCompletion);
    }

    Ok(trimmed.to_string())
}
