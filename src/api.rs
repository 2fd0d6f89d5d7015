//! OpenAI-compatible completion client

use crate::config::Config;
use crate::error::{AppError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, instrument};

/// Role in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a new system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// OpenAI API request
#[derive(Debug, Serialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

/// OpenAI API response choice
#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
    #[allow(dead_code)]
    finish_reason: Option<String>,
    #[allow(dead_code)]
    index: usize,
}

/// OpenAI API response
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[allow(dead_code)]
    id: String,
    #[allow(dead_code)]
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

/// Token usage information
#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// OpenAI API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(rename = "type")]
    #[allow(dead_code)]
    error_type: Option<String>,
}

/// Outcome of a single completion exchange
#[derive(Debug)]
pub struct Completion {
    /// Reply text from the model
    pub reply: String,
    /// Tokens consumed by the prompt
    pub prompt_tokens: u32,
    /// Tokens produced in the reply
    pub completion_tokens: u32,
    /// Wall-clock time spent on the exchange
    pub elapsed: Duration,
}

/// OpenAI API client
pub struct OpenAIClient {
    client: Client,
    config: Config,
}

impl OpenAIClient {
    /// Create a new client with the configured request timeout
    pub fn new(config: Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    /// Send one completion request and return the reply with its metadata.
    ///
    /// The system message is omitted when `system_prompt` is empty, so a
    /// missing `prompts.txt` never injects a blank instruction.
    #[instrument(skip(self, system_prompt, user_prompt))]
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<Completion> {
        let mut messages = Vec::with_capacity(2);
        if !system_prompt.is_empty() {
            messages.push(Message::system(system_prompt));
        }
        messages.push(Message::user(user_prompt));

        let request = CompletionRequest {
            model: self.config.model.clone(),
            messages,
            max_tokens: self.config.max_tokens,
            temperature: 0.7,
        };

        debug!(model = %request.model, "Sending completion request");

        let started = Instant::now();

        let response = self
            .client
            .post(self.config.api_url())
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key()?),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await?;

            // Provider errors come back as JSON when the endpoint is sane
            let message = serde_json::from_str::<ErrorResponse>(&error_text)
                .map_or(error_text, |e| e.error.message);

            return match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    Err(AppError::AuthRejected(message))
                }
                _ => Err(AppError::ApiError {
                    message: format!("API request failed with status {status}: {message}"),
                }),
            };
        }

        let response: CompletionResponse = response.json().await?;
        let elapsed = started.elapsed();

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ApiError {
                message: "No response choices available".to_string(),
            })?;

        let usage = response.usage.unwrap_or_default();

        debug!(
            prompt_tokens = usage.prompt_tokens,
            completion_tokens = usage.completion_tokens,
            elapsed_ms = elapsed.as_millis() as u64,
            "Completion received"
        );

        Ok(Completion {
            reply: choice.message.content,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            elapsed,
        })
    }
}
