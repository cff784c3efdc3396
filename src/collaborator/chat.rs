//! OpenAI-compatible chat-completions client.

use super::TextGenerator;
use crate::core::ChromaError;
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for `ChatClient`.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    /// Base URL, without the trailing `/chat/completions`.
    pub api_base: String,
    /// Bearer token; requests go out unauthenticated when `None`.
    pub api_key: Option<String>,
    /// Model name placed in every request.
    pub model: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after a rate-limited or 5xx answer.
    pub max_retries: u32,
    /// Delay before the first retry.
    pub backoff_base: Duration,
    /// Upper bound for any single retry delay.
    pub backoff_max: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4-turbo".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
            backoff_max: Duration::from_secs(8),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Async HTTP client for a chat-completions endpoint.
pub struct ChatClient {
    http: Client,
    config: ChatConfig,
}

impl ChatClient {
    /// Builds the underlying `reqwest` client with the configured timeout.
    pub fn new(config: ChatConfig) -> Result<Self, ChromaError> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl TextGenerator for ChatClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ChromaError> {
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage { role: "system", content: system },
                ChatMessage { role: "user", content: user },
            ],
        };
        let url = self.endpoint();

        let mut attempt: u32 = 0;
        loop {
            let mut request = self.http.post(&url).json(&body);
            if let Some(key) = &self.config.api_key {
                request = request.bearer_auth(key);
            }

            let response = request.send().await?;
            let status = response.status();
            if status.is_success() {
                let parsed: ChatResponse = response.json().await?;
                debug!("chat completion received after {} retries", attempt);
                return parsed
                    .choices
                    .into_iter()
                    .next()
                    .map(|choice| choice.message.content.unwrap_or_default())
                    .ok_or_else(|| ChromaError::CollaboratorUnavailable {
                        message: "completion carried no choices".to_string(),
                    });
            }

            if is_retryable(status) && attempt < self.config.max_retries {
                let delay = with_jitter(backoff_delay(attempt, self.config.backoff_base, self.config.backoff_max));
                warn!("collaborator answered {}, retrying in {:?} (attempt {})", status, delay, attempt + 1);
                tokio::time::sleep(delay).await;
                attempt += 1;
                continue;
            }

            let detail = response.text().await.unwrap_or_default();
            return Err(ChromaError::CollaboratorUnavailable {
                message: format!("{} after {} retries: {}", status, attempt, detail.trim()),
            });
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

/// `base * 2^attempt`, capped at `max`.
pub(crate) fn backoff_delay(attempt: u32, base: Duration, max: Duration) -> Duration {
    let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
    base.saturating_mul(factor).min(max)
}

/// Adds up to 25% random jitter, saturating at `Duration::MAX`.
fn with_jitter(delay: Duration) -> Duration {
    let scaled = delay.as_secs_f64() * (1.0 + 0.25 * rand::random::<f64>());
    Duration::try_from_secs_f64(scaled).unwrap_or(Duration::MAX)
}
