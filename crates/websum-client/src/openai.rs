use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use websum_core::config::{OPENAI_BASE_URL, OPENAI_MODEL};
use websum_core::error::AppError;
use websum_core::models::{Message, Request};
use websum_core::traits::Generator;

/// OpenAI chat-completions client used as the hosted summarization backend.
///
/// Works with any OpenAI-compatible API; the base URL defaults to
/// `https://api.openai.com/v1`. No timeout is applied unless one is set with
/// [`with_timeout`](Self::with_timeout).
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
    timeout: Option<Duration>,
}

impl OpenAiGenerator {
    pub fn new(api_key: &str) -> Result<Self, AppError> {
        Self::with_base_url(api_key, OPENAI_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: OPENAI_MODEL.to_string(),
            timeout: None,
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

// ---- OpenAI API types ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl Generator for OpenAiGenerator {
    fn name(&self) -> &str {
        "OpenAI"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &Request) -> Result<String, AppError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &self.model,
            messages: request.messages(),
        };

        let mut call = self.client.post(&url).bearer_auth(&self.api_key).json(&body);
        if let Some(timeout) = self.timeout {
            call = call.timeout(timeout);
        }

        let response = call.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout.map(|t| t.as_secs()).unwrap_or_default())
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            if status_code == 429 {
                return Err(AppError::RateLimitExceeded);
            }

            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or_else(|_| format!("HTTP {status_code}: {body}"));

            return Err(AppError::Llm {
                message,
                status_code,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse LLM response: {e}")))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| AppError::Llm {
                message: "Empty response from LLM".into(),
                status_code: 200,
            })
    }
}
