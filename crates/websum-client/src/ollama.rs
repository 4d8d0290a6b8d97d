//! Local Ollama backend: inventory lookup, on-demand model pull, and chat.

use std::collections::BTreeSet;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use websum_core::config::{OLLAMA_HOST, OLLAMA_MODEL};
use websum_core::error::AppError;
use websum_core::models::{Message, Request};
use websum_core::traits::Generator;

/// Set of model names installed on an Ollama server.
///
/// Built from whichever inventory shape the server returns. Names without a
/// tag are stored as `name:latest`, matching how Ollama resolves them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelInventory {
    names: BTreeSet<String>,
}

/// One inventory entry: an object carrying a `model` attribute, a
/// dictionary-style entry with only `name`, or a bare string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelDescriptor {
    Model { model: String },
    Named { name: String },
    Bare(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InventoryPayload {
    Wrapped { models: Vec<ModelDescriptor> },
    Bare(Vec<ModelDescriptor>),
}

impl ModelInventory {
    pub fn from_json(body: &str) -> Result<Self, AppError> {
        let payload: InventoryPayload = serde_json::from_str(body)?;
        let descriptors = match payload {
            InventoryPayload::Wrapped { models } => models,
            InventoryPayload::Bare(models) => models,
        };

        Ok(descriptors
            .into_iter()
            .map(|d| match d {
                ModelDescriptor::Model { model } => model,
                ModelDescriptor::Named { name } => name,
                ModelDescriptor::Bare(name) => name,
            })
            .collect())
    }

    pub fn contains(&self, model: &str) -> bool {
        self.names.contains(&canonical_name(model))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<String> for ModelInventory {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .filter(|n| !n.trim().is_empty())
                .map(|n| canonical_name(&n))
                .collect(),
        }
    }
}

fn canonical_name(name: &str) -> String {
    let name = name.trim();
    if name.contains(':') {
        name.to_string()
    } else {
        format!("{name}:latest")
    }
}

// ---- Ollama API types ----

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Serialize)]
struct PullRequest<'a> {
    model: &'a str,
    stream: bool,
}

#[derive(Deserialize)]
struct PullStatus {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    completed: Option<u64>,
    #[serde(default)]
    total: Option<u64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Ollama client used as the local summarization backend.
///
/// Before each chat call the model is looked up in the server's inventory and
/// pulled when missing. The pull has no deadline; chat calls only time out
/// when [`with_timeout`](Self::with_timeout) is set.
#[derive(Clone)]
pub struct OllamaGenerator {
    client: Client,
    host: String,
    model: String,
    timeout: Option<Duration>,
}

impl OllamaGenerator {
    pub fn new() -> Result<Self, AppError> {
        Self::with_host(OLLAMA_HOST)
    }

    pub fn with_host(host: &str) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            host: host.trim_end_matches('/').to_string(),
            model: OLLAMA_MODEL.to_string(),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn connect_error(&self, e: reqwest::Error) -> AppError {
        if e.is_connect() {
            AppError::NetworkError(format!(
                "Could not connect to Ollama. Please ensure Ollama is running on {}",
                self.host
            ))
        } else if e.is_timeout() {
            AppError::Timeout(self.timeout.map(|t| t.as_secs()).unwrap_or_default())
        } else {
            AppError::HttpError(e.to_string())
        }
    }

    /// Fetch the names of the models installed on the server.
    pub async fn list_models(&self) -> Result<ModelInventory, AppError> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.host))
            .send()
            .await
            .map_err(|e| self.connect_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} listing Ollama models",
                status.as_u16()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read model list: {e}")))?;
        ModelInventory::from_json(&body)
    }

    /// Pull the configured model, logging each new status line as it streams in.
    pub async fn pull_model(&self) -> Result<(), AppError> {
        let unavailable = |reason: String| AppError::ModelUnavailable {
            model: self.model.clone(),
            reason,
        };

        let mut response = self
            .client
            .post(format!("{}/api/pull", self.host))
            .json(&PullRequest {
                model: &self.model,
                stream: true,
            })
            .send()
            .await
            .map_err(|e| unavailable(self.connect_error(e).to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let reason = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {}", status.as_u16()));
            return Err(unavailable(reason));
        }

        let mut buffer: Vec<u8> = Vec::new();
        let mut last_status = String::new();
        loop {
            let chunk = response
                .chunk()
                .await
                .map_err(|e| unavailable(format!("pull stream interrupted: {e}")))?;
            let done = chunk.is_none();
            if let Some(bytes) = chunk {
                buffer.extend_from_slice(&bytes);
            } else if !buffer.is_empty() {
                // Last line may lack a trailing newline.
                buffer.push(b'\n');
            }

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                let line = String::from_utf8_lossy(&line);
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }

                let update: PullStatus = serde_json::from_str(line)
                    .map_err(|e| unavailable(format!("unreadable pull status: {e}")))?;
                if let Some(error) = update.error {
                    return Err(unavailable(error));
                }
                let status = update.status.unwrap_or_else(|| "Unknown".to_string());
                if let (Some(completed), Some(total)) = (update.completed, update.total)
                    && total > 0
                {
                    tracing::debug!(
                        model = %self.model,
                        %status,
                        percent = completed * 100 / total,
                        "Pulling model"
                    );
                }
                if status != last_status {
                    tracing::info!(model = %self.model, %status, "Pulling model");
                    last_status = status;
                }
            }

            if done {
                break;
            }
        }

        tracing::info!(model = %self.model, "Model pulled successfully");
        Ok(())
    }

    /// Make sure the configured model is installed, pulling it when it is not
    /// (or when the inventory cannot be read).
    pub async fn ensure_model(&self) -> Result<(), AppError> {
        match self.list_models().await {
            Ok(inventory) if inventory.contains(&self.model) => Ok(()),
            Ok(inventory) => {
                tracing::info!(
                    model = %self.model,
                    installed = inventory.len(),
                    "Model not found. Attempting to pull it..."
                );
                self.pull_model().await
            }
            Err(e) => {
                tracing::warn!(error = %e, model = %self.model, "Error listing models; attempting to pull directly");
                self.pull_model().await
            }
        }
    }
}

impl Generator for OllamaGenerator {
    fn name(&self) -> &str {
        "Ollama"
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &Request) -> Result<String, AppError> {
        self.ensure_model().await?;

        let mut call = self
            .client
            .post(format!("{}/api/chat", self.host))
            .json(&ChatRequest {
                model: &self.model,
                messages: request.messages(),
                stream: false,
            });
        if let Some(timeout) = self.timeout {
            call = call.timeout(timeout);
        }

        let response = call.send().await.map_err(|e| self.connect_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let status_code = status.as_u16();
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {status_code}: {body}"));
            return Err(AppError::Llm {
                message,
                status_code,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to parse Ollama response: {e}")))?;

        Ok(chat.message.content)
    }
}
