use std::time::Duration;

use websum_core::config::{BackendChoice, OLLAMA_HOST, OPENAI_BASE_URL};
use websum_core::error::AppError;
use websum_core::models::Request;
use websum_core::traits::Generator;

use crate::ollama::OllamaGenerator;
use crate::openai::OpenAiGenerator;

/// Endpoint and timeout settings for building a [`SummaryBackend`].
#[derive(Debug, Clone)]
pub struct BackendOptions {
    pub openai_base_url: String,
    pub ollama_host: String,
    /// Per-call generation timeout; `None` waits as long as the backend does.
    pub llm_timeout: Option<Duration>,
}

impl Default for BackendOptions {
    fn default() -> Self {
        Self {
            openai_base_url: OPENAI_BASE_URL.to_string(),
            ollama_host: OLLAMA_HOST.to_string(),
            llm_timeout: None,
        }
    }
}

/// The generation backend picked at startup.
///
/// Built once from a [`BackendChoice`]; every request goes through the same
/// variant for the life of the process.
#[derive(Clone)]
pub enum SummaryBackend {
    Hosted(OpenAiGenerator),
    Local(OllamaGenerator),
}

impl SummaryBackend {
    pub fn from_choice(choice: &BackendChoice, options: &BackendOptions) -> Result<Self, AppError> {
        let backend = match choice {
            BackendChoice::Hosted { api_key } => {
                let generator = OpenAiGenerator::with_base_url(api_key, &options.openai_base_url)?;
                SummaryBackend::Hosted(match options.llm_timeout {
                    Some(t) => generator.with_timeout(t),
                    None => generator,
                })
            }
            BackendChoice::Local => {
                let generator = OllamaGenerator::with_host(&options.ollama_host)?;
                SummaryBackend::Local(match options.llm_timeout {
                    Some(t) => generator.with_timeout(t),
                    None => generator,
                })
            }
        };

        tracing::debug!(backend = %backend.name(), model = %backend.model(), "Backend ready");
        Ok(backend)
    }
}

impl Generator for SummaryBackend {
    fn name(&self) -> &str {
        match self {
            SummaryBackend::Hosted(g) => g.name(),
            SummaryBackend::Local(g) => g.name(),
        }
    }

    fn model(&self) -> &str {
        match self {
            SummaryBackend::Hosted(g) => g.model(),
            SummaryBackend::Local(g) => g.model(),
        }
    }

    async fn generate(&self, request: &Request) -> Result<String, AppError> {
        match self {
            SummaryBackend::Hosted(g) => g.generate(request).await,
            SummaryBackend::Local(g) => g.generate(request).await,
        }
    }
}
