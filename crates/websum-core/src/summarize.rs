use crate::error::AppError;
use crate::models::Request;
use crate::prompt::PromptBuilder;
use crate::traits::{Extractor, Fetcher, Generator};
use crate::util::{format_summary, validate_url};

/// Text returned in place of a summary when `url` could not be prepared.
pub fn failure_summary(url: &str, error: &AppError) -> String {
    format!("Error summarizing {url}: {error}")
}

/// Orchestrates the summarization pipeline: validate → fetch → extract → build → generate.
///
/// Generic over all external collaborators via traits, so it can be exercised
/// without real HTTP or model calls. Every public entry point returns a
/// `String`: failures come back as text prefixed with `Error summarizing`.
pub struct Summarizer<F, X, G>
where
    F: Fetcher,
    X: Extractor,
    G: Generator,
{
    fetcher: F,
    extractor: X,
    generator: G,
    prompts: PromptBuilder,
    max_length: Option<usize>,
}

impl<F, X, G> Summarizer<F, X, G>
where
    F: Fetcher,
    X: Extractor,
    G: Generator,
{
    pub fn new(fetcher: F, extractor: X, generator: G) -> Self {
        Self {
            fetcher,
            extractor,
            generator,
            prompts: PromptBuilder::new(),
            max_length: None,
        }
    }

    /// Prompt overrides applied to every request.
    pub fn with_prompts(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    /// Cap successful summaries to `max_length` characters (plus `...`).
    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    /// Human-readable backend and model, e.g. "Ollama llama3.2:latest".
    pub fn model_description(&self) -> String {
        format!("{} {}", self.generator.name(), self.generator.model())
    }

    /// Summarize `url` with the configured prompts.
    pub async fn summarize_url(&self, url: &str) -> String {
        self.run(url, &self.prompts).await
    }

    /// Summarize `url`, overriding either prompt for this call only.
    ///
    /// `user_prompt` is a template; see [`PromptBuilder`].
    pub async fn summarize_with_custom_prompt(
        &self,
        url: &str,
        system_prompt: Option<&str>,
        user_prompt: Option<&str>,
    ) -> String {
        let mut overrides = PromptBuilder::new();
        if let Some(system) = system_prompt {
            overrides = overrides.with_system_prompt(system);
        }
        if let Some(user) = user_prompt {
            overrides = overrides.with_user_template(user);
        }
        self.run(url, &self.prompts.merged(&overrides)).await
    }

    async fn run(&self, url: &str, prompts: &PromptBuilder) -> String {
        let request = match self.prepare(url, prompts).await {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!(%url, error = %e, "Could not prepare summarization request");
                return failure_summary(url, &e);
            }
        };

        tracing::info!(model = %self.model_description(), "Generating summary");
        match self.generator.generate(&request).await {
            Ok(summary) => {
                tracing::info!(chars = summary.chars().count(), "Summary generated");
                format_summary(&summary, self.max_length)
            }
            Err(e) => {
                tracing::warn!(backend = %self.generator.name(), error = %e, "Generation failed");
                format!("Error summarizing with {}: {e}", self.generator.name())
            }
        }
    }

    async fn prepare(&self, url: &str, prompts: &PromptBuilder) -> Result<Request, AppError> {
        if !validate_url(url) {
            return Err(AppError::InvalidUrl(url.to_string()));
        }

        tracing::info!("Fetching {}", url);
        let html = self.fetcher.fetch(url).await?;
        tracing::info!("Fetched {} bytes of HTML", html.len());

        let page = self.extractor.extract(url, &html)?;
        tracing::debug!(%page, "Extracted page content");

        Ok(prompts.build(&page))
    }
}
