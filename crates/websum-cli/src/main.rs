use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use websum_client::{BackendOptions, HtmlExtractor, ReqwestFetcher, SummaryBackend};
use websum_core::config::{OLLAMA_HOST, OPENAI_BASE_URL};
use websum_core::{AppError, BackendChoice, PromptBuilder, Summarizer, failure_summary};

mod output;

#[derive(Parser, Debug)]
#[command(
    name = "websum",
    version,
    about = "Summarize website content using OpenAI's gpt-4o-mini or Ollama with llama3.2",
    after_help = "Examples:\n  websum https://anthropic.com\n  websum https://example.com --output summary.md\n\n\
If no OpenAI API key is found, websum uses Ollama with llama3.2.\n\
Make sure Ollama is running on localhost:11434 for local model usage."
)]
struct Cli {
    /// The URL of the website to summarize
    url: String,

    /// Output file to save the summary (default: print to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,

    /// Truncate the summary to this many characters
    #[arg(long)]
    max_length: Option<usize>,

    /// Keep navigation, header and footer text when extracting the page
    #[arg(long, default_value_t = false)]
    keep_layout: bool,

    /// Replace the default system prompt
    #[arg(long)]
    system_prompt: Option<String>,

    /// Replace the default user prompt ({title} and {content} are filled in)
    #[arg(long)]
    user_prompt: Option<String>,

    /// OpenAI API key; when absent the local Ollama backend is used
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// OpenAI-compatible API base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = OPENAI_BASE_URL)]
    openai_base_url: String,

    /// Ollama server address
    #[arg(long, env = "OLLAMA_HOST", default_value = OLLAMA_HOST)]
    ollama_host: String,

    /// Give up on a generation call after this many seconds (default: no limit)
    #[arg(long)]
    llm_timeout: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env if present; its values win over the process environment.
    let _ = dotenvy::dotenv_override();

    let cli = Cli::parse();

    let directive = if cli.verbose {
        "websum=debug"
    } else {
        "websum=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Misconfigured credentials end the process here with exit code 1.
    let choice = BackendChoice::resolve(cli.api_key.as_deref())?;

    // Client setup failures are reported like any other per-URL failure.
    let summary = match build_summarizer(&cli, &choice) {
        Ok(summarizer) => {
            tracing::debug!("Summarizing: {}", cli.url);
            tracing::debug!("Using model: {}", summarizer.model_description());
            summarizer.summarize_url(&cli.url).await
        }
        Err(e) => {
            tracing::warn!(error = %e, "Could not set up HTTP clients");
            failure_summary(&cli.url, &e)
        }
    };
    output::emit(&summary, cli.output.as_deref());

    Ok(())
}

fn build_summarizer(
    cli: &Cli,
    choice: &BackendChoice,
) -> Result<Summarizer<ReqwestFetcher, HtmlExtractor, SummaryBackend>, AppError> {
    let options = BackendOptions {
        openai_base_url: cli.openai_base_url.clone(),
        ollama_host: cli.ollama_host.clone(),
        llm_timeout: cli.llm_timeout.map(Duration::from_secs),
    };
    let backend = SummaryBackend::from_choice(choice, &options)?;

    let extractor = if cli.keep_layout {
        HtmlExtractor::keep_layout()
    } else {
        HtmlExtractor::new()
    };

    let mut prompts = PromptBuilder::new();
    if let Some(system) = &cli.system_prompt {
        prompts = prompts.with_system_prompt(system);
    }
    if let Some(user) = &cli.user_prompt {
        prompts = prompts.with_user_template(user);
    }

    Ok(Summarizer::new(ReqwestFetcher::new()?, extractor, backend)
        .with_prompts(prompts)
        .with_max_length(cli.max_length))
}
