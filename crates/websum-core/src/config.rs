use std::fmt;
use std::time::Duration;

use crate::error::AppError;

/// Hosted model used when an OpenAI key is configured.
pub const OPENAI_MODEL: &str = "gpt-4o-mini";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Local model used through Ollama otherwise.
pub const OLLAMA_MODEL: &str = "llama3.2:latest";
pub const OLLAMA_HOST: &str = "http://localhost:11434";

/// Prefix every accepted project key starts with.
pub const API_KEY_PREFIX: &str = "sk-proj-";

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

const KEY_PREFIX_MESSAGE: &str =
    "An API key was found, but it doesn't start sk-proj-; please check you're using the right key";
const KEY_WHITESPACE_MESSAGE: &str = "An API key was found, but it looks like it might have space or tab characters at the start or end";

/// Which generation backend serves this process.
///
/// Resolved once at startup and handed to the pipeline; never re-read.
#[derive(Clone, PartialEq, Eq)]
pub enum BackendChoice {
    /// OpenAI chat completions, authenticated with `api_key`.
    Hosted { api_key: String },
    /// A local Ollama server.
    Local,
}

impl BackendChoice {
    /// Decide the backend from the credential value, if any.
    ///
    /// - absent or empty: [`BackendChoice::Local`]
    /// - missing the `sk-proj-` prefix: [`AppError::Config`]
    /// - leading/trailing whitespace: [`AppError::Config`]
    /// - otherwise: [`BackendChoice::Hosted`]
    pub fn resolve(credential: Option<&str>) -> Result<Self, AppError> {
        let key = match credential {
            None | Some("") => {
                tracing::info!(
                    "No OpenAI API key found - will use Ollama with {} as fallback",
                    OLLAMA_MODEL
                );
                return Ok(BackendChoice::Local);
            }
            Some(key) => key,
        };

        if !key.starts_with(API_KEY_PREFIX) {
            return Err(AppError::Config(KEY_PREFIX_MESSAGE.into()));
        }

        if key.trim() != key {
            return Err(AppError::Config(KEY_WHITESPACE_MESSAGE.into()));
        }

        tracing::info!("OpenAI API key found and looks good!");
        Ok(BackendChoice::Hosted {
            api_key: key.to_string(),
        })
    }

    pub fn is_hosted(&self) -> bool {
        matches!(self, BackendChoice::Hosted { .. })
    }
}

impl fmt::Debug for BackendChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendChoice::Hosted { .. } => f
                .debug_struct("Hosted")
                .field("api_key", &"<redacted>")
                .finish(),
            BackendChoice::Local => f.write_str("Local"),
        }
    }
}
