pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod summarize;
pub mod traits;
pub mod util;

#[cfg(test)]
mod testutil;

pub use config::BackendChoice;
pub use error::AppError;
pub use models::{Message, NO_TITLE, PageContent, Request, Role};
pub use prompt::PromptBuilder;
pub use summarize::{Summarizer, failure_summary};
pub use traits::{Extractor, Fetcher, Generator};
pub use util::{format_summary, validate_url};
