pub mod backend;
pub mod extractor;
pub mod fetcher;
pub mod ollama;
pub mod openai;

#[cfg(test)]
mod test_support;

pub use backend::{BackendOptions, SummaryBackend};
pub use extractor::HtmlExtractor;
pub use fetcher::ReqwestFetcher;
pub use ollama::{ModelInventory, OllamaGenerator};
pub use openai::OpenAiGenerator;
