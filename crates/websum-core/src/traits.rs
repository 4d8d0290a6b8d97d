use std::future::Future;

use crate::error::AppError;
use crate::models::{PageContent, Request};

/// Fetches raw HTML content from a URL.
pub trait Fetcher: Send + Sync + Clone {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;
}

/// Turns raw HTML into a page's title and visible text.
pub trait Extractor: Send + Sync + Clone {
    fn extract(&self, url: &str, html: &str) -> Result<PageContent, AppError>;
}

/// A text-generation backend.
pub trait Generator: Send + Sync + Clone {
    /// Short backend label used in error strings (e.g. "OpenAI").
    fn name(&self) -> &str;

    /// Model identifier requests are sent to.
    fn model(&self) -> &str;

    /// Sends the two-message request and returns the generated text.
    fn generate(&self, request: &Request)
    -> impl Future<Output = Result<String, AppError>> + Send;
}
