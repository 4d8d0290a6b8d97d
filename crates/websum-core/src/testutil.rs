//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. They use
//! `Arc<Mutex<_>>` so tests can assert on recorded calls.

use std::sync::{Arc, Mutex};

use crate::error::AppError;
use crate::models::{PageContent, Request};
use crate::traits::{Extractor, Fetcher, Generator};

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// Mock fetcher that returns a configurable response and records URLs.
#[derive(Clone)]
pub struct MockFetcher {
    response: Arc<Mutex<Option<Result<String, AppError>>>>,
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockFetcher {
    pub fn new(html: &str) -> Self {
        Self {
            response: Arc::new(Mutex::new(Some(Ok(html.to_string())))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            response: Arc::new(Mutex::new(Some(Err(error)))),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.calls.lock().unwrap().push(url.to_string());
        self.response
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("<html><body>default</body></html>".to_string()))
    }
}

// ---------------------------------------------------------------------------
// MockExtractor
// ---------------------------------------------------------------------------

/// Mock extractor that ignores the HTML and returns fixed content.
#[derive(Clone)]
pub struct MockExtractor {
    page: PageContent,
    error: Arc<Mutex<Option<AppError>>>,
}

impl MockExtractor {
    pub fn new(page: PageContent) -> Self {
        Self {
            page,
            error: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            page: PageContent::new("", None, ""),
            error: Arc::new(Mutex::new(Some(error))),
        }
    }
}

impl Extractor for MockExtractor {
    fn extract(&self, _url: &str, _html: &str) -> Result<PageContent, AppError> {
        if let Some(e) = self.error.lock().unwrap().take() {
            return Err(e);
        }
        Ok(self.page.clone())
    }
}

// ---------------------------------------------------------------------------
// MockGenerator
// ---------------------------------------------------------------------------

/// Mock generator that records requests and returns a fixed reply.
#[derive(Clone)]
pub struct MockGenerator {
    reply: Arc<Mutex<Option<Result<String, AppError>>>>,
    pub requests: Arc<Mutex<Vec<Request>>>,
}

impl MockGenerator {
    pub fn new(reply: &str) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Some(Ok(reply.to_string())))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_error(error: AppError) -> Self {
        Self {
            reply: Arc::new(Mutex::new(Some(Err(error)))),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Generator for MockGenerator {
    fn name(&self) -> &str {
        "Mock"
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    async fn generate(&self, request: &Request) -> Result<String, AppError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok("default summary".to_string()))
    }
}
