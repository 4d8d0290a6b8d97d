use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use websum_core::config::{REQUEST_TIMEOUT, USER_AGENT};
use websum_core::error::AppError;
use websum_core::traits::Fetcher;

/// How far into the body a `<meta>` charset declaration is looked for.
const META_SNIFF_BYTES: usize = 1024;

/// HTTP fetcher using reqwest.
///
/// Downloads raw HTML with a browser User-Agent and a bounded timeout
/// (10 seconds by default). Any transport failure or non-2xx status is
/// reported as [`AppError::Fetch`] carrying the URL; nothing is retried.
///
/// The body is decoded with the `Content-Type` charset, else the charset
/// declared in a `<meta>` tag near the top of the document, else UTF-8.
/// A byte-order mark overrides both.
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            timeout_secs: timeout.as_secs(),
        })
    }
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::fetch(url, format!("timed out after {} seconds", self.timeout_secs))
            } else if e.is_connect() {
                AppError::fetch(url, format!("connection failed: {e}"))
            } else {
                AppError::fetch(url, e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(url, format!("HTTP {status}")));
        }

        let header_encoding = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .and_then(charset_from_content_type);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::fetch(url, format!("failed to read response body: {e}")))?;

        let encoding = header_encoding
            .or_else(|| sniff_meta_charset(&bytes))
            .unwrap_or(UTF_8);
        let (text, used, malformed) = encoding.decode(&bytes);
        if malformed {
            tracing::debug!(%url, encoding = used.name(), "Body contained invalid byte sequences");
        }

        Ok(text.into_owned())
    }
}

/// Encoding named by the `charset` parameter of a `Content-Type` value.
fn charset_from_content_type(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if !name.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim().trim_matches(|c| c == '"' || c == '\'').as_bytes())
    })
}

/// Encoding declared by a `<meta charset>` or `<meta http-equiv>` tag in the
/// first [`META_SNIFF_BYTES`] of the document.
fn sniff_meta_charset(body: &[u8]) -> Option<&'static Encoding> {
    let head = body[..body.len().min(META_SNIFF_BYTES)].to_ascii_lowercase();
    let mut rest = head.as_slice();

    while let Some(start) = find(rest, b"<meta") {
        let tag = &rest[start..];
        let end = tag.iter().position(|&b| b == b'>').unwrap_or(tag.len());
        if let Some(pos) = find(&tag[..end], b"charset=") {
            let value = &tag[pos + b"charset=".len()..end];
            let value = match value.first() {
                Some(b'"' | b'\'') => &value[1..],
                _ => value,
            };
            let len = value
                .iter()
                .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'/') || b.is_ascii_whitespace())
                .unwrap_or(value.len());
            if let Some(encoding) = Encoding::for_label(&value[..len]) {
                return Some(encoding);
            }
        }
        rest = &rest[start + end..];
    }

    None
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
