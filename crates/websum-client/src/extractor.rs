use std::sync::LazyLock;

use scraper::{ElementRef, Html, Node, Selector};
use websum_core::error::AppError;
use websum_core::models::PageContent;
use websum_core::traits::Extractor;

/// Elements that never carry readable content.
const CONTENT_FREE_TAGS: [&str; 4] = ["script", "style", "img", "input"];
/// Page chrome, dropped unless the extractor is built with [`HtmlExtractor::keep_layout`].
const LAYOUT_TAGS: [&str; 3] = ["nav", "footer", "header"];

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("title").expect("valid title selector"));
static BODY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("valid body selector"));

/// Title and visible-text extractor using the `scraper` HTML parser.
///
/// Text nodes are trimmed and joined with newlines. Anything inside a removed
/// element (script, style, img, input, and by default nav/footer/header) is
/// skipped. Text comes from `<body>` when there is one, else the whole document.
#[derive(Debug, Clone)]
pub struct HtmlExtractor {
    removed_tags: Vec<String>,
}

impl HtmlExtractor {
    pub fn new() -> Self {
        Self::with_removed_tags(CONTENT_FREE_TAGS.iter().chain(LAYOUT_TAGS.iter()).copied())
    }

    /// Keep navigation, header and footer text.
    pub fn keep_layout() -> Self {
        Self::with_removed_tags(CONTENT_FREE_TAGS)
    }

    pub fn with_removed_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            removed_tags: tags
                .into_iter()
                .map(|t| t.into().to_ascii_lowercase())
                .collect(),
        }
    }

    fn is_removed(&self, tag: &str) -> bool {
        self.removed_tags.iter().any(|t| t == tag)
    }

    /// Depth-first walk over `root`'s descendants, in document order.
    ///
    /// Uses an explicit stack so arbitrarily deep markup cannot exhaust the
    /// thread stack.
    fn collect_text(&self, root: ElementRef<'_>) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<_> = root.children().rev().collect();

        while let Some(node) = stack.pop() {
            match node.value() {
                Node::Text(text) => {
                    let trimmed = text.trim();
                    if !trimmed.is_empty() {
                        out.push(trimmed.to_string());
                    }
                }
                Node::Element(el) if self.is_removed(el.name()) => {}
                Node::Element(_) => stack.extend(node.children().rev()),
                _ => {}
            }
        }

        out
    }
}

impl Default for HtmlExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for HtmlExtractor {
    fn extract(&self, url: &str, html: &str) -> Result<PageContent, AppError> {
        let document = Html::parse_document(html);

        let title = document
            .select(&TITLE)
            .next()
            .map(|el| el.text().collect::<String>());

        let root = document
            .select(&BODY)
            .next()
            .unwrap_or_else(|| document.root_element());

        let text = self.collect_text(root).join("\n");

        tracing::debug!(
            html_bytes = html.len(),
            text_bytes = text.len(),
            "Extracted visible text"
        );

        Ok(PageContent::new(url, title, text))
    }
}
