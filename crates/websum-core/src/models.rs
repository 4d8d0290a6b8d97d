use std::fmt;

use serde::Serialize;

/// Title used when a page has no (or an empty) `<title>` element.
pub const NO_TITLE: &str = "No title found";

/// Title and visible text extracted from a fetched page.
///
/// Built once per fetch and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    url: String,
    title: String,
    text: String,
}

impl PageContent {
    /// Create page content. A missing or blank title becomes [`NO_TITLE`].
    pub fn new(url: impl Into<String>, title: Option<String>, text: impl Into<String>) -> Self {
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| NO_TITLE.to_string());

        Self {
            url: url.into(),
            title,
            text: text.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for PageContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PageContent(url='{}', title='{}', text_length={})",
            self.url,
            self.title,
            self.text.chars().count()
        )
    }
}

/// Chat role of a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message, in the shape both backends accept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// A summarization request: one system message followed by one user message.
///
/// The pair is fixed at construction, so the ordering cannot be broken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    messages: [Message; 2],
}

impl Request {
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: [
                Message {
                    role: Role::System,
                    content: system.into(),
                },
                Message {
                    role: Role::User,
                    content: user.into(),
                },
            ],
        }
    }

    /// Both messages, system first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn system(&self) -> &Message {
        &self.messages[0]
    }

    pub fn user(&self) -> &Message {
        &self.messages[1]
    }
}
