//! Turns extracted page content into a two-message [`Request`].

use crate::models::{PageContent, Request};

pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an assistant that analyzes the contents of a website \
and provides a short summary, ignoring text that might be navigation related. \
Respond in markdown.";

/// Default user prompt. `{title}` and `{content}` are replaced with the page's
/// title and text.
pub const DEFAULT_USER_TEMPLATE: &str = "You are looking at a website titled {title}\n\
The contents of this website is as follows; \
please provide a short summary of this website in markdown. \
If it includes news or announcements, then summarize these too.\n\n\
{content}";

/// Builds summarization requests, with optional per-message overrides.
///
/// Both overrides are independent. A user override is a template: `{title}`
/// and `{content}` are filled in from the page, and text without placeholders
/// is sent verbatim. Nothing is truncated or escaped here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptBuilder {
    system_prompt: Option<String>,
    user_template: Option<String>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_user_template(mut self, template: impl Into<String>) -> Self {
        self.user_template = Some(template.into());
        self
    }

    /// Layer `other`'s overrides on top of this builder's.
    pub fn merged(&self, other: &PromptBuilder) -> PromptBuilder {
        PromptBuilder {
            system_prompt: other
                .system_prompt
                .clone()
                .or_else(|| self.system_prompt.clone()),
            user_template: other
                .user_template
                .clone()
                .or_else(|| self.user_template.clone()),
        }
    }

    pub fn build(&self, page: &PageContent) -> Request {
        let system = self
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        let template = self
            .user_template
            .as_deref()
            .unwrap_or(DEFAULT_USER_TEMPLATE);

        Request::new(system, render_template(template, page))
    }
}

/// Build the default request for a page.
pub fn build_request(page: &PageContent) -> Request {
    PromptBuilder::new().build(page)
}

/// Build a request from two explicit messages, both used verbatim.
pub fn build_custom_request(system_prompt: &str, user_prompt: &str) -> Request {
    Request::new(system_prompt, user_prompt)
}

pub fn default_system_prompt() -> &'static str {
    DEFAULT_SYSTEM_PROMPT
}

// Single pass so placeholder-like text inside the title is never re-expanded.
fn render_template(template: &str, page: &PageContent) -> String {
    let mut out = String::with_capacity(template.len() + page.title().len() + page.text().len());
    let mut rest = template;

    while let Some(pos) = rest.find('{') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];
        if let Some(after) = tail.strip_prefix("{title}") {
            out.push_str(page.title());
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{content}") {
            out.push_str(page.text());
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    fn page() -> PageContent {
        PageContent::new(
            "https://example.com",
            Some("Test Website".into()),
            "This is test content.",
        )
    }

    #[test]
    fn test_build_request_default() {
        let request = build_request(&page());
        let messages = request.messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[0].content, DEFAULT_SYSTEM_PROMPT);
        assert!(messages[1].content.contains("Test Website"));
        assert!(messages[1].content.contains("This is test content."));
        assert!(
            messages[1]
                .content
                .starts_with("You are looking at a website titled Test Website\n")
        );
    }

    #[test]
    fn test_user_message_is_not_truncated() {
        let body = "word ".repeat(50_000);
        let page = PageContent::new("https://example.com", None, body.clone());
        let request = build_request(&page);
        assert!(request.user().content.ends_with(&body));
    }

    #[test]
    fn test_build_custom_request() {
        let request = build_custom_request("You are a helpful assistant.", "Summarize this content.");
        assert_eq!(request.messages().len(), 2);
        assert_eq!(request.system().content, "You are a helpful assistant.");
        assert_eq!(request.user().content, "Summarize this content.");
    }

    #[test]
    fn test_default_system_prompt() {
        assert!(default_system_prompt().contains("assistant"));
        assert!(default_system_prompt().contains("markdown"));
    }

    #[test]
    fn test_system_override_keeps_default_user_message() {
        let request = PromptBuilder::new()
            .with_system_prompt("Be terse.")
            .build(&page());
        assert_eq!(request.system().content, "Be terse.");
        assert!(request.user().content.contains("This is test content."));
    }

    #[test]
    fn test_user_template_placeholders() {
        let request = PromptBuilder::new()
            .with_user_template("T={title} C={content} {other}")
            .build(&page());
        assert_eq!(request.system().content, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(
            request.user().content,
            "T=Test Website C=This is test content. {other}"
        );
    }

    #[test]
    fn test_title_with_braces_is_not_reexpanded() {
        let page = PageContent::new("https://example.com", Some("{content}".into()), "body");
        let request = PromptBuilder::new()
            .with_user_template("{title}|{content}")
            .build(&page);
        assert_eq!(request.user().content, "{content}|body");
    }

    #[test]
    fn test_merged_prefers_other() {
        let base = PromptBuilder::new()
            .with_system_prompt("base system")
            .with_user_template("base user");
        let merged = base.merged(&PromptBuilder::new().with_user_template("call user"));
        let request = merged.build(&page());
        assert_eq!(request.system().content, "base system");
        assert_eq!(request.user().content, "call user");
    }
}
