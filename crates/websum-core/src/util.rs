/// Check that `url` uses an http:// or https:// scheme.
///
/// Nothing beyond the prefix is validated.
pub fn validate_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Cut `summary` to `max_length` characters plus `...` when it is longer.
///
/// Lengths count characters, not bytes.
pub fn format_summary(summary: &str, max_length: Option<usize>) -> String {
    match max_length {
        Some(max) if summary.chars().count() > max => {
            let mut cut: String = summary.chars().take(max).collect();
            cut.push_str("...");
            cut
        }
        _ => summary.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url_valid() {
        for url in ["https://example.com", "http://test.org", "https://www.google.com/path", "https://x.com"] {
            assert!(validate_url(url), "{url} should be valid");
        }
    }

    #[test]
    fn test_validate_url_invalid() {
        for url in ["example.com", "ftp://example.com", "ftp://x.com", "not-a-url", ""] {
            assert!(!validate_url(url), "{url} should be invalid");
        }
    }

    #[test]
    fn test_format_summary_truncates() {
        let long_summary = "This is a very long summary that exceeds the maximum length limit.";
        let formatted = format_summary(long_summary, Some(20));
        assert_eq!(formatted.chars().count(), 23);
        assert!(formatted.ends_with("..."));
        assert!(formatted.starts_with(&long_summary[..20]));
    }

    #[test]
    fn test_format_summary_unchanged() {
        let summary = "short";
        assert_eq!(format_summary(summary, None), summary);
        assert_eq!(format_summary(summary, Some(5)), summary);
        assert_eq!(format_summary(summary, Some(100)), summary);
    }

    #[test]
    fn test_format_summary_counts_characters() {
        let formatted = format_summary("ééééé", Some(2));
        assert_eq!(formatted, "éé...");
    }
}
