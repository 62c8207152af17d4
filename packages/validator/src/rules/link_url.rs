use crate::issue::ValidationIssue;
use crate::rules::{is_absolute_http_url, ScanRule};
use regex::Regex;
use std::sync::OnceLock;

/// Warns when a link-like member does not hold an absolute http(s) URL.
///
/// Link-like means the member name contains "url", "href" or "link",
/// ignoring case. This is a name heuristic: `urlHash` is scanned too.
pub struct LinkUrlRule;

fn link_key() -> &'static Regex {
    static LINK_KEY: OnceLock<Regex> = OnceLock::new();
    LINK_KEY.get_or_init(|| Regex::new(r"(?i)url|href|link").expect("valid link key pattern"))
}

impl ScanRule for LinkUrlRule {
    fn name(&self) -> &'static str {
        "link-url"
    }

    fn description(&self) -> &'static str {
        "Link fields must hold absolute http or https URLs"
    }

    fn check_string(&self, key: &str, value: &str, path: &str) -> Option<ValidationIssue> {
        if !link_key().is_match(key) || value.trim().is_empty() || is_absolute_http_url(value) {
            return None;
        }
        Some(ValidationIssue::warning(path, "Invalid URL format."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueLevel;

    #[test]
    fn test_flags_relative_link() {
        let issue = LinkUrlRule
            .check_string("url", "not-a-url", "$.socialLinks[0].url")
            .unwrap();
        assert_eq!(issue.level, IssueLevel::Warning);
        assert_eq!(issue.path, "$.socialLinks[0].url");
        assert_eq!(issue.message, "Invalid URL format.");
    }

    #[test]
    fn test_key_match_ignores_case() {
        assert!(LinkUrlRule.check_string("resumeURL", "cv.pdf", "$.resumeURL").is_some());
        assert!(LinkUrlRule.check_string("HREF", "x", "$.HREF").is_some());
        assert!(LinkUrlRule.check_string("linkedIn", "x", "$.linkedIn").is_some());
    }

    #[test]
    fn test_skips_blank_and_valid_values() {
        assert!(LinkUrlRule.check_string("liveUrl", "   ", "$.liveUrl").is_none());
        assert!(LinkUrlRule.check_string("liveUrl", "", "$.liveUrl").is_none());
        assert!(LinkUrlRule
            .check_string("repoUrl", "https://github.com/me/repo", "$.repoUrl")
            .is_none());
    }

    #[test]
    fn test_ignores_other_keys() {
        assert!(LinkUrlRule.check_string("name", "not-a-url", "$.name").is_none());
    }
}
