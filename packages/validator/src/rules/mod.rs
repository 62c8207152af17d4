mod image_path;
mod link_url;

pub use image_path::ImagePathRule;
pub use link_url::LinkUrlRule;

use crate::issue::ValidationIssue;
use url::Url;

/// Trait for rules applied to every string-valued member during the
/// recursive link/image scan
pub trait ScanRule: Send + Sync {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check one string member; `key` is the member name, `path` its location
    fn check_string(&self, key: &str, value: &str, path: &str) -> Option<ValidationIssue>;
}

/// Registry of scan rules, run in registration order
pub struct RuleRegistry {
    rules: Vec<Box<dyn ScanRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![Box::new(LinkUrlRule), Box::new(ImagePathRule)],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn ScanRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn ScanRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.rules.iter().map(|r| r.name()).collect();
        f.debug_struct("RuleRegistry").field("rules", &names).finish()
    }
}

/// True when `value` parses as an absolute `http`/`https` URL
pub fn is_absolute_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absolute_urls() {
        assert!(is_absolute_http_url("https://example.com/cv.pdf"));
        assert!(is_absolute_http_url("http://localhost:3000"));
        assert!(!is_absolute_http_url("ftp://example.com"));
        assert!(!is_absolute_http_url("mailto:me@example.com"));
        assert!(!is_absolute_http_url("/images/me.png"));
        assert!(!is_absolute_http_url("not-a-url"));
    }

    #[test]
    fn test_default_registry_order() {
        let registry = RuleRegistry::default();
        let names: Vec<&str> = registry.rules().iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["link-url", "image-path"]);
        assert!(RuleRegistry::empty().rules().is_empty());
    }
}
