use crate::issue::ValidationIssue;
use crate::rules::{is_absolute_http_url, ScanRule};
use regex::Regex;
use std::sync::OnceLock;

/// Warns when an image member is neither an absolute URL nor a
/// root-relative path
pub struct ImagePathRule;

fn image_key() -> &'static Regex {
    static IMAGE_KEY: OnceLock<Regex> = OnceLock::new();
    IMAGE_KEY.get_or_init(|| Regex::new(r"(?i)image").expect("valid image key pattern"))
}

impl ScanRule for ImagePathRule {
    fn name(&self) -> &'static str {
        "image-path"
    }

    fn description(&self) -> &'static str {
        "Image fields must be absolute URLs or start with '/'"
    }

    fn check_string(&self, key: &str, value: &str, path: &str) -> Option<ValidationIssue> {
        if !image_key().is_match(key)
            || value.trim().is_empty()
            || is_absolute_http_url(value)
            || value.starts_with('/')
        {
            return None;
        }
        Some(ValidationIssue::warning(
            path,
            "Image path should be an absolute URL or start with '/'.",
        ))
    }
}
