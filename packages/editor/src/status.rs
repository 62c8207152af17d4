//! Operator-facing status line.
//!
//! Every failure maps to one short, specific message; there is no generic
//! fallback.

use serde::Serialize;

pub const ACCESS_DENIED: &str = "Access denied: you are not authorized to access the CMS.";
pub const ACCESS_CHECK_FAILED: &str = "Failed to verify access. Please try again.";
pub const CREDENTIALS_REQUIRED: &str = "Email and password are required.";
pub const EMAIL_SIGN_IN_FAILED: &str = "Email sign-in failed. Check your credentials.";
pub const FEDERATED_SIGN_IN_FAILED: &str = "Google sign-in failed. Please try again.";
pub const LOAD_FAILED: &str = "Failed to load document.";
pub const INVALID_JSON: &str = "Invalid JSON. Fix format before saving.";
pub const NO_CHANGES: &str = "No changes to save.";
pub const SAVE_FAILED: &str = "Save failed. Check your permissions and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Info,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == StatusKind::Error
    }

    pub fn validation_failed(errors: usize) -> Self {
        Self::error(format!(
            "Validation failed: {} error(s). Resolve validation errors before saving.",
            errors
        ))
    }

    pub fn saved(collection: &str, doc_id: impl std::fmt::Display) -> Self {
        Self::success(format!("Saved {}/{} successfully.", collection, doc_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            Status::validation_failed(3).message,
            "Validation failed: 3 error(s). Resolve validation errors before saving."
        );
        let saved = Status::saved("siteContent", "hero");
        assert_eq!(saved.message, "Saved siteContent/hero successfully.");
        assert!(!saved.is_error());
        assert!(Status::error(SAVE_FAILED).is_error());
    }
}
