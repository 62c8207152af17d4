use serde::{Deserialize, Serialize};

/// Severity of a validation issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueLevel {
    /// Blocks saving the document
    Error,
    /// Advisory only
    Warning,
}

/// One structural problem found in a candidate document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// The severity level
    pub level: IssueLevel,

    /// JSON-pointer-like location (`$`, `$.socialLinks[0].url`)
    pub path: String,

    /// Human-readable message
    pub message: String,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

/// Error and warning counts of one validation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub errors: usize,
    pub warnings: usize,
}

impl ValidationSummary {
    /// Any error-level issue blocks a save
    pub fn blocks_save(&self) -> bool {
        self.errors > 0
    }
}

impl From<&[ValidationIssue]> for ValidationSummary {
    fn from(issues: &[ValidationIssue]) -> Self {
        issues.iter().fold(Self::default(), |mut summary, issue| {
            match issue.level {
                IssueLevel::Error => summary.errors += 1,
                IssueLevel::Warning => summary.warnings += 1,
            }
            summary
        })
    }
}
