mod issue;
mod rules;
mod schema;
mod validator;

pub use issue::{IssueLevel, ValidationIssue, ValidationSummary};
pub use rules::{is_absolute_http_url, ImagePathRule, LinkUrlRule, RuleRegistry, ScanRule};
pub use schema::{schema_for, FieldKind, FieldSpec};
pub use validator::{validate, validate_with, ValidateOptions};
