use crate::issue::ValidationIssue;
use crate::rules::RuleRegistry;
use crate::schema::schema_for;
use folio_common::{member_path, CmsDocId, Visitor, ROOT_PATH};
use serde_json::{Map, Value};

/// Options for configuring validation
#[derive(Debug, Default)]
pub struct ValidateOptions {
    /// Custom scan rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,
}

/// Validate a candidate value as the document named by `doc_id`.
///
/// Structural issues come first, in schema declaration order, followed by
/// the link/image scan in document traversal order. Never fails: a wrong
/// root type is reported as a single `$` error.
pub fn validate(doc_id: CmsDocId, value: &Value) -> Vec<ValidationIssue> {
    validate_with(doc_id, value, ValidateOptions::default())
}

/// Validate with a custom rule registry
pub fn validate_with(doc_id: CmsDocId, value: &Value, options: ValidateOptions) -> Vec<ValidationIssue> {
    let Some(object) = value.as_object() else {
        return vec![ValidationIssue::error(ROOT_PATH, "Document must be an object.")];
    };

    let registry = options.registry.unwrap_or_default();
    let mut issues = check_required_fields(doc_id, object);

    let mut scan = ScanVisitor {
        registry: &registry,
        issues: Vec::new(),
    };
    scan.visit_object(object, ROOT_PATH);
    issues.extend(scan.issues);

    issues
}

/// One error per missing or wrong-kind required field
fn check_required_fields(doc_id: CmsDocId, object: &Map<String, Value>) -> Vec<ValidationIssue> {
    schema_for(doc_id)
        .iter()
        .filter(|spec| !object.get(spec.name).is_some_and(|v| spec.kind.matches(v)))
        .map(|spec| {
            ValidationIssue::error(
                member_path(ROOT_PATH, spec.name),
                format!("{} must be {}.", spec.name, spec.kind.describe()),
            )
        })
        .collect()
}

/// Runs every scan rule over each string member of the document
struct ScanVisitor<'a> {
    registry: &'a RuleRegistry,
    issues: Vec<ValidationIssue>,
}

impl Visitor for ScanVisitor<'_> {
    fn visit_string_member(&mut self, key: &str, value: &str, path: &str) {
        for rule in self.registry.rules() {
            if let Some(issue) = rule.check_string(key, value, path) {
                self.issues.push(issue);
            }
        }
    }
}
