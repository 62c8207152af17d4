//! # Edit Buffer
//!
//! Raw JSON text of the selected document plus the result of the last
//! parse and validation pass. The text is kept verbatim even when it does
//! not parse, so no keystroke ever loses data.

use folio_common::{CmsDocId, ROOT_PATH};
use folio_validator::{validate, ValidationIssue, ValidationSummary};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct EditBuffer {
    doc_id: CmsDocId,
    text: String,
    parsed: Option<Value>,
    issues: Vec<ValidationIssue>,
}

impl EditBuffer {
    /// Create a buffer from raw text and run the first validation pass
    pub fn new(doc_id: CmsDocId, text: impl Into<String>) -> Self {
        let mut buffer = Self {
            doc_id,
            text: text.into(),
            parsed: None,
            issues: Vec::new(),
        };
        buffer.revalidate();
        buffer
    }

    /// Buffer showing a stored value; absent documents render as `{}`
    pub fn from_value(doc_id: CmsDocId, value: Option<&Value>, indent: usize) -> Self {
        Self::new(doc_id, pretty(value, indent))
    }

    /// Replace the text, then re-parse and re-validate
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        match serde_json::from_str::<Value>(&self.text) {
            Ok(value) => {
                self.issues = validate(self.doc_id, &value);
                self.parsed = Some(value);
            }
            Err(e) => {
                self.parsed = None;
                self.issues = vec![ValidationIssue::error(ROOT_PATH, e.to_string())];
            }
        }
    }

    pub fn doc_id(&self) -> CmsDocId {
        self.doc_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Parsed value, `None` while the text is not valid JSON
    pub fn parsed(&self) -> Option<&Value> {
        self.parsed.as_ref()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary::from(self.issues.as_slice())
    }
}

/// Pretty-print a document for editing
pub fn pretty(value: Option<&Value>, indent: usize) -> String {
    let empty = Value::Object(Default::default());
    let value = value.unwrap_or(&empty);

    let indent = " ".repeat(indent);
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
    match value.serialize(&mut serializer) {
        Ok(()) => String::from_utf8_lossy(&out).into_owned(),
        Err(_) => value.to_string(),
    }
}
