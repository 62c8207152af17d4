//! Required top-level fields per content document.
//!
//! Each document type is described by an ordered list of field specs and
//! checked by one generic structural pass. Optional fields are left out
//! of the tables entirely, so they are never flagged for absence.

use folio_common::CmsDocId;
use serde_json::Value;

/// Primitive kind a required field must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Array,
}

impl FieldKind {
    pub fn matches(self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Number => value.is_number(),
            FieldKind::Array => value.is_array(),
        }
    }

    /// Noun phrase used in messages ("a string")
    pub fn describe(self) -> &'static str {
        match self {
            FieldKind::String => "a string",
            FieldKind::Number => "a number",
            FieldKind::Array => "an array",
        }
    }
}

/// A required top-level field and its expected kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldSpec {
    FieldSpec { name, kind }
}

use FieldKind::{Array, Number, String as Str};

const NAVBAR: &[FieldSpec] = &[field("resumeUrl", Str)];

const HERO: &[FieldSpec] = &[
    field("heroText", Str),
    field("infoText", Str),
    field("yearsOfExperience", Number),
    field("socialLinks", Array),
];

const ABOUT: &[FieldSpec] = &[
    field("sectionTitle", Str),
    field("content", Str),
    field("yearsOfExperience", Number),
    field("stats", Array),
    field("highlights", Array),
];

const EXPERIENCE: &[FieldSpec] = &[
    field("sectionTitle", Str),
    field("subtitle", Str),
    field("items", Array),
];

const PROJECTS: &[FieldSpec] = &[field("description", Str), field("projects", Array)];

const SKILLS: &[FieldSpec] = &[
    field("sectionTitle", Str),
    field("description", Str),
    field("categories", Array),
];

const CONTACT: &[FieldSpec] = &[
    field("sectionTitle", Str),
    field("description", Str),
    field("subtitle", Str),
    field("socialLinks", Array),
];

const FOOTER: &[FieldSpec] = &[field("companyDescription", Str), field("socialLinks", Array)];

/// Required fields of `doc_id`, in declaration order
pub fn schema_for(doc_id: CmsDocId) -> &'static [FieldSpec] {
    match doc_id {
        CmsDocId::Navbar => NAVBAR,
        CmsDocId::Hero => HERO,
        CmsDocId::About => ABOUT,
        CmsDocId::Experience => EXPERIENCE,
        CmsDocId::Projects => PROJECTS,
        CmsDocId::Skills => SKILLS,
        CmsDocId::Contact => CONTACT,
        CmsDocId::Footer => FOOTER,
    }
}
