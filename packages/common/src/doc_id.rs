use crate::error::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collection holding the eight site content documents
pub const SITE_CONTENT_COLLECTION: &str = "siteContent";

/// Collection holding access-control documents
pub const SECURITY_COLLECTION: &str = "security";

/// Document id of the content editor allow-list (`{ emails: string[] }`)
pub const CONTENT_EDITORS_DOC: &str = "contentEditors";

/// Identifier of one of the fixed content documents.
///
/// The set is closed: nothing outside these eight names can be read or
/// written through the content layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CmsDocId {
    Navbar,
    /// Initial editor selection
    #[default]
    Hero,
    About,
    Experience,
    Projects,
    Skills,
    Contact,
    Footer,
}

impl CmsDocId {
    /// Every document id, in declaration order
    pub const ALL: [CmsDocId; 8] = [
        CmsDocId::Navbar,
        CmsDocId::Hero,
        CmsDocId::About,
        CmsDocId::Experience,
        CmsDocId::Projects,
        CmsDocId::Skills,
        CmsDocId::Contact,
        CmsDocId::Footer,
    ];

    /// Storage id of the document
    pub fn as_str(self) -> &'static str {
        match self {
            CmsDocId::Navbar => "navbar",
            CmsDocId::Hero => "hero",
            CmsDocId::About => "about",
            CmsDocId::Experience => "experience",
            CmsDocId::Projects => "projects",
            CmsDocId::Skills => "skills",
            CmsDocId::Contact => "contact",
            CmsDocId::Footer => "footer",
        }
    }

    /// Label shown in the document picker
    pub fn label(self) -> &'static str {
        match self {
            CmsDocId::Navbar => "Navbar",
            CmsDocId::Hero => "Hero",
            CmsDocId::About => "About",
            CmsDocId::Experience => "Experience",
            CmsDocId::Projects => "Projects",
            CmsDocId::Skills => "Skills",
            CmsDocId::Contact => "Contact",
            CmsDocId::Footer => "Footer",
        }
    }

    /// Position in [`CmsDocId::ALL`], usable as a slot index
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for CmsDocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CmsDocId {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CmsDocId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| CommonError::UnknownDocument(s.to_string()))
    }
}

/// Stable (collection, id) address of a persisted document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentAddress {
    pub collection: String,
    pub id: String,
}

impl DocumentAddress {
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Address of a content document in the default collection
    pub fn site_content(doc_id: CmsDocId) -> Self {
        Self::new(SITE_CONTENT_COLLECTION, doc_id.as_str())
    }

    /// Address of the editor allow-list
    pub fn content_editors() -> Self {
        Self::new(SECURITY_COLLECTION, CONTENT_EDITORS_DOC)
    }
}

impl fmt::Display for DocumentAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_ids() {
        for id in CmsDocId::ALL {
            assert_eq!(id.as_str().parse::<CmsDocId>().unwrap(), id);
        }
    }

    #[test]
    fn test_rejects_unknown_id() {
        let err = "blog".parse::<CmsDocId>().unwrap_err();
        assert!(matches!(err, CommonError::UnknownDocument(name) if name == "blog"));
        assert!("Hero".parse::<CmsDocId>().is_err());
    }

    #[test]
    fn test_default_is_hero() {
        assert_eq!(CmsDocId::default(), CmsDocId::Hero);
    }

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, id) in CmsDocId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_serde_uses_storage_name() {
        let json = serde_json::to_string(&CmsDocId::Experience).unwrap();
        assert_eq!(json, "\"experience\"");
        let id: CmsDocId = serde_json::from_str("\"footer\"").unwrap();
        assert_eq!(id, CmsDocId::Footer);
    }

    #[test]
    fn test_addresses() {
        assert_eq!(DocumentAddress::site_content(CmsDocId::Hero).to_string(), "siteContent/hero");
        assert_eq!(DocumentAddress::content_editors().to_string(), "security/contentEditors");
    }
}
