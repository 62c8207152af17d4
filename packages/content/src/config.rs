use folio_common::{
    CmsDocId, DocumentAddress, CONTENT_EDITORS_DOC, SECURITY_COLLECTION, SITE_CONTENT_COLLECTION,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "folio.config.json";

/// Content layer configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentConfig {
    /// Collection holding the content documents
    #[serde(default = "default_content_collection")]
    pub content_collection: String,

    /// Collection holding the editor allow-list
    #[serde(default = "default_allow_list_collection")]
    pub allow_list_collection: String,

    /// Document id of the editor allow-list
    #[serde(default = "default_allow_list_document")]
    pub allow_list_document: String,

    /// Indentation width used when rendering documents for editing
    #[serde(default = "default_pretty_indent")]
    pub pretty_indent: usize,
}

fn default_content_collection() -> String {
    SITE_CONTENT_COLLECTION.to_string()
}

fn default_allow_list_collection() -> String {
    SECURITY_COLLECTION.to_string()
}

fn default_allow_list_document() -> String {
    CONTENT_EDITORS_DOC.to_string()
}

fn default_pretty_indent() -> usize {
    2
}

impl ContentConfig {
    /// Load config from a directory
    pub fn load(dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: ContentConfig = serde_json::from_str(&content)?;
            tracing::debug!("Loaded content config from {}", config_path.display());
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(ContentConfig::default())
        }
    }

    /// Storage address of a content document
    pub fn content_address(&self, doc_id: CmsDocId) -> DocumentAddress {
        DocumentAddress::new(&self.content_collection, doc_id.as_str())
    }

    /// Storage address of the editor allow-list
    pub fn allow_list_address(&self) -> DocumentAddress {
        DocumentAddress::new(&self.allow_list_collection, &self.allow_list_document)
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            content_collection: default_content_collection(),
            allow_list_collection: default_allow_list_collection(),
            allow_list_document: default_allow_list_document(),
            pretty_indent: default_pretty_indent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "contentCollection": "draftContent",
            "prettyIndent": 4
        }"#;

        let config: ContentConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.content_collection, "draftContent");
        assert_eq!(config.allow_list_collection, "security");
        assert_eq!(config.allow_list_document, "contentEditors");
        assert_eq!(config.pretty_indent, 4);
        assert_eq!(config.content_address(CmsDocId::Hero).to_string(), "draftContent/hero");
    }

    #[test]
    fn test_default_config() {
        let config = ContentConfig::default();
        assert_eq!(config.content_address(CmsDocId::Footer), DocumentAddress::site_content(CmsDocId::Footer));
        assert_eq!(config.allow_list_address(), DocumentAddress::content_editors());
        assert_eq!(config.pretty_indent, 2);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(ContentConfig::load(dir.path()).unwrap(), ContentConfig::default());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{ "allowListDocument": "editors" }"#,
        )
        .unwrap();
        let config = ContentConfig::load(dir.path()).unwrap();
        assert_eq!(config.allow_list_address().to_string(), "security/editors");
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ not json").unwrap();
        assert!(ContentConfig::load(dir.path()).is_err());
    }
}
