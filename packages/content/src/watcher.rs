use crate::client::{DocumentStoreClient, StoreResult, Subscription};
use crate::config::ContentConfig;
use folio_common::CmsDocId;
use serde_json::Value;

/// Follows the navbar document and reports its resume link.
///
/// Used by the download button, which needs live updates even when the
/// rest of the page is served from the cached content store.
pub struct ResumeLinkWatcher {
    subscription: Subscription,
}

impl ResumeLinkWatcher {
    pub fn new(client: &dyn DocumentStoreClient, config: &ContentConfig) -> StoreResult<Self> {
        let address = config.content_address(CmsDocId::Navbar);
        let subscription = client.subscribe(&address)?;
        tracing::debug!("Watching {} for resume link changes", address);
        Ok(Self { subscription })
    }

    /// Next resume link snapshot; the first call yields the current one.
    /// Returns `None` once the subscription has closed.
    pub async fn next(&mut self) -> Option<Option<String>> {
        self.subscription
            .next()
            .await
            .map(|doc| resume_url(doc.as_ref()))
    }
}

/// `resumeUrl` of a navbar document, if present and non-empty
pub fn resume_url(navbar: Option<&Value>) -> Option<String> {
    navbar?
        .get("resumeUrl")?
        .as_str()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryDocumentStore;
    use folio_common::DocumentAddress;
    use serde_json::json;

    #[test]
    fn test_resume_url_extraction() {
        assert_eq!(
            resume_url(Some(&json!({"resumeUrl": "https://x.test/cv.pdf"}))),
            Some("https://x.test/cv.pdf".to_string())
        );
        assert_eq!(resume_url(Some(&json!({"resumeUrl": ""}))), None);
        assert_eq!(resume_url(Some(&json!({"resumeUrl": 7}))), None);
        assert_eq!(resume_url(Some(&json!({}))), None);
        assert_eq!(resume_url(None), None);
    }

    #[tokio::test]
    async fn test_follows_navbar_changes() {
        let store = InMemoryDocumentStore::new();
        let address = DocumentAddress::site_content(CmsDocId::Navbar);
        store.insert(address.clone(), json!({"resumeUrl": "https://x.test/v1.pdf"}));

        let mut watcher = ResumeLinkWatcher::new(&store, &ContentConfig::default()).unwrap();
        assert_eq!(watcher.next().await, Some(Some("https://x.test/v1.pdf".to_string())));

        store.insert(address.clone(), json!({"resumeUrl": "https://x.test/v2.pdf"}));
        assert_eq!(watcher.next().await, Some(Some("https://x.test/v2.pdf".to_string())));

        store.remove(&address);
        assert_eq!(watcher.next().await, Some(None));
    }
}
