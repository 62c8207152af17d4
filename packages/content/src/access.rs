use crate::client::{DocumentStoreClient, StoreResult};
use crate::config::ContentConfig;
use async_trait::async_trait;
use folio_common::DocumentAddress;
use std::sync::Arc;

/// Decides whether a signed-in identity may edit content
#[async_trait]
pub trait AccessPolicy: Send + Sync {
    async fn is_authorized_email(&self, email: Option<&str>) -> StoreResult<bool>;
}

/// Trimmed, lowercased form used for every allow-list comparison
pub fn normalize_email(email: Option<&str>) -> String {
    email.unwrap_or_default().trim().to_lowercase()
}

/// Allow-list stored as `{ emails: string[] }` in the document store.
///
/// The list is re-read on every check so revocations apply to the next
/// session change without a restart.
pub struct AllowListPolicy {
    client: Arc<dyn DocumentStoreClient>,
    address: DocumentAddress,
}

impl AllowListPolicy {
    pub fn new(client: Arc<dyn DocumentStoreClient>, config: &ContentConfig) -> Self {
        Self {
            client,
            address: config.allow_list_address(),
        }
    }

    /// Normalized allow-list entries; non-string entries are skipped and a
    /// missing or malformed document yields an empty list
    pub async fn allowed_emails(&self) -> StoreResult<Vec<String>> {
        let doc = self.client.read(&self.address).await?;
        let emails = doc
            .as_ref()
            .and_then(|doc| doc.get("emails"))
            .and_then(|emails| emails.as_array())
            .map(|emails| {
                emails
                    .iter()
                    .filter_map(|value| value.as_str())
                    .map(|email| normalize_email(Some(email)))
                    .collect()
            })
            .unwrap_or_default();
        Ok(emails)
    }
}

#[async_trait]
impl AccessPolicy for AllowListPolicy {
    async fn is_authorized_email(&self, email: Option<&str>) -> StoreResult<bool> {
        let normalized = normalize_email(email);
        if normalized.is_empty() {
            return Ok(false);
        }

        let allowed = self.allowed_emails().await?.contains(&normalized);
        tracing::debug!("Access check for {}: allowed={}", normalized, allowed);
        Ok(allowed)
    }
}
