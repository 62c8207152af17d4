use async_trait::async_trait;
use folio_common::DocumentAddress;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Request rejected: {0}")]
    Rejected(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-addressed document database the content layer reads and writes.
///
/// Writes are full replacements; there is no merge and no concurrency
/// token, so the last writer wins.
#[async_trait]
pub trait DocumentStoreClient: Send + Sync {
    /// One-shot read; `Ok(None)` when the document does not exist
    async fn read(&self, address: &DocumentAddress) -> StoreResult<Option<Value>>;

    /// Replace the whole document at `address`
    async fn write(&self, address: &DocumentAddress, value: Value) -> StoreResult<()>;

    /// Follow changes to a single document. Dropping the subscription
    /// unsubscribes.
    fn subscribe(&self, address: &DocumentAddress) -> StoreResult<Subscription>;
}

/// Change feed for one document
#[derive(Debug)]
pub struct Subscription {
    receiver: watch::Receiver<Option<Value>>,
    delivered_initial: bool,
}

impl Subscription {
    pub fn new(receiver: watch::Receiver<Option<Value>>) -> Self {
        Self {
            receiver,
            delivered_initial: false,
        }
    }

    /// Latest known value without waiting
    pub fn current(&self) -> Option<Value> {
        self.receiver.borrow().clone()
    }

    /// Wait for the next snapshot. The first call yields the current value
    /// immediately. Returns `None` once the store side has gone away.
    pub async fn next(&mut self) -> Option<Option<Value>> {
        if !self.delivered_initial {
            self.delivered_initial = true;
            return Some(self.receiver.borrow_and_update().clone());
        }

        match self.receiver.changed().await {
            Ok(()) => Some(self.receiver.borrow_and_update().clone()),
            Err(_) => None,
        }
    }
}
