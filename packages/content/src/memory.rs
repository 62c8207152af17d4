//! In-memory document store.
//!
//! Backs tests and offline previews. Supports read holds and failure
//! injection so callers can exercise slow or failing backends.

use crate::client::{DocumentStoreClient, StoreError, StoreResult, Subscription};
use async_trait::async_trait;
use folio_common::DocumentAddress;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Default)]
struct MemoryState {
    docs: HashMap<DocumentAddress, watch::Sender<Option<Value>>>,
    holds: HashMap<DocumentAddress, watch::Receiver<bool>>,
    failing_reads: HashSet<DocumentAddress>,
    fail_writes: bool,
    reads: usize,
    writes: usize,
}

impl MemoryState {
    fn slot(&mut self, address: &DocumentAddress) -> &watch::Sender<Option<Value>> {
        self.docs
            .entry(address.clone())
            .or_insert_with(|| watch::channel(None).0)
    }
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    state: Mutex<MemoryState>,
}

/// Keeps reads of one address pending until released (or dropped)
pub struct ReadHold {
    gate: watch::Sender<bool>,
}

impl ReadHold {
    pub fn release(self) {
        self.gate.send_replace(true);
    }
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seed or overwrite a document without counting it as a write
    pub fn insert(&self, address: DocumentAddress, value: Value) {
        self.lock().slot(&address).send_replace(Some(value));
    }

    /// Current stored value
    pub fn get(&self, address: &DocumentAddress) -> Option<Value> {
        self.lock()
            .docs
            .get(address)
            .and_then(|tx| tx.borrow().clone())
    }

    /// Delete a document; subscribers observe `None`
    pub fn remove(&self, address: &DocumentAddress) {
        if let Some(tx) = self.lock().docs.get(address) {
            tx.send_replace(None);
        }
    }

    /// Make reads of `address` wait until the returned hold is released
    pub fn hold_reads(&self, address: DocumentAddress) -> ReadHold {
        let (gate, rx) = watch::channel(false);
        self.lock().holds.insert(address, rx);
        ReadHold { gate }
    }

    /// Make every read of `address` fail with [`StoreError::Unavailable`]
    pub fn fail_reads_for(&self, address: DocumentAddress) {
        self.lock().failing_reads.insert(address);
    }

    pub fn restore_reads_for(&self, address: &DocumentAddress) {
        self.lock().failing_reads.remove(address);
    }

    /// Reject every write with [`StoreError::PermissionDenied`]
    pub fn fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    pub fn read_count(&self) -> usize {
        self.lock().reads
    }

    pub fn write_count(&self) -> usize {
        self.lock().writes
    }
}

#[async_trait]
impl DocumentStoreClient for InMemoryDocumentStore {
    async fn read(&self, address: &DocumentAddress) -> StoreResult<Option<Value>> {
        let gate = self.lock().holds.get(address).cloned();
        if let Some(mut gate) = gate {
            // A dropped hold counts as released
            let _ = gate.wait_for(|open| *open).await;
        }

        let mut state = self.lock();
        state.reads += 1;
        if state.failing_reads.contains(address) {
            return Err(StoreError::Unavailable(format!("read of {} failed", address)));
        }
        Ok(state.docs.get(address).and_then(|tx| tx.borrow().clone()))
    }

    async fn write(&self, address: &DocumentAddress, value: Value) -> StoreResult<()> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(StoreError::PermissionDenied(format!("write to {} rejected", address)));
        }
        state.writes += 1;
        state.slot(address).send_replace(Some(value));
        Ok(())
    }

    fn subscribe(&self, address: &DocumentAddress) -> StoreResult<Subscription> {
        Ok(Subscription::new(self.lock().slot(address).subscribe()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_common::CmsDocId;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_write_then_read() {
        let store = InMemoryDocumentStore::new();
        let address = DocumentAddress::site_content(CmsDocId::Hero);

        assert_eq!(store.read(&address).await.unwrap(), None);
        store.write(&address, json!({"heroText": "Hi"})).await.unwrap();

        assert_eq!(store.read(&address).await.unwrap(), Some(json!({"heroText": "Hi"})));
        assert_eq!(store.write_count(), 1);
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let store = InMemoryDocumentStore::new();
        let address = DocumentAddress::site_content(CmsDocId::About);
        store.insert(address.clone(), json!({}));

        store.fail_reads_for(address.clone());
        assert!(matches!(store.read(&address).await, Err(StoreError::Unavailable(_))));
        store.restore_reads_for(&address);
        assert!(store.read(&address).await.is_ok());

        store.fail_writes(true);
        assert!(matches!(
            store.write(&address, json!({"a": 1})).await,
            Err(StoreError::PermissionDenied(_))
        ));
        assert_eq!(store.get(&address), Some(json!({})));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn test_read_hold_blocks_until_released() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let address = DocumentAddress::site_content(CmsDocId::Skills);
        store.insert(address.clone(), json!({"v": 1}));

        let hold = store.hold_reads(address.clone());
        let reader = {
            let store = store.clone();
            let address = address.clone();
            tokio::spawn(async move { store.read(&address).await })
        };

        tokio::task::yield_now().await;
        assert!(!reader.is_finished());

        store.insert(address.clone(), json!({"v": 2}));
        hold.release();

        assert_eq!(reader.await.unwrap().unwrap(), Some(json!({"v": 2})));
    }

    #[tokio::test]
    async fn test_subscribers_see_writes_and_removal() {
        let store = InMemoryDocumentStore::new();
        let address = DocumentAddress::site_content(CmsDocId::Navbar);
        let mut subscription = store.subscribe(&address).unwrap();

        assert_eq!(subscription.next().await, Some(None));

        store.write(&address, json!({"resumeUrl": "https://x.test/cv"})).await.unwrap();
        assert_eq!(subscription.next().await, Some(Some(json!({"resumeUrl": "https://x.test/cv"}))));

        store.remove(&address);
        assert_eq!(subscription.next().await, Some(None));
    }
}
