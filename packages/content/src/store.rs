//! # Content Store
//!
//! Single cache of the eight content documents shared by every
//! presentation section and the content editor.
//!
//! ## Slots
//!
//! Each document id owns one slot: a `watch` channel holding the last known
//! value (or `None`) plus a generation counter. Every write path bumps the
//! generation before it starts; a fetch that completes is applied only if
//! the slot's generation is still the one it started with, so a slow read
//! never overwrites a fresher value.
//!
//! ## Loaded flag
//!
//! `loaded` is false from construction until the latest `refresh_all` has
//! seen all eight reads settle. Results and the flag are published under
//! one lock, so no observer sees the flag set while a slot is still pending.

use crate::client::{DocumentStoreClient, StoreResult};
use crate::config::ContentConfig;
use folio_common::CmsDocId;
use futures::future::join_all;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

#[derive(Default)]
struct Generations {
    slots: [u64; 8],
    refresh_all: u64,
}

impl Generations {
    fn bump(&mut self, doc_id: CmsDocId) -> u64 {
        let slot = &mut self.slots[doc_id.index()];
        *slot += 1;
        *slot
    }

    fn current(&self, doc_id: CmsDocId) -> u64 {
        self.slots[doc_id.index()]
    }
}

pub struct ContentStore {
    client: Arc<dyn DocumentStoreClient>,
    config: ContentConfig,
    slots: [watch::Sender<Option<Value>>; 8],
    loaded: watch::Sender<bool>,
    generations: Mutex<Generations>,
}

impl ContentStore {
    /// Create an empty, not-yet-loaded store
    pub fn new(client: Arc<dyn DocumentStoreClient>, config: ContentConfig) -> Self {
        Self {
            client,
            config,
            slots: std::array::from_fn(|_| watch::channel(None).0),
            loaded: watch::channel(false).0,
            generations: Mutex::new(Generations::default()),
        }
    }

    /// Create a store and run the startup bulk load
    pub async fn bootstrap(client: Arc<dyn DocumentStoreClient>, config: ContentConfig) -> Arc<Self> {
        let store = Arc::new(Self::new(client, config));
        store.refresh_all().await;
        store
    }

    pub fn config(&self) -> &ContentConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, Generations> {
        self.generations.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn slot(&self, doc_id: CmsDocId) -> &watch::Sender<Option<Value>> {
        &self.slots[doc_id.index()]
    }

    /// Re-read every document. Individual read failures are logged and
    /// stored as absent; they never abort the other reads.
    pub async fn refresh_all(&self) {
        let (epoch, started) = {
            let mut generations = self.lock();
            generations.refresh_all += 1;
            self.loaded.send_replace(false);
            let started = CmsDocId::ALL.map(|doc_id| generations.bump(doc_id));
            (generations.refresh_all, started)
        };

        tracing::debug!("Refreshing all {} content documents", CmsDocId::ALL.len());

        let reads = CmsDocId::ALL.map(|doc_id| {
            let address = self.config.content_address(doc_id);
            async move { (doc_id, self.client.read(&address).await) }
        });
        let results = join_all(reads).await;

        let generations = self.lock();
        let mut failed = 0;
        for ((doc_id, result), generation) in results.into_iter().zip(started) {
            let value = match result {
                Ok(value) => value,
                Err(e) => {
                    failed += 1;
                    tracing::warn!("Failed to load {}: {}", self.config.content_address(doc_id), e);
                    None
                }
            };

            if generations.current(doc_id) == generation {
                self.slot(doc_id).send_replace(value);
            } else {
                tracing::debug!("Discarding stale bulk read of {}", doc_id);
            }
        }

        if generations.refresh_all == epoch {
            self.loaded.send_replace(true);
            tracing::info!("Content loaded ({} failed reads)", failed);
        }
    }

    /// Read one document fresh and replace its slot. Failures are returned
    /// to the caller and leave the cached value untouched.
    pub async fn refresh_doc(&self, doc_id: CmsDocId) -> StoreResult<Option<Value>> {
        let generation = self.lock().bump(doc_id);
        let address = self.config.content_address(doc_id);

        let value = self.client.read(&address).await.map_err(|e| {
            tracing::warn!("Refresh of {} failed: {}", address, e);
            e
        })?;

        let generations = self.lock();
        if generations.current(doc_id) == generation {
            self.slot(doc_id).send_replace(value.clone());
        } else {
            tracing::debug!("Discarding stale refresh of {}", doc_id);
        }
        Ok(value)
    }

    /// Replace the cached value without touching the backing store
    pub fn set_doc_local(&self, doc_id: CmsDocId, value: Value) {
        let mut generations = self.lock();
        generations.bump(doc_id);
        self.slot(doc_id).send_replace(Some(value));
    }

    /// Write a whole document through the client, then mirror it locally
    pub async fn write_doc(&self, doc_id: CmsDocId, value: Value) -> StoreResult<()> {
        let address = self.config.content_address(doc_id);
        self.client.write(&address, value.clone()).await?;
        tracing::info!("Wrote {}", address);
        self.set_doc_local(doc_id, value);
        Ok(())
    }

    /// Cached value of one document
    pub fn read(&self, doc_id: CmsDocId) -> Option<Value> {
        self.slot(doc_id).borrow().clone()
    }

    /// Snapshot of all eight slots
    pub fn docs(&self) -> BTreeMap<CmsDocId, Option<Value>> {
        CmsDocId::ALL
            .into_iter()
            .map(|doc_id| (doc_id, self.read(doc_id)))
            .collect()
    }

    pub fn is_loaded(&self) -> bool {
        *self.loaded.borrow()
    }

    /// Follow one document's cached value
    pub fn subscribe(&self, doc_id: CmsDocId) -> watch::Receiver<Option<Value>> {
        self.slot(doc_id).subscribe()
    }

    /// Follow the loaded flag
    pub fn subscribe_loaded(&self) -> watch::Receiver<bool> {
        self.loaded.subscribe()
    }
}
