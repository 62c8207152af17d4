//! # Folio Content
//!
//! Process-wide cache of the site content documents and the seams it
//! talks through.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ DocumentStoreClient: read / write / subscribe │
//! └──────────────────────────────────────────────┘
//!                      ↓
//! ┌──────────────────────────────────────────────┐
//! │ ContentStore: eight slots + loaded flag       │
//! │  - refresh_all on startup                     │
//! │  - refresh_doc / set_doc_local                │
//! │  - watch receivers for presentation sections  │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Access control lives next to the store because the allow-list is just
//! another document behind the same client.

pub mod access;
pub mod client;
pub mod config;
pub mod memory;
pub mod store;
pub mod watcher;

pub use access::{normalize_email, AccessPolicy, AllowListPolicy};
pub use client::{DocumentStoreClient, StoreError, StoreResult, Subscription};
pub use config::{ContentConfig, DEFAULT_CONFIG_NAME};
pub use memory::{InMemoryDocumentStore, ReadHold};
pub use store::ContentStore;
pub use watcher::{resume_url, ResumeLinkWatcher};
