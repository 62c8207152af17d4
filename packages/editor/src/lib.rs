//! # Folio Editor
//!
//! Authorized editing of the site content documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ IdentitySession: current principal          │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ ContentEditor                               │
//! │  - allow-list check, forced sign-out        │
//! │  - one EditBuffer for the selected document │
//! │  - parse → validate → write on save         │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ ContentStore: cache shared with the site    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use folio_editor::{ContentEditor, LocalIdentity};
//!
//! let editor = ContentEditor::new(store, policy, identity);
//! editor.handle_session(Some(principal)).await;
//!
//! editor.select(CmsDocId::Hero).await?;
//! editor.edit(r#"{"heroText": "Hello"}"#)?;
//! editor.save().await?;
//! ```
//!
//! Concurrent saves from two operators are not detected; the last write
//! replaces the document.

pub mod buffer;
pub mod errors;
pub mod identity;
pub mod session;
pub mod status;

pub use buffer::{pretty, EditBuffer};
pub use errors::EditorError;
pub use identity::{AuthError, IdentitySession, LocalIdentity, Principal};
pub use session::{AuthorizedView, ContentEditor, EditPhase, EditorState, SaveOutcome};
pub use status::{Status, StatusKind};
