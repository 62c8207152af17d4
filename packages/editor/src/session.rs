//! # Content Editor
//!
//! Authorized editing of one content document at a time.
//!
//! ## States
//!
//! ```text
//! AuthChecking ─┬─> Unauthenticated
//!               ├─> Unauthorized { reason }
//!               └─> Authorized(view)
//!                     Loading ─> Viewing <─> Editing ─> Saving ─> Viewing
//! ```
//!
//! ## Stale results
//!
//! Every auth check and every document load carries the generation it
//! started under. Selecting another document, signing out or unmounting
//! bumps the generation, and a result that comes back under an older one
//! is dropped. The editor never holds its lock across an await.

use crate::buffer::EditBuffer;
use crate::errors::EditorError;
use crate::identity::{AuthError, IdentitySession, Principal};
use crate::status::{self, Status};
use chrono::{DateTime, Utc};
use folio_common::CmsDocId;
use folio_content::{normalize_email, AccessPolicy, ContentStore, StoreResult};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

/// Sub-state of an authorized editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    /// Waiting for a fresh read of the selected document
    Loading,
    /// Buffer matches the last loaded or saved text
    Viewing,
    /// Buffer differs from the last loaded or saved text
    Editing,
    /// Write in flight
    Saving,
}

/// What an authorized operator sees
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorizedView {
    pub doc_id: CmsDocId,
    pub phase: EditPhase,
    pub buffer: EditBuffer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EditorState {
    AuthChecking,
    Unauthenticated,
    /// Signed out after a failed allow-list check
    Unauthorized { reason: String },
    Authorized(AuthorizedView),
}

impl EditorState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, EditorState::Authorized(_))
    }

    pub fn view(&self) -> Option<&AuthorizedView> {
        match self {
            EditorState::Authorized(view) => Some(view),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    NoChanges,
}

struct EditorInner {
    state: EditorState,
    status: Option<Status>,
    selected: CmsDocId,
    /// Principal the current `Authorized` state was granted to
    authorized: Option<Principal>,
    /// Text of the last successful load or save of `selected`
    baseline: String,
    auth_generation: u64,
    load_generation: u64,
    last_saved_at: Option<DateTime<Utc>>,
    pending_sign_in: bool,
}

impl EditorInner {
    fn view_mut(&mut self) -> Result<&mut AuthorizedView, EditorError> {
        match &mut self.state {
            EditorState::Authorized(view) => Ok(view),
            _ => Err(EditorError::NotAuthorized),
        }
    }

    fn settle_phase(&mut self) {
        let baseline = self.baseline.clone();
        if let EditorState::Authorized(view) = &mut self.state {
            view.phase = if view.buffer.text() == baseline {
                EditPhase::Viewing
            } else {
                EditPhase::Editing
            };
        }
    }
}

pub struct ContentEditor {
    store: Arc<ContentStore>,
    policy: Arc<dyn AccessPolicy>,
    identity: Arc<dyn IdentitySession>,
    mounted: watch::Sender<bool>,
    inner: Mutex<EditorInner>,
}

impl ContentEditor {
    /// Create a mounted editor waiting for its first auth determination.
    /// Collection names and indentation come from the store's config.
    pub fn new(
        store: Arc<ContentStore>,
        policy: Arc<dyn AccessPolicy>,
        identity: Arc<dyn IdentitySession>,
    ) -> Self {
        Self {
            store,
            policy,
            identity,
            mounted: watch::channel(true).0,
            inner: Mutex::new(EditorInner {
                state: EditorState::AuthChecking,
                status: None,
                selected: CmsDocId::default(),
                authorized: None,
                baseline: String::new(),
                auth_generation: 0,
                load_generation: 0,
                last_saved_at: None,
                pending_sign_in: false,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, EditorInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn indent(&self) -> usize {
        self.store.config().pretty_indent
    }

    pub fn is_mounted(&self) -> bool {
        *self.mounted.borrow()
    }

    // ---------------------------------------------------------------
    // Authentication
    // ---------------------------------------------------------------

    /// Follow the identity session until it closes or the editor unmounts
    pub async fn run_auth(&self) {
        let mut session = self.identity.watch();
        let mut mounted = self.mounted.subscribe();

        loop {
            let principal = session.borrow_and_update().clone();
            self.handle_session(principal).await;

            tokio::select! {
                changed = session.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Identity session closed");
                        break;
                    }
                }
                _ = unmounted(&mut mounted) => break,
            }
        }
    }

    /// Make one auth determination for a session change.
    ///
    /// A repeat of the principal that is already authorized (token refresh)
    /// re-checks access in the background and keeps the open buffer.
    pub async fn handle_session(&self, principal: Option<Principal>) {
        let (generation, recheck) = {
            let mut inner = self.lock();
            if !self.is_mounted() {
                return;
            }
            inner.auth_generation += 1;

            let Some(principal) = principal.as_ref() else {
                inner.load_generation += 1;
                inner.authorized = None;
                if !matches!(inner.state, EditorState::Unauthorized { .. }) {
                    inner.state = EditorState::Unauthenticated;
                }
                return;
            };

            let recheck = inner.state.is_authorized()
                && inner
                    .authorized
                    .as_ref()
                    .is_some_and(|current| same_identity(current, principal));

            if recheck {
                tracing::debug!("Re-checking access for {}", principal.uid);
            } else {
                tracing::debug!("Checking access for {}", principal.uid);
                inner.load_generation += 1;
                inner.authorized = None;
                inner.state = EditorState::AuthChecking;
            }
            (inner.auth_generation, recheck)
        };

        let email = principal.as_ref().and_then(|p| p.email.as_deref());
        let decision = self.policy.is_authorized_email(email).await;

        let (sign_out, fetch) = {
            let mut inner = self.lock();
            if !self.is_mounted() || inner.auth_generation != generation {
                tracing::debug!("Discarding stale access check");
                return;
            }

            match decision {
                Ok(true) if recheck && inner.state.is_authorized() => {
                    inner.authorized = principal.clone();
                    (false, None)
                }
                Ok(true) => {
                    tracing::info!("Access granted to {}", email.unwrap_or_default());
                    inner.authorized = principal.clone();
                    inner.status = None;
                    let selected = inner.selected;
                    (false, self.enter_document(&mut inner, selected))
                }
                Ok(false) => {
                    tracing::warn!("Access denied to {}", email.unwrap_or_default());
                    inner.authorized = None;
                    inner.state = EditorState::Unauthorized {
                        reason: status::ACCESS_DENIED.to_string(),
                    };
                    inner.status = Some(Status::error(status::ACCESS_DENIED));
                    (true, None)
                }
                Err(e) => {
                    tracing::error!("Access check failed: {}", e);
                    inner.authorized = None;
                    inner.state = EditorState::Unauthenticated;
                    inner.status = Some(Status::error(status::ACCESS_CHECK_FAILED));
                    (true, None)
                }
            }
        };

        if sign_out {
            if let Err(e) = self.identity.sign_out().await {
                tracing::error!("Forced sign-out failed: {}", e);
            }
            return;
        }

        if let Some((doc_id, generation)) = fetch {
            // Load failures are reported through the status line
            let _ = self.fetch(doc_id, generation).await;
        }
    }

    pub async fn sign_in_with_credentials(&self, email: &str, password: &str) -> Result<(), EditorError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            self.lock().status = Some(Status::error(status::CREDENTIALS_REQUIRED));
            return Err(EditorError::MissingCredentials);
        }

        self.begin_sign_in();
        let result = self.identity.sign_in_with_credentials(email, password).await;
        self.finish_sign_in(result.map(|_| ()), status::EMAIL_SIGN_IN_FAILED)
    }

    pub async fn sign_in_with_federated_provider(&self) -> Result<(), EditorError> {
        self.begin_sign_in();
        let result = self.identity.sign_in_with_federated_provider().await;
        self.finish_sign_in(result.map(|_| ()), status::FEDERATED_SIGN_IN_FAILED)
    }

    fn begin_sign_in(&self) {
        let mut inner = self.lock();
        inner.pending_sign_in = true;
        inner.status = None;
    }

    fn finish_sign_in(
        &self,
        result: Result<(), AuthError>,
        failure: &'static str,
    ) -> Result<(), EditorError> {
        let mut inner = self.lock();
        inner.pending_sign_in = false;
        result.map_err(|e| {
            tracing::warn!("Sign-in failed: {}", e);
            inner.status = Some(Status::error(failure));
            EditorError::from(e)
        })
    }

    /// Sign out on the operator's request
    pub async fn sign_out(&self) -> Result<(), EditorError> {
        {
            let mut inner = self.lock();
            inner.auth_generation += 1;
            inner.load_generation += 1;
            inner.authorized = None;
            inner.state = EditorState::Unauthenticated;
            inner.status = None;
        }
        self.identity.sign_out().await?;
        Ok(())
    }

    // ---------------------------------------------------------------
    // Documents
    // ---------------------------------------------------------------

    /// Switch the selected document. The edit buffer is rebuilt from the
    /// cached value; only an uncached document is read from the store.
    pub async fn select(&self, doc_id: CmsDocId) -> Result<(), EditorError> {
        let fetch = {
            let mut inner = self.lock();
            inner.view_mut()?;
            self.enter_document(&mut inner, doc_id)
        };

        match fetch {
            Some((doc_id, generation)) => self.fetch(doc_id, generation).await,
            None => Ok(()),
        }
    }

    /// Replace the edit buffer and show it. Returns the fetch to run when
    /// the document is not cached.
    fn enter_document(&self, inner: &mut EditorInner, doc_id: CmsDocId) -> Option<(CmsDocId, u64)> {
        inner.load_generation += 1;
        inner.selected = doc_id;

        let cached = self.store.read(doc_id);
        let buffer = EditBuffer::from_value(doc_id, cached.as_ref(), self.indent());
        inner.baseline = buffer.text().to_string();

        let phase = if cached.is_some() {
            EditPhase::Viewing
        } else {
            EditPhase::Loading
        };
        inner.state = EditorState::Authorized(AuthorizedView {
            doc_id,
            phase,
            buffer,
        });

        (phase == EditPhase::Loading).then_some((doc_id, inner.load_generation))
    }

    /// Force a fresh read of the selected document, discarding edits
    pub async fn reload(&self) -> Result<(), EditorError> {
        let (doc_id, generation) = {
            let mut inner = self.lock();
            let view = inner.view_mut()?;
            if view.phase == EditPhase::Saving {
                return Err(EditorError::Busy("save in progress"));
            }
            view.phase = EditPhase::Loading;
            let doc_id = view.doc_id;

            inner.load_generation += 1;
            inner.status = None;
            (doc_id, inner.load_generation)
        };

        self.fetch(doc_id, generation).await
    }

    async fn fetch(&self, doc_id: CmsDocId, generation: u64) -> Result<(), EditorError> {
        let result: StoreResult<Option<Value>> = self.store.refresh_doc(doc_id).await;

        let mut inner = self.lock();
        if !self.is_mounted() || inner.load_generation != generation {
            tracing::debug!("Discarding stale load of {}", doc_id);
            return Ok(());
        }

        match result {
            Ok(value) => {
                let buffer = EditBuffer::from_value(doc_id, value.as_ref(), self.indent());
                inner.baseline = buffer.text().to_string();
                inner.view_mut()?.buffer = buffer;
                inner.settle_phase();
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to load {}: {}", doc_id, e);
                inner.status = Some(Status::error(status::LOAD_FAILED));
                inner.settle_phase();
                Err(e.into())
            }
        }
    }

    /// Replace the buffer text; parse and validation results update at once
    pub fn edit(&self, text: impl Into<String>) -> Result<(), EditorError> {
        let mut inner = self.lock();
        let view = inner.view_mut()?;
        match view.phase {
            EditPhase::Loading => return Err(EditorError::Busy("document is loading")),
            EditPhase::Saving => view.buffer.set_text(text),
            EditPhase::Viewing | EditPhase::Editing => {
                view.buffer.set_text(text);
                inner.settle_phase();
            }
        }
        Ok(())
    }

    /// Parse, validate and write the current buffer as a whole document
    pub async fn save(&self) -> Result<SaveOutcome, EditorError> {
        let (doc_id, text, value, generation) = {
            let mut inner = self.lock();
            let baseline = inner.baseline.clone();
            let view = inner.view_mut()?;
            match view.phase {
                EditPhase::Loading => return Err(EditorError::Busy("document is loading")),
                EditPhase::Saving => return Err(EditorError::Busy("save in progress")),
                EditPhase::Viewing | EditPhase::Editing => {}
            }

            let text = view.buffer.text().to_string();
            view.buffer.set_text(text.clone());
            let doc_id = view.doc_id;

            let Some(value) = view.buffer.parsed().cloned() else {
                let message = view
                    .buffer
                    .issues()
                    .first()
                    .map(|issue| issue.message.clone())
                    .unwrap_or_default();
                inner.status = Some(Status::error(status::INVALID_JSON));
                return Err(EditorError::InvalidJson(message));
            };

            let summary = view.buffer.summary();
            if summary.blocks_save() {
                inner.status = Some(Status::validation_failed(summary.errors));
                return Err(EditorError::ValidationFailed {
                    errors: summary.errors,
                });
            }

            if text == baseline {
                inner.status = Some(Status::info(status::NO_CHANGES));
                return Ok(SaveOutcome::NoChanges);
            }

            view.phase = EditPhase::Saving;
            inner.status = None;
            (doc_id, text, value, inner.load_generation)
        };

        let result = self.store.write_doc(doc_id, value).await;

        let mut inner = self.lock();
        let current = self.is_mounted() && inner.load_generation == generation;
        match result {
            Ok(()) => {
                let collection = &self.store.config().content_collection;
                inner.status = Some(Status::saved(collection, doc_id));
                inner.last_saved_at = Some(Utc::now());
                if current {
                    inner.baseline = text;
                    inner.settle_phase();
                }
                Ok(SaveOutcome::Saved)
            }
            Err(e) => {
                tracing::error!("Save of {} failed: {}", doc_id, e);
                inner.status = Some(Status::error(status::SAVE_FAILED));
                if current {
                    inner.settle_phase();
                }
                Err(e.into())
            }
        }
    }

    /// Detach the editor. Results still in flight are dropped.
    pub fn unmount(&self) {
        let mut inner = self.lock();
        inner.auth_generation += 1;
        inner.load_generation += 1;
        self.mounted.send_replace(false);
    }

    pub fn state(&self) -> EditorState {
        self.lock().state.clone()
    }

    pub fn status(&self) -> Option<Status> {
        self.lock().status.clone()
    }

    pub fn selected(&self) -> CmsDocId {
        self.lock().selected
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Utc>> {
        self.lock().last_saved_at
    }

    pub fn pending_sign_in(&self) -> bool {
        self.lock().pending_sign_in
    }
}

/// Same account with the same (normalized) email
fn same_identity(current: &Principal, next: &Principal) -> bool {
    current.uid == next.uid && normalize_email(current.email.as_deref()) == normalize_email(next.email.as_deref())
}

async fn unmounted(mounted: &mut watch::Receiver<bool>) {
    while *mounted.borrow_and_update() {
        if mounted.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::LocalIdentity;
    use folio_common::DocumentAddress;
    use folio_content::{AllowListPolicy, ContentConfig, InMemoryDocumentStore};
    use serde_json::json;

    struct Fixture {
        backend: Arc<InMemoryDocumentStore>,
        identity: Arc<LocalIdentity>,
        editor: ContentEditor,
    }

    async fn fixture() -> Fixture {
        let backend = Arc::new(InMemoryDocumentStore::new());
        backend.insert(DocumentAddress::content_editors(), json!({"emails": ["owner@example.com"]}));
        backend.insert(
            DocumentAddress::site_content(CmsDocId::Hero),
            json!({"heroText": "Hi", "infoText": "Info", "yearsOfExperience": 5, "socialLinks": []}),
        );

        let config = ContentConfig::default();
        let store = ContentStore::bootstrap(backend.clone(), config.clone()).await;
        let policy = Arc::new(AllowListPolicy::new(backend.clone(), &config));
        let identity = Arc::new(LocalIdentity::new());
        let editor = ContentEditor::new(store, policy, identity.clone());

        Fixture {
            backend,
            identity,
            editor,
        }
    }

    fn owner() -> Principal {
        Principal::new("u-1", Some("owner@example.com"))
    }

    #[tokio::test]
    async fn test_starts_checking_auth() {
        let f = fixture().await;
        assert_eq!(f.editor.state(), EditorState::AuthChecking);
        assert_eq!(f.editor.selected(), CmsDocId::Hero);
        assert!(f.editor.is_mounted());
    }

    #[tokio::test]
    async fn test_no_session_is_unauthenticated() {
        let f = fixture().await;
        f.editor.handle_session(None).await;
        assert_eq!(f.editor.state(), EditorState::Unauthenticated);
        assert_eq!(f.identity.sign_out_count(), 0);
    }

    #[tokio::test]
    async fn test_authorized_session_shows_cached_document() {
        let f = fixture().await;
        f.editor.handle_session(Some(owner())).await;

        let state = f.editor.state();
        let view = state.view().unwrap();
        assert_eq!(view.doc_id, CmsDocId::Hero);
        assert_eq!(view.phase, EditPhase::Viewing);
        assert!(view.buffer.text().contains("\"heroText\": \"Hi\""));
        assert!(view.buffer.issues().is_empty());
    }

    #[tokio::test]
    async fn test_uncached_selection_reads_store() {
        let f = fixture().await;
        f.editor.handle_session(Some(owner())).await;
        f.backend.insert(
            DocumentAddress::site_content(CmsDocId::Contact),
            json!({"contactText": "Write me"}),
        );
        let reads = f.backend.read_count();

        f.editor.select(CmsDocId::Contact).await.unwrap();

        assert_eq!(f.backend.read_count(), reads + 1);
        let state = f.editor.state();
        let view = state.view().unwrap();
        assert_eq!(view.phase, EditPhase::Viewing);
        assert!(view.buffer.text().contains("Write me"));
    }

    #[tokio::test]
    async fn test_cached_selection_skips_store() {
        let f = fixture().await;
        f.editor.handle_session(Some(owner())).await;
        f.editor.select(CmsDocId::Contact).await.unwrap();
        let reads = f.backend.read_count();

        f.editor.select(CmsDocId::Hero).await.unwrap();

        assert_eq!(f.backend.read_count(), reads);
    }

    #[tokio::test]
    async fn test_edit_tracks_phase() {
        let f = fixture().await;
        f.editor.handle_session(Some(owner())).await;
        let original = f.editor.state().view().unwrap().buffer.text().to_string();

        f.editor.edit("{").unwrap();
        let state = f.editor.state();
        let view = state.view().unwrap();
        assert_eq!(view.phase, EditPhase::Editing);
        assert_eq!(view.buffer.text(), "{");
        assert!(view.buffer.parsed().is_none());

        f.editor.edit(original).unwrap();
        assert_eq!(f.editor.state().view().unwrap().phase, EditPhase::Viewing);
    }

    #[tokio::test]
    async fn test_operations_require_authorization() {
        let f = fixture().await;
        assert_eq!(f.editor.edit("{}"), Err(EditorError::NotAuthorized));
        assert_eq!(f.editor.save().await, Err(EditorError::NotAuthorized));
        assert_eq!(f.editor.select(CmsDocId::About).await, Err(EditorError::NotAuthorized));
    }

    #[tokio::test]
    async fn test_blank_credentials_skip_provider() {
        let f = fixture().await;
        let result = f.editor.sign_in_with_credentials("  ", "secret").await;

        assert_eq!(result, Err(EditorError::MissingCredentials));
        assert_eq!(f.editor.status(), Some(Status::error(status::CREDENTIALS_REQUIRED)));
        assert_eq!(f.identity.current(), None);
    }

    #[tokio::test]
    async fn test_failed_sign_in_reports_provider() {
        let f = fixture().await;

        let result = f.editor.sign_in_with_credentials("owner@example.com", "nope").await;
        assert!(matches!(result, Err(EditorError::Auth(_))));
        assert_eq!(f.editor.status(), Some(Status::error(status::EMAIL_SIGN_IN_FAILED)));
        assert!(!f.editor.pending_sign_in());

        let result = f.editor.sign_in_with_federated_provider().await;
        assert!(matches!(result, Err(EditorError::Auth(_))));
        assert_eq!(f.editor.status(), Some(Status::error(status::FEDERATED_SIGN_IN_FAILED)));
    }

    #[tokio::test]
    async fn test_sign_out_clears_view() {
        let f = fixture().await;
        f.identity.set_session(Some(owner()));
        f.editor.handle_session(Some(owner())).await;

        f.editor.sign_out().await.unwrap();

        assert_eq!(f.editor.state(), EditorState::Unauthenticated);
        assert_eq!(f.identity.current(), None);
    }

    #[tokio::test]
    async fn test_unmount_drops_in_flight_load() {
        let f = fixture().await;
        f.editor.handle_session(Some(owner())).await;
        let hold = f.backend.hold_reads(DocumentAddress::site_content(CmsDocId::Hero));
        f.backend.insert(DocumentAddress::site_content(CmsDocId::Hero), json!({"heroText": "v2"}));

        let (result, ()) = tokio::join!(f.editor.reload(), async {
            f.editor.unmount();
            hold.release();
        });

        assert_eq!(result, Ok(()));
        assert!(!f.editor.is_mounted());
        let state = f.editor.state();
        assert!(!state.view().unwrap().buffer.text().contains("v2"));
    }
}
