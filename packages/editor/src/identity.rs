//! # Identity Session
//!
//! The sign-in provider as seen by the editor: a feed of the current
//! principal plus sign-in and sign-out primitives. The provider's own
//! protocol stays behind this trait.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tokio::sync::watch;

/// A signed-in identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub uid: String,
    pub email: Option<String>,
}

impl Principal {
    pub fn new(uid: impl Into<String>, email: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            email: email.map(str::to_string),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Sign-in cancelled")]
    Cancelled,

    #[error("Identity provider error: {0}")]
    Provider(String),
}

#[async_trait]
pub trait IdentitySession: Send + Sync {
    /// Current principal, updated on every session change
    fn watch(&self) -> watch::Receiver<Option<Principal>>;

    async fn sign_in_with_credentials(&self, email: &str, password: &str) -> Result<Principal, AuthError>;

    async fn sign_in_with_federated_provider(&self) -> Result<Principal, AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

#[derive(Default)]
struct LocalState {
    accounts: HashMap<String, (String, Principal)>,
    federated: Option<Principal>,
    sign_outs: usize,
}

/// In-process identity provider with fixed accounts
pub struct LocalIdentity {
    session: watch::Sender<Option<Principal>>,
    state: Mutex<LocalState>,
}

impl LocalIdentity {
    pub fn new() -> Self {
        Self {
            session: watch::channel(None).0,
            state: Mutex::new(LocalState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LocalState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register an email/password account
    pub fn add_account(&self, email: &str, password: &str) -> Principal {
        let principal = Principal::new(format!("uid-{}", email.trim()), Some(email));
        self.lock().accounts.insert(
            email.trim().to_lowercase(),
            (password.to_string(), principal.clone()),
        );
        principal
    }

    /// Principal returned by the federated provider (`None` = user cancels)
    pub fn set_federated(&self, principal: Option<Principal>) {
        self.lock().federated = principal;
    }

    /// Push a session change directly
    pub fn set_session(&self, principal: Option<Principal>) {
        self.session.send_replace(principal);
    }

    pub fn current(&self) -> Option<Principal> {
        self.session.borrow().clone()
    }

    pub fn sign_out_count(&self) -> usize {
        self.lock().sign_outs
    }
}

impl Default for LocalIdentity {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentitySession for LocalIdentity {
    fn watch(&self) -> watch::Receiver<Option<Principal>> {
        self.session.subscribe()
    }

    async fn sign_in_with_credentials(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let principal = {
            let state = self.lock();
            match state.accounts.get(&email.trim().to_lowercase()) {
                Some((expected, principal)) if expected == password => principal.clone(),
                _ => return Err(AuthError::InvalidCredentials),
            }
        };
        self.session.send_replace(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_in_with_federated_provider(&self) -> Result<Principal, AuthError> {
        let principal = self.lock().federated.clone().ok_or(AuthError::Cancelled)?;
        self.session.send_replace(Some(principal.clone()));
        Ok(principal)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.lock().sign_outs += 1;
        self.session.send_replace(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_credentials_sign_in_updates_session() {
        let identity = LocalIdentity::new();
        identity.add_account("owner@example.com", "hunter2");
        let mut session = identity.watch();

        assert!(matches!(
            identity.sign_in_with_credentials("owner@example.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!session.has_changed().unwrap());

        let principal = identity
            .sign_in_with_credentials("Owner@Example.com", "hunter2")
            .await
            .unwrap();
        assert_eq!(principal.email.as_deref(), Some("owner@example.com"));
        assert!(session.has_changed().unwrap());
        assert_eq!(*session.borrow_and_update(), Some(principal));
    }

    #[tokio::test]
    async fn test_federated_cancel_and_sign_out() {
        let identity = LocalIdentity::new();
        assert_eq!(
            identity.sign_in_with_federated_provider().await,
            Err(AuthError::Cancelled)
        );

        identity.set_federated(Some(Principal::new("g-1", Some("g@example.com"))));
        identity.sign_in_with_federated_provider().await.unwrap();
        assert!(identity.current().is_some());

        identity.sign_out().await.unwrap();
        assert_eq!(identity.current(), None);
        assert_eq!(identity.sign_out_count(), 1);
    }
}
