//! Error types for the editor

use crate::identity::AuthError;
use folio_content::StoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Validation failed with {errors} error(s)")]
    ValidationFailed { errors: usize },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Editor is not authorized")]
    NotAuthorized,

    #[error("Editor is busy: {0}")]
    Busy(&'static str),
}
