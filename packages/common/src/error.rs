use thiserror::Error;

/// Errors raised while naming or decoding content documents
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("Unknown content document: {0}")]
    UnknownDocument(String),

    #[error("Document does not match its model: {0}")]
    Decode(#[from] serde_json::Error),
}
