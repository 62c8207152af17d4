//! Shared types for the folio content layer: the closed set of content
//! document ids, their typed models, persisted addresses and a JSON visitor.

pub mod doc_id;
pub mod documents;
pub mod error;
pub mod result;
pub mod visitor;

pub use doc_id::*;
pub use documents::*;
pub use error::*;
pub use result::*;
pub use visitor::*;
