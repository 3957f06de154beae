//! Document retrieval for the Talento action layer.
//!
//! Defines the `DocumentService` seam that document actions call into, plus
//! an in-memory keyword-scored store used by the binary and by tests.

pub mod error;
pub mod service;
pub mod store;
pub mod text;
pub mod types;

pub use error::DocumentError;
pub use service::DocumentService;
pub use store::InMemoryDocumentStore;
pub use types::{
    Document, DocumentFilter, DocumentRef, DocumentSummary, DocumentType, NewDocument, SearchHit,
};
