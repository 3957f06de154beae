//! Error types for document retrieval.

use talento_core::error::TalentoError;

/// Errors from the document service.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Document backend unavailable: {0}")]
    Backend(String),
    #[error("Invalid document corpus: {0}")]
    Corpus(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for DocumentError {
    fn from(err: serde_json::Error) -> Self {
        DocumentError::Corpus(err.to_string())
    }
}

impl From<DocumentError> for TalentoError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::Io(e) => TalentoError::Io(e),
            other => TalentoError::Document(other.to_string()),
        }
    }
}
