//! The document retrieval seam consumed by document actions.

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DocumentError;
use crate::types::{Document, DocumentFilter, DocumentSummary, SearchHit};

/// Retrieval capability backing the document actions.
///
/// Production deployments plug a semantic (embedding) search backend in
/// here; [`InMemoryDocumentStore`](crate::store::InMemoryDocumentStore)
/// provides keyword scoring for local runs and tests. Callers apply their
/// own deadlines: implementations may block on I/O for as long as they need.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// Rank documents visible in `scope` against `query`, best first,
    /// returning at most `limit` hits.
    async fn search(
        &self,
        query: &str,
        scope: Option<Uuid>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, DocumentError>;

    /// List documents matching `filter`, ordered by title.
    async fn list_documents(
        &self,
        filter: DocumentFilter,
    ) -> Result<Vec<DocumentSummary>, DocumentError>;

    /// Fetch one document by UUID or by case-insensitive exact title.
    ///
    /// Documents outside `scope` are reported as not found.
    async fn get_document(
        &self,
        id_or_title: &str,
        scope: Option<Uuid>,
    ) -> Result<Document, DocumentError>;
}
