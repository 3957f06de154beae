//! In-memory document store with keyword relevance scoring.

use std::cmp::Ordering;
use std::path::Path;

use async_trait::async_trait;
use talento_core::types::Timestamp;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::DocumentError;
use crate::service::DocumentService;
use crate::text::{normalize, query_terms, snippet, term_matches, tokenize};
use crate::types::{Document, DocumentFilter, DocumentSummary, NewDocument, SearchHit};

/// Document store held entirely in memory.
///
/// Relevance is the fraction of distinct query terms found in a document's
/// title or content; ties are broken by title.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    documents: Vec<Document>,
}

impl InMemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `documents`.
    pub fn with_documents(documents: impl IntoIterator<Item = NewDocument>) -> Self {
        Self {
            documents: documents.into_iter().map(materialize).collect(),
        }
    }

    /// Load a JSON array of documents from `path`.
    pub fn load_corpus(path: &Path) -> Result<Self, DocumentError> {
        let content = std::fs::read_to_string(path)?;
        let entries: Vec<NewDocument> = serde_json::from_str(&content)?;
        if let Some(blank) = entries.iter().position(|d| d.title.trim().is_empty()) {
            return Err(DocumentError::Corpus(format!(
                "entry {} has an empty title",
                blank
            )));
        }
        info!(count = entries.len(), path = %path.display(), "Document corpus loaded");
        Ok(Self::with_documents(entries))
    }

    /// Number of stored documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn materialize(doc: NewDocument) -> Document {
    Document {
        id: doc.id.unwrap_or_else(Uuid::new_v4),
        title: doc.title,
        doc_type: doc.doc_type,
        company_id: doc.company_id,
        content: doc.content,
        created_at: Timestamp::now(),
    }
}

fn score(doc: &Document, terms: &[String]) -> f64 {
    let mut doc_terms = tokenize(&doc.title);
    doc_terms.extend(tokenize(&doc.content));
    let matched = terms
        .iter()
        .filter(|t| doc_terms.iter().any(|d| term_matches(d, t)))
        .count();
    matched as f64 / terms.len() as f64
}

#[async_trait]
impl DocumentService for InMemoryDocumentStore {
    async fn search(
        &self,
        query: &str,
        scope: Option<Uuid>,
        limit: usize,
    ) -> Result<Vec<SearchHit>, DocumentError> {
        let terms = query_terms(query);
        if terms.is_empty() || limit == 0 {
            return Ok(Vec::new());
        }

        let mut hits: Vec<SearchHit> = self
            .documents
            .iter()
            .filter(|d| d.visible_in(scope))
            .filter_map(|d| {
                let relevance = score(d, &terms);
                (relevance > 0.0).then(|| SearchHit {
                    document: d.to_ref(),
                    snippet: snippet(&d.content, &terms),
                    score: relevance,
                })
            })
            .collect();

        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.document.title.cmp(&b.document.title))
        });
        hits.truncate(limit);

        debug!(terms = terms.len(), hits = hits.len(), "Keyword search complete");
        Ok(hits)
    }

    async fn list_documents(
        &self,
        filter: DocumentFilter,
    ) -> Result<Vec<DocumentSummary>, DocumentError> {
        let mut out: Vec<DocumentSummary> = self
            .documents
            .iter()
            .filter(|d| d.visible_in(filter.company_id))
            .filter(|d| filter.doc_type.map_or(true, |t| d.doc_type == t))
            .map(Document::summary)
            .collect();
        out.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(out)
    }

    async fn get_document(
        &self,
        id_or_title: &str,
        scope: Option<Uuid>,
    ) -> Result<Document, DocumentError> {
        let key = id_or_title.trim();
        let docs = &self.documents;

        let found = match Uuid::parse_str(key) {
            Ok(id) => docs.iter().find(|d| d.id == id),
            Err(_) => {
                let wanted = normalize(key);
                docs.iter().find(|d| normalize(&d.title) == wanted)
            }
        };

        found
            .filter(|d| d.visible_in(scope))
            .cloned()
            .ok_or_else(|| DocumentError::NotFound(key.to_string()))
    }
}
