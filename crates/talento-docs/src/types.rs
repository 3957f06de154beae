//! Document types exchanged between the store and the action layer.

use serde::{Deserialize, Serialize};
use std::fmt;
use talento_core::types::Timestamp;
use uuid::Uuid;

/// Kind of HR document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    Politica,
    Reglamento,
    Contrato,
    Manual,
    Formato,
    Otro,
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentType::Politica => write!(f, "politica"),
            DocumentType::Reglamento => write!(f, "reglamento"),
            DocumentType::Contrato => write!(f, "contrato"),
            DocumentType::Manual => write!(f, "manual"),
            DocumentType::Formato => write!(f, "formato"),
            DocumentType::Otro => write!(f, "otro"),
        }
    }
}

impl std::str::FromStr for DocumentType {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match crate::text::normalize(s).trim() {
            "politica" | "politicas" => Ok(DocumentType::Politica),
            "reglamento" | "reglamentos" => Ok(DocumentType::Reglamento),
            "contrato" | "contratos" => Ok(DocumentType::Contrato),
            "manual" | "manuales" => Ok(DocumentType::Manual),
            "formato" | "formatos" => Ok(DocumentType::Formato),
            "otro" | "otros" => Ok(DocumentType::Otro),
            _ => Err(format!("Unknown document type: {}", s)),
        }
    }
}

/// A stored document with its full text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub title: String,
    pub doc_type: DocumentType,
    /// Owning company. `None` marks a document shared by every company.
    pub company_id: Option<Uuid>,
    pub content: String,
    pub created_at: Timestamp,
}

impl Document {
    /// Whether a caller scoped to `scope` may see this document.
    ///
    /// An unscoped caller sees everything; shared documents are visible to
    /// every scope.
    pub fn visible_in(&self, scope: Option<Uuid>) -> bool {
        match (scope, self.company_id) {
            (None, _) | (_, None) => true,
            (Some(scope), Some(owner)) => scope == owner,
        }
    }

    pub fn to_ref(&self) -> DocumentRef {
        DocumentRef {
            id: self.id,
            title: self.title.clone(),
            doc_type: self.doc_type,
        }
    }

    pub fn summary(&self) -> DocumentSummary {
        DocumentSummary {
            id: self.id,
            title: self.title.clone(),
            doc_type: self.doc_type,
            created_at: self.created_at,
        }
    }
}

/// Document fields supplied when adding to a store or loading a corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewDocument {
    #[serde(default)]
    pub id: Option<Uuid>,
    pub title: String,
    pub doc_type: DocumentType,
    #[serde(default)]
    pub company_id: Option<Uuid>,
    pub content: String,
}

/// Lightweight pointer to a document, returned with search hits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRef {
    pub id: Uuid,
    pub title: String,
    pub doc_type: DocumentType,
}

/// Listing entry for a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: Uuid,
    pub title: String,
    pub doc_type: DocumentType,
    pub created_at: Timestamp,
}

/// A single search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub document: DocumentRef,
    pub snippet: String,
    /// Relevance score (0.0 to 1.0).
    pub score: f64,
}

/// Filters for document listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFilter {
    pub doc_type: Option<DocumentType>,
    pub company_id: Option<Uuid>,
}
