use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A document the user may refer to by voice. Owned by an external store;
/// the interpreter only reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnownDocument {
    pub id: String,
    /// Display name. A missing name deserializes to empty and never matches.
    #[serde(default)]
    pub name: String,
    /// Storage handle or URL. `None` means the host holds no readable handle.
    #[serde(default, alias = "url")]
    pub handle: Option<String>,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(default, rename = "type", alias = "kind")]
    pub kind: Option<String>,
}

impl KnownDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            handle: None,
            created_at,
            kind: None,
        }
    }

    pub fn with_handle(mut self, handle: impl Into<String>) -> Self {
        self.handle = Some(handle.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }
}

/// Snapshot of the external document list, kept in the order it was supplied.
/// Order matters: the resolver breaks ties by position.
#[derive(Debug, Clone, Default)]
pub struct DocumentCatalog {
    documents: Vec<KnownDocument>,
}

impl DocumentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole list (the store pushed a fresh snapshot).
    pub fn replace(&mut self, documents: Vec<KnownDocument>) {
        self.documents = documents;
    }

    /// Updates a document in place by id, or appends it.
    pub fn upsert(&mut self, document: KnownDocument) {
        match self.documents.iter_mut().find(|d| d.id == document.id) {
            Some(existing) => *existing = document,
            None => self.documents.push(document),
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<KnownDocument> {
        let pos = self.documents.iter().position(|d| d.id == id)?;
        Some(self.documents.remove(pos))
    }

    pub fn documents(&self) -> &[KnownDocument] {
        &self.documents
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
