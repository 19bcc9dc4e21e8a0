// Vector index: embedding records with flat inner-product search and on-disk persistence

#[cfg(test)]
mod tests;

pub mod storage;
pub mod vector_store;

use serde::{Deserialize, Serialize};

use crate::embeddings::Chunk;
use crate::ingest::DocumentMetadata;

pub use vector_store::VectorIndex;

/// Metadata stored alongside each embedded chunk
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    /// Metadata inherited from the source document
    #[serde(flatten)]
    pub document: DocumentMetadata,
    /// Position of this chunk within its document
    #[serde(default)]
    pub chunk_index: usize,
    #[serde(default)]
    pub total_chunks: usize,
}

impl From<DocumentMetadata> for ChunkMetadata {
    #[inline]
    fn from(document: DocumentMetadata) -> Self {
        Self {
            document,
            chunk_index: 0,
            total_chunks: 1,
        }
    }
}

/// A record waiting to be embedded and inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub text: String,
    pub metadata: ChunkMetadata,
    /// Explicit identifier; the content hash is used when absent
    pub id: Option<String>,
}

impl NewRecord {
    #[inline]
    pub fn new(text: impl Into<String>, metadata: ChunkMetadata) -> Self {
        Self {
            text: text.into(),
            metadata,
            id: None,
        }
    }

    #[inline]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

impl From<Chunk> for NewRecord {
    #[inline]
    fn from(chunk: Chunk) -> Self {
        Self::new(chunk.text, chunk.metadata)
    }
}

/// A stored record, minus its vector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedChunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    /// Inner product of the unit-normalised query and record vectors
    pub score: f32,
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

/// Result of reading a persisted index
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { documents: usize },
    /// No complete set of index files exists yet
    Missing,
    /// The files were written with a different embedding model and were left unloaded
    ModelMismatch { stored: String, current: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub document_count: usize,
    pub vector_count: usize,
    pub model: String,
    pub dimension: usize,
}

/// Lowercase hex MD5 of the text; identical text always yields the same id
#[inline]
pub fn content_id(text: &str) -> String {
    format!("{:x}", md5::compute(text.as_bytes()))
}
