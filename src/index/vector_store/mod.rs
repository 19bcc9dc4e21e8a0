#[cfg(test)]
mod tests;

use chrono::Utc;
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::storage::{self, CONFIG_FILE, IndexManifest, METADATA_FILE, VECTORS_FILE};
use super::{IndexStats, IndexedChunk, LoadOutcome, NewRecord, SearchHit, content_id};
use crate::embeddings::{EmbeddingProvider, normalize};
use crate::{QualityError, Result};

/// Flat inner-product index over unit-normalised vectors.
///
/// `vectors[i]` always belongs to `entries[i]`; both only change together.
pub struct VectorIndex {
    provider: Box<dyn EmbeddingProvider>,
    directory: PathBuf,
    vectors: Vec<Vec<f32>>,
    entries: Vec<IndexedChunk>,
}

impl std::fmt::Debug for VectorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VectorIndex")
            .field("model", &self.provider.model_name())
            .field("directory", &self.directory)
            .field("len", &self.entries.len())
            .finish()
    }
}

fn index_error(error: &anyhow::Error) -> QualityError {
    QualityError::Index(format!("{error:#}"))
}

impl VectorIndex {
    /// Create an empty index persisted under `directory`
    #[inline]
    pub fn new(provider: Box<dyn EmbeddingProvider>, directory: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            directory: directory.into(),
            vectors: Vec::new(),
            entries: Vec::new(),
        }
    }

    #[inline]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    #[inline]
    pub fn provider(&self) -> &dyn EmbeddingProvider {
        self.provider.as_ref()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Embed and insert `records`, returning how many were inserted.
    ///
    /// Blank records are skipped. If embedding fails or any vector has the wrong width,
    /// nothing is inserted.
    #[inline]
    pub fn add(&mut self, records: Vec<NewRecord>) -> Result<usize> {
        let records: Vec<NewRecord> = records
            .into_iter()
            .filter(|record| !record.text.trim().is_empty())
            .collect();

        if records.is_empty() {
            debug!("No records to index");
            return Ok(0);
        }

        let texts: Vec<String> = records.iter().map(|r| r.text.clone()).collect();
        let mut vectors = self.provider.embed_many(&texts)?;

        if vectors.len() != records.len() {
            return Err(QualityError::Embedding(format!(
                "Provider returned {} vectors for {} texts",
                vectors.len(),
                records.len()
            )));
        }

        let dimension = self.provider.dimension();
        if let Some(bad) = vectors.iter().find(|v| v.len() != dimension) {
            return Err(QualityError::Embedding(format!(
                "Embedding has {} dimensions, index expects {}",
                bad.len(),
                dimension
            )));
        }

        vectors.iter_mut().for_each(|v| normalize(v));

        let inserted = records.len();
        self.entries
            .extend(records.into_iter().map(|record| IndexedChunk {
                id: record.id.unwrap_or_else(|| content_id(&record.text)),
                text: record.text,
                metadata: record.metadata,
            }));
        self.vectors.extend(vectors);

        info!(
            "Indexed {} records ({} total)",
            inserted,
            self.entries.len()
        );
        Ok(inserted)
    }

    /// Return up to `top_k` records ordered by descending similarity to `query`
    #[inline]
    pub fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchHit>> {
        if self.is_empty() || top_k == 0 || query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let mut query_vector = self.provider.embed_one(query)?;
        if query_vector.len() != self.provider.dimension() {
            return Err(QualityError::Embedding(format!(
                "Query embedding has {} dimensions, index expects {}",
                query_vector.len(),
                self.provider.dimension()
            )));
        }
        normalize(&mut query_vector);

        let mut scored: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(i, v)| (i, dot(&query_vector, v)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let hits: Vec<SearchHit> = scored
            .into_iter()
            .take(top_k.min(self.len()))
            .map(|(i, score)| {
                let entry = &self.entries[i];
                SearchHit {
                    score,
                    id: entry.id.clone(),
                    text: entry.text.clone(),
                    metadata: entry.metadata.clone(),
                }
            })
            .collect();

        debug!("Search returned {} hits", hits.len());
        Ok(hits)
    }

    /// Persist vectors, metadata and the manifest into the index directory
    #[inline]
    pub fn save(&self) -> Result<()> {
        fs::create_dir_all(&self.directory)?;

        let dimension = self.provider.dimension();
        storage::write_vectors(
            &self.directory.join(VECTORS_FILE),
            &self.vectors,
            dimension,
        )
        .map_err(|e| index_error(&e))?;
        storage::write_json(&self.directory.join(METADATA_FILE), &self.entries)
            .map_err(|e| index_error(&e))?;
        storage::write_json(
            &self.directory.join(CONFIG_FILE),
            &IndexManifest {
                embedding_model: self.provider.model_name().to_string(),
                dimension,
                document_count: self.entries.len(),
                saved_at: Utc::now(),
            },
        )
        .map_err(|e| index_error(&e))?;

        info!(
            "Saved index with {} records to {}",
            self.entries.len(),
            self.directory.display()
        );
        Ok(())
    }

    /// Replace the in-memory contents with the persisted index, if compatible
    #[inline]
    pub fn load(&mut self) -> Result<LoadOutcome> {
        if !storage::artifacts_present(&self.directory) {
            debug!("No saved index in {}", self.directory.display());
            return Ok(LoadOutcome::Missing);
        }

        let manifest: IndexManifest = storage::read_json(&self.directory.join(CONFIG_FILE))
            .map_err(|e| index_error(&e))?;

        let current = self.provider.model_name().to_string();
        if manifest.embedding_model != current || manifest.dimension != self.provider.dimension()
        {
            warn!(
                "Saved index uses model {} ({} dims), current provider is {} ({} dims)",
                manifest.embedding_model,
                manifest.dimension,
                current,
                self.provider.dimension()
            );
            return Ok(LoadOutcome::ModelMismatch {
                stored: manifest.embedding_model,
                current,
            });
        }

        let (vectors, dimension) = storage::read_vectors(&self.directory.join(VECTORS_FILE))
            .map_err(|e| index_error(&e))?;
        let entries: Vec<IndexedChunk> = storage::read_json(&self.directory.join(METADATA_FILE))
            .map_err(|e| index_error(&e))?;

        if vectors.len() != entries.len() {
            return Err(QualityError::Index(format!(
                "Index files disagree: {} vectors but {} metadata entries",
                vectors.len(),
                entries.len()
            )));
        }
        if dimension != manifest.dimension {
            return Err(QualityError::Index(format!(
                "Vector file has {} dimensions, manifest says {}",
                dimension, manifest.dimension
            )));
        }

        self.vectors = vectors;
        self.entries = entries;

        info!(
            "Loaded index with {} records from {}",
            self.entries.len(),
            self.directory.display()
        );
        Ok(LoadOutcome::Loaded {
            documents: self.entries.len(),
        })
    }

    /// Drop every record held in memory; saved files stay until the next `save` or `clear`
    #[inline]
    pub fn reset(&mut self) {
        self.vectors.clear();
        self.entries.clear();
    }

    /// Drop every record and delete the persisted files
    #[inline]
    pub fn clear(&mut self) -> Result<()> {
        self.reset();
        storage::remove_artifacts(&self.directory).map_err(|e| index_error(&e))?;
        info!("Cleared index in {}", self.directory.display());
        Ok(())
    }

    #[inline]
    pub fn stats(&self) -> IndexStats {
        IndexStats {
            document_count: self.entries.len(),
            vector_count: self.vectors.len(),
            model: self.provider.model_name().to_string(),
            dimension: self.provider.dimension(),
        }
    }
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
