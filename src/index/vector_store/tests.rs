use super::*;
use crate::embeddings::HashingEmbedder;
use crate::index::ChunkMetadata;
use crate::ingest::{DocumentMetadata, FileType};
use tempfile::TempDir;

struct FailingProvider;

impl EmbeddingProvider for FailingProvider {
    fn model_name(&self) -> &str {
        "failing"
    }

    fn dimension(&self) -> usize {
        8
    }

    fn embed_many(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(QualityError::Embedding("server unavailable".to_string()))
    }
}

struct WrongWidthProvider;

impl EmbeddingProvider for WrongWidthProvider {
    fn model_name(&self) -> &str {
        "wrong-width"
    }

    fn dimension(&self) -> usize {
        8
    }

    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0; 4]).collect())
    }
}

fn record(text: &str, source: &str) -> NewRecord {
    NewRecord::new(
        text,
        ChunkMetadata::from(DocumentMetadata::new(source, FileType::Text)),
    )
}

fn hashing_index(dir: &Path) -> VectorIndex {
    VectorIndex::new(Box::new(HashingEmbedder::new(256)), dir.join("vector_index"))
}

#[test]
fn add_skips_blank_text_and_assigns_content_ids() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());

    let inserted = index
        .add(vec![
            record("Check sheets collect defect data", "a.txt"),
            record("   ", "blank.txt"),
            record("Histograms show distribution", "b.txt").with_id("custom-id"),
        ])
        .expect("hashing add succeeds");

    assert_eq!(inserted, 2);
    assert_eq!(index.len(), 2);
    assert_eq!(index.entries[0].id, content_id("Check sheets collect defect data"));
    assert_eq!(index.entries[1].id, "custom-id");
    assert_eq!(index.vectors.len(), index.entries.len());
}

#[test]
fn vectors_are_unit_length() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    index
        .add(vec![record("control chart limits", "c.txt")])
        .expect("add succeeds");

    let norm = index.vectors[0].iter().map(|v| v * v).sum::<f32>().sqrt();
    assert!((norm - 1.0).abs() < 1e-5);
}

#[test]
fn search_ranks_best_match_first() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    index
        .add(vec![
            record("Customer surveys measure satisfaction", "survey.txt"),
            record("Control charts track process stability over time", "spc.txt"),
            record("Fishbone diagrams organise possible causes", "fishbone.txt"),
        ])
        .expect("add succeeds");

    let hits = index
        .search("process stability control charts", 2)
        .expect("search succeeds");

    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].metadata.document.source, "spc.txt");
    assert!(hits[0].score >= hits[1].score);
}

#[test]
fn search_edge_cases_return_empty() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());

    assert!(index.search("anything", 4).expect("empty index").is_empty());

    index
        .add(vec![record("pareto analysis", "p.txt")])
        .expect("add succeeds");

    assert!(index.search("   ", 4).expect("blank query").is_empty());
    assert!(index.search("pareto", 0).expect("zero top_k").is_empty());
    assert_eq!(index.search("pareto", 10).expect("capped").len(), 1);
}

#[test]
fn provider_failure_inserts_nothing() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = VectorIndex::new(Box::new(FailingProvider), dir.path());

    let error = index
        .add(vec![record("some text", "a.txt")])
        .expect_err("provider fails");
    assert!(matches!(error, QualityError::Embedding(_)));
    assert!(index.is_empty());
}

#[test]
fn dimension_mismatch_aborts_batch() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = VectorIndex::new(Box::new(WrongWidthProvider), dir.path());

    let error = index
        .add(vec![record("first", "a.txt"), record("second", "b.txt")])
        .expect_err("widths disagree");
    assert!(matches!(error, QualityError::Embedding(_)));
    assert_eq!(index.stats().vector_count, 0);
}

#[test]
fn load_without_files_is_missing() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    assert_eq!(index.load().expect("load succeeds"), LoadOutcome::Missing);
}

#[test]
fn load_with_other_model_is_mismatch() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    index
        .add(vec![record("pdca cycle", "p.txt")])
        .expect("add succeeds");
    index.save().expect("save succeeds");

    let mut other = VectorIndex::new(
        Box::new(HashingEmbedder::new(128)),
        dir.path().join("vector_index"),
    );
    assert_eq!(
        other.load().expect("load succeeds"),
        LoadOutcome::ModelMismatch {
            stored: "hashing-bow-256".to_string(),
            current: "hashing-bow-128".to_string(),
        }
    );
    assert!(other.is_empty());
}

#[test]
fn clear_removes_memory_and_files() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    index
        .add(vec![record("poka-yoke devices", "p.txt")])
        .expect("add succeeds");
    index.save().expect("save succeeds");
    assert!(storage::artifacts_present(index.directory()));

    index.clear().expect("clear succeeds");

    assert!(index.is_empty());
    assert!(!index.directory().join(VECTORS_FILE).exists());
    assert_eq!(index.load().expect("load succeeds"), LoadOutcome::Missing);
}

#[test]
fn reset_keeps_saved_files() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    index
        .add(vec![record("andon cords", "a.txt")])
        .expect("add succeeds");
    index.save().expect("save succeeds");

    index.reset();

    assert!(index.is_empty());
    assert!(storage::artifacts_present(index.directory()));
    assert_eq!(
        index.load().expect("load succeeds"),
        LoadOutcome::Loaded { documents: 1 }
    );
}

#[test]
fn stats_report_model_and_counts() {
    let dir = TempDir::new().expect("temp dir");
    let mut index = hashing_index(dir.path());
    index
        .add(vec![record("a", "a.txt"), record("b", "b.txt")])
        .expect("add succeeds");

    let stats = index.stats();
    assert_eq!(stats.document_count, 2);
    assert_eq!(stats.vector_count, 2);
    assert_eq!(stats.model, "hashing-bow-256");
    assert_eq!(stats.dimension, 256);
}
