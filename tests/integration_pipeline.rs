#![expect(
    clippy::tests_outside_test_module,
    reason = "integration tests are only compiled in test mode"
)]

// End-to-end runs over the in-process hashing model; no servers needed

use anyhow::Result;
use quality_rag::commands::ingest;
use quality_rag::config::{Config, EmbeddingProviderKind};
use quality_rag::embeddings::{HashingEmbedder, chunk_documents};
use quality_rag::index::{LoadOutcome, NewRecord, VectorIndex};
use quality_rag::ingest::DocumentLoader;
use quality_rag::rag::{AnswerComposer, AnswerStatus, Assistant};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const PARETO_DOC: &str = "The Pareto principle, also known as the 80/20 rule, guides prioritization: \
a few vital causes produce most defects, so fix those first.";
const SPC_DOC: &str =
    "Statistical process control uses control charts to monitor variation in a running process.";
const FISHBONE_DOC: &str =
    "Fishbone diagrams organise the possible causes of a problem into categories such as machine and method.";

fn init_test_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter("debug")
        .with_test_writer()
        .try_init()
        .ok();
}

fn write_corpus(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir.join("nested"))?;
    fs::write(dir.join("pareto.txt"), PARETO_DOC)?;
    fs::write(dir.join("spc.md"), format!("# SPC\n\n{SPC_DOC}"))?;
    fs::write(dir.join("nested").join("fishbone.txt"), FISHBONE_DOC)?;
    fs::write(dir.join("ignored.bin"), [0_u8, 1, 2])?;
    Ok(())
}

fn hashing_config(base: &Path) -> Config {
    let mut config = Config::with_base_dir(base);
    config.embedding.provider = EmbeddingProviderKind::Hashing;
    config.embedding.dimension = 512;
    config
}

#[test]
fn pareto_document_ranks_first() -> Result<()> {
    init_test_tracing();
    let dir = TempDir::new()?;
    let mut index = VectorIndex::new(Box::new(HashingEmbedder::new(512)), dir.path());

    index.add(vec![
        NewRecord::new(PARETO_DOC, Default::default()),
        NewRecord::new(SPC_DOC, Default::default()),
        NewRecord::new(FISHBONE_DOC, Default::default()),
    ])?;

    let hits = index.search("80/20 rule prioritization", 3)?;
    assert_eq!(hits.len(), 3);
    assert_eq!(hits[0].text, PARETO_DOC);
    assert!(hits[0].score > hits[1].score);

    let top = index.search("80/20 rule prioritization", 1)?;
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].text, PARETO_DOC);
    assert!((top[0].score - hits[0].score).abs() < 1e-6);
    Ok(())
}

#[test]
fn saved_index_round_trips() -> Result<()> {
    init_test_tracing();
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;

    let documents = DocumentLoader::default().load_directory(docs.path(), true)?;
    assert_eq!(documents.len(), 3);

    let chunks = chunk_documents(&documents, &Default::default());
    let records: Vec<NewRecord> = chunks.into_iter().map(NewRecord::from).collect();

    let store = TempDir::new()?;
    let mut index = VectorIndex::new(Box::new(HashingEmbedder::new(256)), store.path());
    index.add(records)?;
    index.save()?;

    let before = index.search("control charts", 3)?;

    let mut reloaded = VectorIndex::new(Box::new(HashingEmbedder::new(256)), store.path());
    assert_eq!(reloaded.load()?, LoadOutcome::Loaded { documents: 3 });
    let after = reloaded.search("control charts", 3)?;

    assert_eq!(before.len(), after.len());
    for (old, new) in before.iter().zip(&after) {
        assert_eq!(old.id, new.id);
        assert_eq!(old.text, new.text);
        assert!((old.score - new.score).abs() < 1e-5, "{} vs {}", old.score, new.score);
    }

    reloaded.clear()?;
    let mut after_clear = VectorIndex::new(Box::new(HashingEmbedder::new(256)), store.path());
    assert_eq!(after_clear.load()?, LoadOutcome::Missing);
    Ok(())
}

#[test]
fn non_recursive_load_skips_subdirectories() -> Result<()> {
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;

    let documents = DocumentLoader::default().load_directory(docs.path(), false)?;
    let names: Vec<&str> = documents.iter().map(|d| d.metadata.file_name()).collect();
    assert_eq!(names, vec!["pareto.txt", "spc.md"]);
    Ok(())
}

#[test]
fn ingest_then_ask_in_free_mode() -> Result<()> {
    init_test_tracing();
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;
    let home = TempDir::new()?;
    let config = hashing_config(home.path());

    ingest(&config, &[docs.path().to_path_buf()], false, true)?;
    assert!(config.index_path().join("index_config.json").exists());

    let composer = AnswerComposer::from_config(&config)?;
    assert_eq!(composer.index().len(), 3);

    let response = composer.query("80/20 rule prioritization");
    assert_eq!(response.status, AnswerStatus::FreeMode);
    assert_eq!(response.sources[0].source_file, "pareto.txt");
    assert!(response.response.contains("80/20 rule"));
    Ok(())
}

#[test]
fn rebuild_replaces_previous_contents() -> Result<()> {
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;
    let home = TempDir::new()?;
    let config = hashing_config(home.path());

    ingest(&config, &[docs.path().to_path_buf()], false, true)?;
    ingest(&config, &[docs.path().join("pareto.txt")], false, true)?;
    assert_eq!(AnswerComposer::from_config(&config)?.index().len(), 4);

    ingest(&config, &[docs.path().join("pareto.txt")], true, true)?;
    assert_eq!(AnswerComposer::from_config(&config)?.index().len(), 1);
    Ok(())
}

#[test]
fn rebuild_without_documents_keeps_previous_index() -> Result<()> {
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;
    let empty = TempDir::new()?;
    let home = TempDir::new()?;
    let config = hashing_config(home.path());

    ingest(&config, &[docs.path().to_path_buf()], false, true)?;
    ingest(&config, &[empty.path().to_path_buf()], true, true)?;

    assert_eq!(AnswerComposer::from_config(&config)?.index().len(), 3);
    Ok(())
}

#[test]
fn ingest_refuses_index_from_another_model() -> Result<()> {
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;
    let home = TempDir::new()?;
    let mut config = hashing_config(home.path());

    ingest(&config, &[docs.path().to_path_buf()], false, true)?;

    config.embedding.dimension = 128;
    let error = ingest(&config, &[docs.path().to_path_buf()], false, true)
        .expect_err("model changed");
    assert!(error.to_string().contains("--rebuild"));
    Ok(())
}

#[test]
fn assistant_layers_documents_knowledge_and_tools() -> Result<()> {
    init_test_tracing();
    let docs = TempDir::new()?;
    write_corpus(docs.path())?;
    let home = TempDir::new()?;
    let config = hashing_config(home.path());
    ingest(&config, &[docs.path().to_path_buf()], false, true)?;

    let mut assistant = Assistant::from_config(&config)?;

    let greeting = assistant.reply("hello");
    assert!(greeting.is_conversational());

    let reply = assistant.reply("How do I use a pareto chart to prioritize defects?");
    let titles: Vec<&str> = reply.panels.iter().map(|panel| panel.title).collect();
    assert_eq!(
        titles,
        vec![
            "📚 Knowledge Base Response",
            "🧠 Quality Management Insights",
            "🔧 Tool Recommendations",
        ]
    );
    assert!(reply.render().contains("pareto.txt"));
    Ok(())
}
