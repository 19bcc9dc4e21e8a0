use criterion::{Criterion, criterion_group, criterion_main};
use quality_rag::embeddings::{ChunkingConfig, chunk_documents, chunk_text};
use quality_rag::ingest::{Document, DocumentMetadata, FileType, markdown_to_text};
use quality_rag::knowledge::KnowledgeBaseMatcher;
use std::hint::black_box;

fn knowledge_base_text() -> String {
    KnowledgeBaseMatcher::default()
        .entries()
        .iter()
        .map(|entry| format!("# {}\n\n{}\n", entry.title, entry.content))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let markdown = knowledge_base_text();
    let text = markdown_to_text(&markdown);
    let config = ChunkingConfig::default();

    c.bench_function("chunk_text", |b| {
        b.iter(|| {
            chunk_text(
                black_box(&text),
                black_box(config.chunk_size),
                black_box(config.chunk_overlap),
            )
        })
    });

    let documents: Vec<Document> = (0..8)
        .map(|i| {
            Document::new(
                text.clone(),
                DocumentMetadata::new(format!("manual-{i}.md"), FileType::Markdown),
            )
        })
        .collect();
    c.bench_function("chunk_documents", |b| {
        b.iter(|| chunk_documents(black_box(&documents), black_box(&config)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
