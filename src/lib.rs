use thiserror::Error;

pub type Result<T> = std::result::Result<T, QualityError>;

#[derive(Error, Debug)]
pub enum QualityError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Ingestion error: {0}")]
    Ingestion(String),

    #[error("Embedding error: {0}")]
    Embedding(String),

    #[error("Index error: {0}")]
    Index(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

pub mod commands;
pub mod config;
pub mod conversation;
pub mod embeddings;
pub mod http;
pub mod index;
pub mod ingest;
pub mod knowledge;
pub mod llm;
pub mod query;
pub mod rag;
pub mod tools;
