
pub mod assistant;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::Result;
use crate::config::Config;
use crate::embeddings::{ChunkingConfig, chunk_documents, provider_from_config};
use crate::index::{IndexStats, LoadOutcome, NewRecord, SearchHit, VectorIndex};
use crate::ingest::{Document, DocumentMetadata};
use crate::llm::{ChatMessage, GenerationMode};

pub use assistant::{Assistant, AssistantReply, Panel};

const SEPARATOR_WIDTH: usize = 50;
const PREVIEW_CHARS: usize = 200;

pub const NO_RESULTS_MESSAGE: &str = "I couldn't find any relevant information to answer your question. \
Please try rephrasing your query or check if the knowledge base contains information about this topic.";

const SYSTEM_PROMPT: &str = "You are a helpful AI assistant. Use the provided context to answer the user's question accurately and comprehensively.

Guidelines:
- Base your answer primarily on the provided context
- If the context doesn't contain enough information, say so clearly
- Cite specific sources when possible
- Be concise but thorough
- If you're uncertain about something, express that uncertainty";

/// How a response was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnswerStatus {
    /// Written by the language model from retrieved context
    Generated,
    /// Retrieved context returned as-is because no model is configured
    FreeMode,
    /// The model call failed, so the retrieved context is returned instead
    GenerationFailed,
    NoResults,
    /// Retrieval itself failed
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceInfo {
    pub source_file: String,
    pub score: f32,
    pub id: String,
    pub chunk_preview: String,
}

impl From<&SearchHit> for SourceInfo {
    #[inline]
    fn from(hit: &SearchHit) -> Self {
        Self {
            source_file: hit.metadata.document.file_name().to_string(),
            score: hit.score,
            id: hit.id.clone(),
            chunk_preview: preview(&hit.text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagResponse {
    pub query: String,
    pub response: String,
    pub status: AnswerStatus,
    pub sources: Vec<SourceInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagStats {
    pub index: IndexStats,
    pub top_k: usize,
    /// `None` in free mode
    pub llm_model: Option<String>,
}

/// Retrieval followed by optional generation over the local document index
#[derive(Debug)]
pub struct AnswerComposer {
    index: VectorIndex,
    generation: GenerationMode,
    chunking: ChunkingConfig,
    top_k: usize,
}

impl AnswerComposer {
    #[inline]
    pub fn new(index: VectorIndex, generation: GenerationMode, top_k: usize) -> Self {
        Self {
            index,
            generation,
            chunking: ChunkingConfig::default(),
            top_k,
        }
    }

    #[inline]
    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    /// Build the composer described by `config` and load any compatible saved index
    #[inline]
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = provider_from_config(config)?;
        let mut index = VectorIndex::new(provider, config.index_path());

        match index.load()? {
            LoadOutcome::Loaded { documents } => info!("Loaded {} indexed chunks", documents),
            LoadOutcome::Missing => warn!("No existing vector index found; ingest documents first"),
            LoadOutcome::ModelMismatch { stored, current } => warn!(
                "Index was built with {} but {} is configured; rebuild it with `ingest --rebuild`",
                stored, current
            ),
        }

        Ok(Self::new(
            index,
            GenerationMode::from_config(&config.llm),
            config.retrieval.top_k,
        )
        .with_chunking(config.chunking.clone()))
    }

    #[inline]
    pub fn index(&self) -> &VectorIndex {
        &self.index
    }

    #[inline]
    pub fn index_mut(&mut self) -> &mut VectorIndex {
        &mut self.index
    }

    #[inline]
    pub fn generation(&self) -> &GenerationMode {
        &self.generation
    }

    #[inline]
    pub fn query(&self, query: &str) -> RagResponse {
        self.query_with_top_k(query, self.top_k)
    }

    /// Answer `query` from the index; failures become part of the response
    #[inline]
    pub fn query_with_top_k(&self, query: &str, top_k: usize) -> RagResponse {
        let hits = match self.index.search(query, top_k) {
            Ok(hits) => hits,
            Err(e) => {
                error!("Retrieval failed: {}", e);
                return RagResponse {
                    query: query.to_string(),
                    response: format!("An error occurred while processing your query: {e}"),
                    status: AnswerStatus::Failed,
                    sources: Vec::new(),
                };
            }
        };

        if hits.is_empty() {
            debug!("No documents retrieved");
            return RagResponse {
                query: query.to_string(),
                response: NO_RESULTS_MESSAGE.to_string(),
                status: AnswerStatus::NoResults,
                sources: Vec::new(),
            };
        }

        info!("Retrieved {} documents", hits.len());
        let context = format_context(&hits);
        let (response, status) = self.generate(query, &context);

        RagResponse {
            query: query.to_string(),
            response,
            status,
            sources: hits.iter().map(SourceInfo::from).collect(),
        }
    }

    fn generate(&self, query: &str, context: &str) -> (String, AnswerStatus) {
        let GenerationMode::Llm(backend) = &self.generation else {
            return (
                format!(
                    "**Based on your documents, here's what I found:**\n\n{context}\n\n\
                     **Summary:** The above information from your knowledge base documents contains relevant \
                     content for your query: \"{query}\". This response is generated from your local document \
                     collection without using external APIs.\n\n\
                     💡 *Note: Running in FREE mode using local document search only.*"
                ),
                AnswerStatus::FreeMode,
            );
        };

        let messages = [
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(format!(
                "Context:\n{context}\n\nQuestion: {query}\n\n\
                 Please provide a comprehensive answer based on the context above."
            )),
        ];

        match backend.complete(&messages) {
            Ok(answer) => (answer, AnswerStatus::Generated),
            Err(e) => {
                error!("Error generating response: {}", e);
                (
                    format!(
                        "**I found relevant information in your documents:**\n\n{context}\n\n\
                         *Note: There was an issue with AI processing, but the above information from your \
                         documents should help answer your question about: \"{query}\"*"
                    ),
                    AnswerStatus::GenerationFailed,
                )
            }
        }
    }

    /// Chunk, embed and insert `text`, then persist the index
    #[inline]
    pub fn add_document(&mut self, text: &str, metadata: DocumentMetadata) -> Result<usize> {
        let chunks = chunk_documents(&[Document::new(text, metadata)], &self.chunking);
        let inserted = self
            .index
            .add(chunks.into_iter().map(NewRecord::from).collect())?;

        if inserted > 0 {
            self.index.save()?;
            info!("Document added and index saved");
        }
        Ok(inserted)
    }

    #[inline]
    pub fn stats(&self) -> RagStats {
        RagStats {
            index: self.index.stats(),
            top_k: self.top_k,
            llm_model: match &self.generation {
                GenerationMode::Llm(backend) => Some(backend.model_name().to_string()),
                GenerationMode::Free => None,
            },
        }
    }
}

/// Retrieved chunks with their source and relevance, between separator lines
#[inline]
pub fn format_context(hits: &[SearchHit]) -> String {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    let documents: Vec<String> = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "Document {} (Relevance: {:.3}, Source: {}):\n{}\n",
                i + 1,
                hit.score,
                hit.metadata.document.file_name(),
                hit.text
            )
        })
        .collect();

    format!("{separator}\n{}{separator}", documents.join("\n"))
}

fn preview(text: &str) -> String {
    if text.chars().count() > PREVIEW_CHARS {
        let truncated: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{truncated}...")
    } else {
        text.to_string()
    }
}
