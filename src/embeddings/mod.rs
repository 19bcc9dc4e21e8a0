pub mod chunking;
pub mod hashing;
pub mod ollama;
pub mod openai;


use tracing::info;

use crate::config::{Config, EmbeddingProviderKind};
use crate::{QualityError, Result};

pub use chunking::{Chunk, ChunkingConfig, chunk_documents, chunk_text, estimate_token_count};
pub use hashing::HashingEmbedder;
pub use ollama::{ModelInfo, OllamaEmbedder};
pub use openai::OpenAiEmbedder;

/// Turns text into fixed-width vectors.
///
/// The dimension never changes for the lifetime of a provider, so an index built with one
/// provider can check every batch against it.
pub trait EmbeddingProvider: Send + Sync {
    /// Identifier recorded alongside a persisted index
    fn model_name(&self) -> &str;

    fn dimension(&self) -> usize;

    /// Embed a batch of texts, returning one vector per input in order
    fn embed_many(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    #[inline]
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_many(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| QualityError::Embedding("provider returned no vector".to_string()))
    }
}

/// Build the provider selected in the configuration
#[inline]
pub fn provider_from_config(config: &Config) -> Result<Box<dyn EmbeddingProvider>> {
    let provider: Box<dyn EmbeddingProvider> = match config.embedding.provider {
        EmbeddingProviderKind::Hashing => Box::new(HashingEmbedder::new(
            config.embedding.dimension as usize,
        )),
        EmbeddingProviderKind::Ollama => Box::new(OllamaEmbedder::connect(&config.embedding)?),
        EmbeddingProviderKind::OpenAi => Box::new(OpenAiEmbedder::new(&config.embedding)?),
    };

    info!(
        "Using {} embeddings with model {} ({} dimensions)",
        config.embedding.provider,
        provider.model_name(),
        provider.dimension()
    );

    Ok(provider)
}

/// Scale `vector` to unit L2 norm in place; zero vectors are left untouched
#[inline]
pub fn normalize(vector: &mut [f32]) {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > f32::EPSILON {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
}

pub(crate) fn embedding_error(error: &anyhow::Error) -> QualityError {
    QualityError::Embedding(format!("{error:#}"))
}
