
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::{EmbeddingProvider, embedding_error};
use crate::QualityError;
use crate::config::EmbeddingConfig;
use crate::http::{RetryPolicy, build_agent};

const DEFAULT_DIMENSION: usize = 1536;

/// Known output widths of hosted embedding models
const MODEL_DIMENSIONS: [(&str, usize); 3] = [
    ("text-embedding-3-small", 1536),
    ("text-embedding-3-large", 3072),
    ("text-embedding-ada-002", 1536),
];

/// Embedding provider for OpenAI-compatible `/embeddings` endpoints
#[derive(Debug, Clone)]
pub struct OpenAiEmbedder {
    endpoint: String,
    api_key: String,
    model: String,
    batch_size: u32,
    agent: ureq::Agent,
    retry: RetryPolicy,
    dimension: usize,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingData {
    embedding: Vec<f32>,
    #[serde(default)]
    index: usize,
}

/// Output width for `model`, falling back to the common default
#[inline]
pub fn dimension_for_model(model: &str) -> usize {
    MODEL_DIMENSIONS
        .iter()
        .find(|(name, _)| *name == model)
        .map_or(DEFAULT_DIMENSION, |(_, dimension)| *dimension)
}

impl OpenAiEmbedder {
    #[inline]
    pub fn new(config: &EmbeddingConfig) -> crate::Result<Self> {
        let api_key = config.credential().ok_or_else(|| {
            QualityError::Config(format!(
                "OpenAI embeddings need an API key; set {} or embedding.api_key",
                crate::config::API_KEY_ENV_VAR
            ))
        })?;

        Ok(Self {
            endpoint: format!("{}/embeddings", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            batch_size: config.batch_size.max(1),
            agent: build_agent(Duration::from_secs(config.timeout_secs)),
            retry: RetryPolicy::default(),
            dimension: dimension_for_model(&config.model),
        })
    }

    #[inline]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request_json = serde_json::to_string(&EmbeddingsRequest {
            model: &self.model,
            input: texts,
        })
        .context("Failed to serialize embeddings request")?;
        let authorization = format!("Bearer {}", self.api_key);

        let response_text = self
            .retry
            .run(&self.endpoint, || {
                self.agent
                    .post(&self.endpoint)
                    .header("Content-Type", "application/json")
                    .header("Authorization", &authorization)
                    .send(&request_json)
                    .and_then(|mut resp| resp.body_mut().read_to_string())
            })
            .context("Failed to request embeddings")?;

        let mut response: EmbeddingsResponse = serde_json::from_str(&response_text)
            .context("Failed to parse embeddings response")?;

        if response.data.len() != texts.len() {
            anyhow::bail!(
                "Mismatch between request and response counts: {} vs {}",
                texts.len(),
                response.data.len()
            );
        }

        response.data.sort_by_key(|item| item.index);
        Ok(response.data.into_iter().map(|item| item.embedding).collect())
    }
}

impl EmbeddingProvider for OpenAiEmbedder {
    #[inline]
    fn model_name(&self) -> &str {
        &self.model
    }

    #[inline]
    fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    fn embed_many(&self, texts: &[String]) -> crate::Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());

        for batch in texts.chunks(self.batch_size as usize) {
            debug!("Requesting {} embeddings from {}", batch.len(), self.endpoint);
            let vectors = self
                .request_embeddings(batch)
                .map_err(|e| embedding_error(&e))?;
            results.extend(vectors);
        }

        Ok(results)
    }
}
