
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

use super::{EmbeddingProvider, embedding_error};
use crate::config::EmbeddingConfig;
use crate::http::{RetryPolicy, build_agent};

const DIMENSION_PROBE_TEXT: &str = "dimension probe";

/// Embedding provider backed by a local Ollama server
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    base_url: Url,
    model: String,
    batch_size: u32,
    agent: ureq::Agent,
    retry: RetryPolicy,
    dimension: usize,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    pub size: Option<u64>,
    pub digest: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    models: Vec<ModelInfo>,
}

impl OllamaEmbedder {
    /// Build a client without contacting the server; the dimension stays unknown until
    /// [`OllamaEmbedder::probe_dimension`] runs
    #[inline]
    pub fn new(config: &EmbeddingConfig) -> Result<Self> {
        let base_url = config
            .ollama_url()
            .context("Failed to generate Ollama URL from config")?;

        Ok(Self {
            base_url,
            model: config.model.clone(),
            batch_size: config.batch_size.max(1),
            agent: build_agent(Duration::from_secs(config.timeout_secs)),
            retry: RetryPolicy::default(),
            dimension: 0,
        })
    }

    /// Build a client and discover the model's dimension with a probe request
    #[inline]
    pub fn connect(config: &EmbeddingConfig) -> crate::Result<Self> {
        Self::new(config)
            .and_then(Self::probe_dimension)
            .map_err(|e| embedding_error(&e))
    }

    #[inline]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.agent = build_agent(timeout);
        self
    }

    #[inline]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    #[inline]
    pub fn probe_dimension(mut self) -> Result<Self> {
        let probe = self
            .request_embeddings(&[DIMENSION_PROBE_TEXT.to_string()])
            .context("Failed to probe embedding dimension")?;

        self.dimension = probe.first().map(Vec::len).unwrap_or_default();
        if self.dimension == 0 {
            anyhow::bail!("Model '{}' returned an empty embedding", self.model);
        }

        info!(
            "Ollama model {} produces {}-dimensional embeddings",
            self.model, self.dimension
        );
        Ok(self)
    }

    /// Test connection to Ollama server and verify model availability
    #[inline]
    pub fn health_check(&self) -> Result<()> {
        debug!("Performing health check for Ollama at {}", self.base_url);

        self.validate_model().context("Model validation failed")?;

        info!(
            "Health check passed for Ollama server at {} with model {}",
            self.base_url, self.model
        );
        Ok(())
    }

    /// Validate that the configured model is available
    #[inline]
    pub fn validate_model(&self) -> Result<()> {
        debug!("Validating model: {}", self.model);

        let models = self.list_models().context("Failed to list models")?;

        if models.iter().any(|m| m.name == self.model) {
            debug!("Model {} is available", self.model);
            Ok(())
        } else {
            let available_models: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
            warn!(
                "Model {} not found. Available models: {:?}",
                self.model, available_models
            );
            Err(anyhow::anyhow!(
                "Model '{}' is not available. Available models: {:?}",
                self.model,
                available_models
            ))
        }
    }

    /// List all available models
    #[inline]
    pub fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let url = self
            .base_url
            .join("/api/tags")
            .context("Failed to build models URL")?;

        debug!("Fetching available models from {}", url);

        let response_text = self
            .retry
            .run(url.as_str(), || {
                self.agent
                    .get(url.as_str())
                    .call()
                    .and_then(|mut resp| resp.body_mut().read_to_string())
            })
            .context("Failed to fetch models")?;

        let models_response: ModelsResponse =
            serde_json::from_str(&response_text).context("Failed to parse models response")?;

        debug!("Found {} models", models_response.models.len());
        Ok(models_response.models)
    }

    fn request_embeddings(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            model: &self.model,
            input: texts,
        };

        let url = self
            .base_url
            .join("/api/embed")
            .context("Failed to build embedding URL")?;

        let request_json =
            serde_json::to_string(&request).context("Failed to serialize embedding request")?;

        let response_text = self
            .retry
            .run(url.as_str(), || {
                self.agent
                    .post(url.as_str())
                    .header("Content-Type", "application/json")
                    .send(&request_json)
                    .and_then(|mut resp| resp.body_mut().read_to_string())
            })
            .context("Failed to generate embeddings")?;

        let response: EmbedResponse =
            serde_json::from_str(&response_text).context("Failed to parse embedding response")?;

        if response.embeddings.len() != texts.len() {
            return Err(anyhow::anyhow!(
                "Mismatch between request and response counts: {} vs {}",
                texts.len(),
                response.embeddings.len()
            ));
        }

        Ok(response.embeddings)
    }

    fn embed_batches(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        let mut results = Vec::with_capacity(texts.len());
        for batch in texts.chunks(self.batch_size as usize) {
            let vectors = self
                .request_embeddings(batch)
                .with_context(|| format!("Failed to process batch of {} texts", batch.len()))?;
            results.extend(vectors);
        }

        debug!("Generated {} embeddings total", results.len());
        Ok(results)
    }
}

impl EmbeddingProvider for OllamaEmbedder {
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
        self.embed_batches(texts).map_err(|e| embedding_error(&e))
    }
}
