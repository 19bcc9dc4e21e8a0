#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::QualityError;
use crate::config::LlmConfig;
use crate::http::{RetryPolicy, build_agent};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    #[inline]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    #[inline]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// A chat-completion model that turns a conversation into one reply
pub trait ChatBackend: Send + Sync {
    fn model_name(&self) -> &str;

    fn complete(&self, messages: &[ChatMessage]) -> crate::Result<String>;
}

/// Client for OpenAI-compatible `/chat/completions` endpoints
#[derive(Debug, Clone)]
pub struct OpenAiChatClient {
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    agent: ureq::Agent,
    retry: RetryPolicy,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChatMessage,
}

impl OpenAiChatClient {
    #[inline]
    pub fn new(config: &LlmConfig) -> crate::Result<Self> {
        let api_key = config.credential().ok_or_else(|| {
            QualityError::Config(format!(
                "LLM generation needs llm.enabled and an API key ({} or llm.api_key)",
                crate::config::API_KEY_ENV_VAR
            ))
        })?;

        Ok(Self {
            endpoint: format!("{}/chat/completions", config.api_base.trim_end_matches('/')),
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            agent: build_agent(Duration::from_secs(config.timeout_secs)),
            retry: RetryPolicy::default(),
        })
    }

    #[inline]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    fn request_completion(&self, messages: &[ChatMessage]) -> Result<String> {
        let request_json = serde_json::to_string(&CompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        })
        .context("Failed to serialize completion request")?;
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
            .context("Failed to request completion")?;

        let response: CompletionResponse = serde_json::from_str(&response_text)
            .context("Failed to parse completion response")?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .context("Completion response contained no choices")?;

        Ok(choice.message.content.trim().to_string())
    }
}

impl ChatBackend for OpenAiChatClient {
    #[inline]
    fn model_name(&self) -> &str {
        &self.model
    }

    #[inline]
    fn complete(&self, messages: &[ChatMessage]) -> crate::Result<String> {
        debug!(
            "Requesting completion from {} with {} messages",
            self.endpoint,
            messages.len()
        );
        self.request_completion(messages)
            .map_err(|e| QualityError::Llm(format!("{e:#}")))
    }
}

/// Whether answers are written by a model or assembled from retrieved text alone
pub enum GenerationMode {
    Llm(Box<dyn ChatBackend>),
    Free,
}

impl fmt::Debug for GenerationMode {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Llm(backend) => f.debug_tuple("Llm").field(&backend.model_name()).finish(),
            Self::Free => f.write_str("Free"),
        }
    }
}

impl GenerationMode {
    /// Model-backed generation when the configuration carries a usable credential,
    /// free mode otherwise
    #[inline]
    pub fn from_config(config: &LlmConfig) -> Self {
        if config.credential().is_none() {
            info!("Running in free mode: answers are built from retrieved documents only");
            return Self::Free;
        }

        match OpenAiChatClient::new(config) {
            Ok(client) => {
                info!("Generating answers with {}", config.model);
                Self::Llm(Box::new(client))
            }
            Err(e) => {
                warn!("Falling back to free mode: {}", e);
                Self::Free
            }
        }
    }

    #[inline]
    pub fn is_free(&self) -> bool {
        matches!(self, Self::Free)
    }
}
