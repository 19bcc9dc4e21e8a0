#[cfg(test)]
mod tests;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::path::Path;

use super::{Config, ConfigError, EmbeddingConfig, EmbeddingProviderKind, LlmConfig};

const PROVIDERS: [EmbeddingProviderKind; 3] = [
    EmbeddingProviderKind::Hashing,
    EmbeddingProviderKind::Ollama,
    EmbeddingProviderKind::OpenAi,
];

#[inline]
pub fn run_interactive_config(config_dir: &Path) -> Result<()> {
    eprintln!("{}", style("🔧 Quality Assistant Configuration Setup").bold().cyan());
    eprintln!();

    let mut config = load_existing_config(config_dir)?;

    eprintln!("{}", style("Embedding Configuration").bold().yellow());
    eprintln!("Choose how document chunks are turned into vectors.");
    eprintln!();

    configure_embedding(&mut config.embedding)?;

    if config.embedding.provider == EmbeddingProviderKind::Ollama {
        eprintln!();
        eprintln!("{}", style("Testing configuration...").yellow());

        if test_ollama_connection(&config.embedding)? {
            eprintln!("{}", style("✓ Ollama connection successful!").green());
        } else {
            eprintln!(
                "{}",
                style("⚠ Warning: Could not connect to Ollama").yellow()
            );
            eprintln!("You can continue, but make sure Ollama is running before ingesting.");
        }
    }

    eprintln!();
    eprintln!("{}", style("Answer Generation").bold().yellow());
    configure_llm(&mut config.llm)?;

    eprintln!();
    let top_k: usize = Input::new()
        .with_prompt("Chunks retrieved per question")
        .default(config.retrieval.top_k)
        .validate_with(|input: &usize| -> Result<(), &str> {
            if (1..=50).contains(input) {
                Ok(())
            } else {
                Err("top_k must be between 1 and 50")
            }
        })
        .interact_text()?;
    config.retrieval.top_k = top_k;

    eprintln!();
    if Confirm::new()
        .with_prompt("Save configuration?")
        .default(true)
        .interact()?
    {
        config.save().context("Failed to save configuration")?;
        eprintln!("{}", style("✓ Configuration saved successfully!").green());
        eprintln!(
            "Configuration saved to: {}",
            style(config.config_file_path().display()).cyan()
        );
    } else {
        eprintln!("Configuration not saved.");
    }

    Ok(())
}

#[inline]
pub fn show_config(config: &Config) -> Result<()> {
    eprintln!("{}", style("📋 Current Configuration").bold().cyan());
    eprintln!();

    eprintln!("{}", style("Embedding Settings:").bold().yellow());
    eprintln!("  Provider: {}", style(config.embedding.provider).cyan());
    match config.embedding.provider {
        EmbeddingProviderKind::Hashing => {
            eprintln!("  Dimension: {}", style(config.embedding.dimension).cyan());
        }
        EmbeddingProviderKind::Ollama => {
            eprintln!("  Model: {}", style(&config.embedding.model).cyan());
            match config.ollama_url() {
                Ok(url) => eprintln!("  Ollama URL: {}", style(url).cyan()),
                Err(e) => eprintln!("  Ollama URL: {} ({})", style("Invalid").red(), e),
            }
        }
        EmbeddingProviderKind::OpenAi => {
            eprintln!("  Model: {}", style(&config.embedding.model).cyan());
            eprintln!("  API base: {}", style(&config.embedding.api_base).cyan());
            eprintln!(
                "  API key: {}",
                credential_label(config.embedding.credential().is_some())
            );
        }
    }
    eprintln!("  Batch Size: {}", style(config.embedding.batch_size).cyan());

    eprintln!();
    eprintln!("{}", style("Chunking:").bold().yellow());
    eprintln!("  Chunk size: {}", style(config.chunking.chunk_size).cyan());
    eprintln!("  Overlap: {}", style(config.chunking.chunk_overlap).cyan());

    eprintln!();
    eprintln!("{}", style("Retrieval:").bold().yellow());
    eprintln!("  Top K: {}", style(config.retrieval.top_k).cyan());
    eprintln!(
        "  Index directory: {}",
        style(config.index_path().display()).cyan()
    );

    eprintln!();
    eprintln!("{}", style("Answer Generation:").bold().yellow());
    eprintln!("  LLM enabled: {}", style(config.llm.enabled).cyan());
    eprintln!("  Model: {}", style(&config.llm.model).cyan());
    eprintln!(
        "  API key: {}",
        credential_label(config.llm.credential().is_some())
    );

    eprintln!();
    eprintln!("{}", style("Matching Thresholds:").bold().yellow());
    eprintln!(
        "  High / medium confidence: {} / {}",
        style(config.matching.high_confidence).cyan(),
        style(config.matching.medium_confidence).cyan()
    );
    eprintln!(
        "  Fuzzy threshold: {}",
        style(config.matching.fuzzy_threshold).cyan()
    );

    eprintln!();
    eprintln!(
        "Config file: {}",
        style(config.config_file_path().display()).dim()
    );

    Ok(())
}

fn credential_label(present: bool) -> console::StyledObject<&'static str> {
    if present {
        style("configured").green()
    } else {
        style("not set (free mode)").yellow()
    }
}

fn load_existing_config(config_dir: &Path) -> Result<Config> {
    Config::load(config_dir).map_or_else(
        |_| {
            eprintln!(
                "{}",
                style("No existing configuration found. Using defaults.").yellow()
            );
            Ok(Config::with_base_dir(config_dir))
        },
        |config| {
            if config.config_file_path().exists() {
                eprintln!("{}", style("Found existing configuration.").green());
            }
            Ok(config)
        },
    )
}

fn configure_embedding(embedding: &mut EmbeddingConfig) -> Result<()> {
    let labels: Vec<String> = PROVIDERS.iter().map(ToString::to_string).collect();
    let default_index = PROVIDERS
        .iter()
        .position(|p| *p == embedding.provider)
        .unwrap_or(0);

    let provider_index = Select::new()
        .with_prompt("Embedding provider")
        .default(default_index)
        .items(&labels)
        .interact()?;
    embedding.set_provider(PROVIDERS[provider_index]);

    match embedding.provider {
        EmbeddingProviderKind::Hashing => {
            let dimension: u32 = Input::new()
                .with_prompt("Vector dimension")
                .default(embedding.dimension)
                .validate_with(|input: &u32| -> Result<(), &str> {
                    if (64..=4096).contains(input) {
                        Ok(())
                    } else {
                        Err("Dimension must be between 64 and 4096")
                    }
                })
                .interact_text()?;
            embedding.set_dimension(dimension)?;
        }
        EmbeddingProviderKind::Ollama => configure_ollama(embedding)?,
        EmbeddingProviderKind::OpenAi => {
            let model: String = Input::new()
                .with_prompt("Embedding model")
                .default("text-embedding-3-small".to_string())
                .interact_text()?;
            embedding.set_model(model)?;

            let api_base: String = Input::new()
                .with_prompt("API base URL")
                .default(embedding.api_base.clone())
                .validate_with(|input: &String| -> Result<(), ConfigError> {
                    url::Url::parse(input).map_err(|_| ConfigError::InvalidUrl(input.clone()))?;
                    Ok(())
                })
                .interact_text()?;
            embedding.api_base = api_base;
        }
    }

    let batch_size: u32 = Input::new()
        .with_prompt("Batch size for embedding generation")
        .default(embedding.batch_size)
        .validate_with(|input: &u32| -> Result<(), &str> {
            if *input == 0 {
                Err("Batch size must be greater than 0")
            } else if *input > 1000 {
                Err("Batch size must be 1000 or less")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    embedding.set_batch_size(batch_size)?;

    Ok(())
}

fn configure_ollama(embedding: &mut EmbeddingConfig) -> Result<()> {
    let protocols = &["http", "https"];
    let default_index = protocols
        .iter()
        .position(|&p| p == embedding.protocol)
        .unwrap_or(0);

    let protocol_index = Select::new()
        .with_prompt("Ollama protocol")
        .default(default_index)
        .items(protocols)
        .interact()?;

    let protocol = protocols[protocol_index].to_string();

    let host: String = Input::new()
        .with_prompt("Ollama host")
        .default(embedding.host.clone())
        .validate_with(|input: &String| -> Result<(), ConfigError> {
            let candidate = EmbeddingConfig {
                protocol: protocol.clone(),
                host: input.clone(),
                ..EmbeddingConfig::default()
            };
            candidate.ollama_url()?;
            Ok(())
        })
        .interact_text()?;

    let port: u16 = Input::new()
        .with_prompt("Ollama port")
        .default(embedding.port)
        .validate_with(|input: &u16| -> Result<(), &str> {
            if *input == 0 {
                Err("Port must be greater than 0")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    let model: String = Input::new()
        .with_prompt("Embedding model")
        .default(embedding.model.clone())
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Model name cannot be empty")
            } else {
                Ok(())
            }
        })
        .interact_text()?;

    embedding.set_protocol(protocol)?;
    embedding.set_host(host)?;
    embedding.set_port(port)?;
    embedding.set_model(model)?;

    Ok(())
}

fn configure_llm(llm: &mut LlmConfig) -> Result<()> {
    llm.enabled = Confirm::new()
        .with_prompt("Use an LLM to write answers? (otherwise retrieved context is shown as-is)")
        .default(llm.enabled)
        .interact()?;

    if !llm.enabled {
        return Ok(());
    }

    llm.model = Input::new()
        .with_prompt("Chat model")
        .default(llm.model.clone())
        .interact_text()?;

    if llm.credential().is_none() {
        eprintln!(
            "{}",
            style(format!(
                "⚠ No API key found. Set {} or add api_key under [llm].",
                super::API_KEY_ENV_VAR
            ))
            .yellow()
        );
    }

    Ok(())
}

fn test_ollama_connection(embedding: &EmbeddingConfig) -> Result<bool> {
    let url = format!(
        "{}://{}:{}/api/version",
        embedding.protocol, embedding.host, embedding.port
    );

    match crate::http::build_agent(std::time::Duration::from_secs(5)).get(&url).call() {
        Ok(_) => Ok(true),
        Err(ureq::Error::StatusCode(code)) if (400..500).contains(&code) => Ok(true),
        Err(_) => Ok(false),
    }
}
