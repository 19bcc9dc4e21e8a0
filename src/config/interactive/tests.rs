use super::load_existing_config as load_existing_config_impl;
use super::*;
use tempfile::TempDir;

#[test]
fn load_existing_config_without_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = load_existing_config_impl(temp_dir.path()).expect("config loaded successfully");
    assert_eq!(config.get_base_dir(), temp_dir.path());
    assert!(!config.embedding.model.is_empty());
    assert!(config.embedding.batch_size > 0);
}

#[test]
fn load_existing_config_falls_back_on_broken_file() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    std::fs::write(temp_dir.path().join("config.toml"), "not [valid toml")
        .expect("write broken config");
    let config = load_existing_config_impl(temp_dir.path()).expect("falls back to defaults");
    assert_eq!(config.retrieval.top_k, 4);
}

#[test]
fn provider_list_covers_every_kind() {
    let labels: Vec<String> = PROVIDERS.iter().map(ToString::to_string).collect();
    assert_eq!(labels, vec!["hashing", "ollama", "openai"]);
}

#[test]
fn unreachable_ollama_reports_false() {
    let embedding = EmbeddingConfig {
        host: "127.0.0.1".to_string(),
        port: 1,
        ..EmbeddingConfig::default()
    };
    let reachable = test_ollama_connection(&embedding).expect("connection check never errors");
    assert!(!reachable);
}
