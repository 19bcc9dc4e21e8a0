use super::*;
use serial_test::serial;
use tempfile::TempDir;

#[test]
fn default_config() {
    let config = Config::default();
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::Ollama);
    assert_eq!(config.embedding.host, "localhost");
    assert_eq!(config.embedding.port, 11434);
    assert_eq!(config.embedding.model, "nomic-embed-text:latest");
    assert_eq!(config.chunking.chunk_size, 800);
    assert_eq!(config.chunking.chunk_overlap, 120);
    assert_eq!(config.retrieval.top_k, 4);
    assert!(!config.llm.enabled);
    assert_eq!(config.llm.model, "gpt-4o-mini");
    assert!((config.matching.high_confidence - 0.7).abs() < f32::EPSILON);
}

#[test]
fn config_validation() {
    let config = Config::default();
    assert!(config.validate().is_ok());

    let mut invalid_config = config.clone();
    invalid_config.embedding.protocol = "ftp".to_string();
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.embedding.port = 0;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.embedding.batch_size = 1001;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config.clone();
    invalid_config.chunking.chunk_overlap = invalid_config.chunking.chunk_size;
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::InvalidChunkOverlap(800, 800))
    ));

    let mut invalid_config = config.clone();
    invalid_config.retrieval.top_k = 0;
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::InvalidTopK(0))
    ));

    let mut invalid_config = config.clone();
    invalid_config.llm.temperature = 3.5;
    assert!(invalid_config.validate().is_err());

    let mut invalid_config = config;
    invalid_config.matching.medium_confidence = 0.9;
    assert!(matches!(
        invalid_config.validate(),
        Err(ConfigError::ThresholdOrder(_, _))
    ));
}

#[test]
fn empty_host_is_rejected() {
    let mut config = Config::default();
    config.embedding.host = String::new();
    assert!(config.validate().is_err());
}

#[test]
fn ollama_url_generation() {
    let config = Config::default();
    let url = config
        .ollama_url()
        .expect("should generate ollama_url successfully");
    assert_eq!(url.as_str(), "http://localhost:11434/");

    let mut config = Config::default();
    config.embedding.protocol = "https".to_string();
    config.embedding.host = "secure.example.com".to_string();
    config.embedding.port = 443;
    let url = config.ollama_url().expect("https url is ok");
    assert_eq!(url.as_str(), "https://secure.example.com/");
}

#[test]
fn toml_serialization() {
    let mut config = Config::default();
    config.embedding.provider = EmbeddingProviderKind::OpenAi;
    config.llm.enabled = true;
    let toml_str = toml::to_string(&config).expect("should serialize toml correctly");
    assert!(toml_str.contains("provider = \"openai\""));
    let parsed_config: Config = toml::from_str(&toml_str).expect("should parse toml correctly");
    assert_eq!(config, parsed_config);
}

#[test]
fn partial_toml_fills_defaults() {
    let partial_toml = r#"
        [embedding]
        provider = "hashing"
        dimension = 256

        [retrieval]
        top_k = 8
    "#;

    let config: Config = toml::from_str(partial_toml).expect("partial toml parses");
    assert_eq!(config.embedding.provider, EmbeddingProviderKind::Hashing);
    assert_eq!(config.embedding.dimension, 256);
    assert_eq!(config.embedding.port, 11434);
    assert_eq!(config.retrieval.top_k, 8);
    assert_eq!(config.chunking.chunk_size, 800);
}

#[test]
fn invalid_toml_handling() {
    let invalid_toml = r#"
        [embedding
        port = "invalid_port"
    "#;
    let result: Result<Config, toml::de::Error> = toml::from_str(invalid_toml);
    assert!(result.is_err());
}

#[test]
fn setter_validation() {
    let mut embedding = EmbeddingConfig::default();

    assert!(embedding.set_protocol("https".to_string()).is_ok());
    assert!(embedding.set_host("example.com".to_string()).is_ok());
    assert!(embedding.set_port(8080).is_ok());
    assert!(embedding.set_model("new-model".to_string()).is_ok());
    assert!(embedding.set_batch_size(128).is_ok());
    assert!(embedding.set_dimension(512).is_ok());

    assert!(embedding.set_protocol("HTTP".to_string()).is_err());
    assert!(embedding.set_port(0).is_err());
    assert!(embedding.set_model("   ".to_string()).is_err());
    assert!(embedding.set_batch_size(0).is_err());
    assert!(embedding.set_dimension(32).is_err());

    assert_eq!(embedding.protocol, "https");
    assert_eq!(embedding.dimension, 512);
}

#[test]
fn save_and_load_round_trip() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let mut config = Config::with_base_dir(temp_dir.path().join("nested"));
    config.embedding.provider = EmbeddingProviderKind::Hashing;
    config.retrieval.top_k = 6;
    config.save().expect("config saves");

    assert!(config.config_file_path().exists());

    let loaded = Config::load(temp_dir.path().join("nested")).expect("config loads");
    assert_eq!(loaded, config);
}

#[test]
fn load_missing_config_returns_defaults() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    let config = Config::load(temp_dir.path()).expect("missing file gives defaults");
    assert_eq!(config.get_base_dir(), temp_dir.path());
    assert_eq!(config.embedding, EmbeddingConfig::default());
}

#[test]
fn load_rejects_invalid_values() {
    let temp_dir = TempDir::new().expect("should create temp dir");
    fs::write(
        temp_dir.path().join("config.toml"),
        "[chunking]\nchunk_size = 10\n",
    )
    .expect("write config");
    assert!(Config::load(temp_dir.path()).is_err());
}

#[test]
fn index_path_defaults_under_base_dir() {
    let config = Config::with_base_dir("/tmp/quality");
    assert_eq!(
        config.index_path(),
        PathBuf::from("/tmp/quality/vector_index")
    );

    let mut config = config;
    config.retrieval.index_dir = Some(PathBuf::from("/srv/index"));
    assert_eq!(config.index_path(), PathBuf::from("/srv/index"));
}

#[test]
fn placeholder_credentials() {
    assert!(is_placeholder_credential(""));
    assert!(is_placeholder_credential("   "));
    assert!(is_placeholder_credential("disabled"));
    assert!(is_placeholder_credential("sk-abcdef1234567890"));
    assert!(!is_placeholder_credential("sk-live-key"));
}

#[test]
#[serial]
fn llm_credential_requires_enabled_flag() {
    // SAFETY: serialised with every other test touching the environment
    unsafe { std::env::remove_var(API_KEY_ENV_VAR) };

    let mut llm = LlmConfig {
        api_key: Some("sk-real".to_string()),
        ..LlmConfig::default()
    };
    assert_eq!(llm.credential(), None);

    llm.enabled = true;
    assert_eq!(llm.credential().as_deref(), Some("sk-real"));

    llm.api_key = Some("disabled".to_string());
    assert_eq!(llm.credential(), None);
}

#[test]
#[serial]
fn credential_falls_back_to_environment() {
    // SAFETY: serialised with every other test touching the environment
    unsafe { std::env::set_var(API_KEY_ENV_VAR, "sk-from-env") };

    let llm = LlmConfig {
        enabled: true,
        ..LlmConfig::default()
    };
    assert_eq!(llm.credential().as_deref(), Some("sk-from-env"));

    let embedding = EmbeddingConfig {
        api_key: Some("sk-abcdef".to_string()),
        ..EmbeddingConfig::default()
    };
    assert_eq!(embedding.credential().as_deref(), Some("sk-from-env"));

    // SAFETY: as above
    unsafe { std::env::remove_var(API_KEY_ENV_VAR) };
}

#[test]
fn error_display_messages() {
    let errors = vec![
        ConfigError::InvalidProtocol("ftp".to_string()),
        ConfigError::InvalidPort(0),
        ConfigError::InvalidBatchSize(0),
        ConfigError::InvalidModel(String::new()),
        ConfigError::InvalidUrl("invalid-url".to_string()),
        ConfigError::InvalidThreshold("fuzzy_threshold", 1.5),
        ConfigError::InvalidChunkOverlap(900, 800),
    ];

    for error in errors {
        let message = format!("{error}");
        assert!(message.len() > 10);
    }
}
