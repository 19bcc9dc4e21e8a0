pub mod interactive;
pub mod settings;

pub use interactive::{run_interactive_config, show_config};
pub use settings::{
    API_KEY_ENV_VAR, Config, ConfigError, EmbeddingConfig, EmbeddingProviderKind, LlmConfig,
    RetrievalConfig, is_placeholder_credential,
};

/// Resolve the configuration directory, preferring an explicit override
#[inline]
pub fn resolve_config_dir(
    override_dir: Option<&std::path::Path>,
) -> Result<std::path::PathBuf, ConfigError> {
    override_dir.map_or_else(Config::default_dir, |dir| Ok(dir.to_path_buf()))
}
