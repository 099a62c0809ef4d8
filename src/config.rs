use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    pub chunking: ChunkingConfig,
    pub summary: SummaryConfig,
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    /// Supplied via APP__LLM__API_KEY rather than checked-in files.
    pub api_key: Option<String>,
    pub temperature: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SummaryConfig {
    pub default_num_summaries: u32,
    pub max_summaries: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UploadConfig {
    pub max_file_size_mb: usize,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .add_source(File::with_name("config/default"))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        unsafe { std::env::set_var("RUN_ENV", "development") };
        let config = AppConfig::load();
        assert!(config.is_ok(), "Default config should load: {config:?}");

        let config = config.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.chunking.chunk_size, 1900);
        assert_eq!(config.chunking.chunk_overlap, 200);
        assert!(config.summary.max_summaries >= config.summary.default_num_summaries);
    }

    #[test]
    fn test_env_override() {
        unsafe {
            std::env::set_var("APP__CHUNKING__CHUNK_SIZE", "500");
            std::env::set_var("RUN_ENV", "development");
        }

        let config = AppConfig::load().unwrap();
        assert_eq!(config.chunking.chunk_size, 500);

        unsafe { std::env::remove_var("APP__CHUNKING__CHUNK_SIZE") };
    }
}
