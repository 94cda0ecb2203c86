use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub groq: GroqConfig,
    pub meta: MetaConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    // Loaded from env; protected routes stay locked while unset
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GroqConfig {
    pub model: String,
    pub base_url: String,
    pub request_timeout_secs: u64,
    // Loaded from env; unset means heuristic-only classification
    #[serde(skip)]
    pub api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MetaConfig {
    pub graph_api_base: String,
    // Loaded from env
    #[serde(skip)]
    pub page_access_token: Option<String>,
    #[serde(skip)]
    pub verify_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let config_text =
            std::fs::read_to_string("config.toml").context("Failed to read config.toml")?;
        let mut config: AppConfig =
            toml::from_str(&config_text).context("Failed to parse config.toml")?;

        config.server.api_key = env_opt("API_KEY");
        config.groq.api_key = env_opt("GROQ_API_KEY");
        config.meta.page_access_token = env_opt("PAGE_ACCESS_TOKEN");
        config.meta.verify_token = env_opt("VERIFY_TOKEN");

        Ok(config)
    }
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
