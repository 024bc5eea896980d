use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::policy::PolicyCatalog;
use crate::service::llm::DEFAULT_MODEL;

const ENV_CONFIG_PATH: &str = "AD_COMPLIANCE_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const ENV_ANALYSIS_MODEL: &str = "ANALYSIS_MODEL";
const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Policy catalog override; omitted fields keep the built-in data
    #[serde(default)]
    pub catalog: PolicyCatalog,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog: PolicyCatalog,
    pub port: u16,
    pub host: String,
    /// Reasoning model used for analysis
    pub model: String,
    /// Alternate API endpoint (proxies, test servers)
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: PolicyCatalog::default(),
            port: 8080,
            host: "127.0.0.1".to_string(),
            model: DEFAULT_MODEL.to_string(),
            base_url: None,
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let model =
            std::env::var(ENV_ANALYSIS_MODEL).unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url = std::env::var(ENV_OPENAI_BASE_URL).ok();

        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let catalog = Self::load_config_file(&config_path)
            .map(|cf| cf.catalog)
            .unwrap_or_default();

        Self {
            catalog,
            port,
            host,
            model,
            base_url,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => {
                let contents = contents.trim();
                if contents.is_empty() {
                    tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
                    return Some(ConfigFile::default());
                }

                match serde_yaml::from_str(contents) {
                    Ok(config) => {
                        tracing::info!(path = %path.display(), "Loaded configuration from file");
                        Some(config)
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
                        None
                    }
                }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
