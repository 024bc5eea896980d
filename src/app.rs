//! Application state and service initialization
//!
//! Centralizes service construction and dependency injection so handlers
//! receive a fully built analysis service.

use std::sync::Arc;

use url::Url;

use crate::model::Config;
use crate::service::analysis::AnalysisService;
use crate::service::llm::OpenAiClient;

/// Environment variable for the reasoning-service credential
const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

/// Application state containing all services
pub struct AppState {
    /// Compliance analysis orchestrator
    pub analysis_service: Arc<AnalysisService>,
}

impl AppState {
    /// Initialize all services and build application state
    ///
    /// This performs:
    /// 1. Reasoning client initialization (requires OPENAI_API_KEY)
    /// 2. Policy catalog selection (built-in or config override)
    /// 3. Orchestrator construction
    pub fn new(config: Config) -> Result<Self, AppError> {
        let api_key = std::env::var(ENV_OPENAI_API_KEY)
            .map_err(|_| AppError::MissingConfig(ENV_OPENAI_API_KEY))?;

        let client = match &config.base_url {
            Some(base) => {
                let base_url = Url::parse(base)
                    .map_err(|_| AppError::InvalidConfig("OPENAI_BASE_URL is not a valid URL"))?;
                OpenAiClient::with_base_url(&api_key, &config.model, base_url)
            }
            None => OpenAiClient::new(&api_key, &config.model),
        }
        .map_err(|_| AppError::InvalidConfig("Failed to build reasoning client"))?;

        tracing::info!(
            model = %config.model,
            prohibited_phrases = config.catalog.prohibited_phrases.len(),
            "Analysis service initialized"
        );

        let analysis_service = Arc::new(AnalysisService::new(
            Arc::new(client),
            Arc::new(config.catalog),
        ));

        Ok(Self { analysis_service })
    }
}

/// Application-level errors
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AppError {
    /// Missing required configuration
    #[error("Missing required configuration: {0}")]
    MissingConfig(&'static str),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
