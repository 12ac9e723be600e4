use std::sync::Arc;
use std::time::Duration;

use crate::cli::Cli;
use crate::generation::{ChatRecipeGenerator, GenerationError, GenerationSettings, RecipeGenerator};
use crate::orchestrator::RecipeAnalyzer;

/// Typed runtime settings. The credential is optional: without it the
/// service runs in fallback-only mode.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub api_key: Option<String>,
    pub generation: GenerationSettings,
    pub allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        let api_key = cli
            .api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let allowed_origins = cli
            .allowed_origins
            .iter()
            .map(|origin| origin.trim())
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        Self {
            host: cli.host,
            port: cli.port,
            api_key,
            generation: GenerationSettings {
                model: cli.model,
                max_tokens: cli.max_tokens,
                temperature: cli.temperature,
                timeout: Duration::from_secs(cli.timeout_secs),
                base_url: cli.api_base_url,
            },
            allowed_origins,
        }
    }

    pub fn ai_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn build_analyzer(&self) -> Result<RecipeAnalyzer, GenerationError> {
        let generator = match &self.api_key {
            Some(key) => {
                let generator = ChatRecipeGenerator::new(key.clone(), self.generation.clone())?;
                Some(Arc::new(generator) as Arc<dyn RecipeGenerator>)
            }
            None => None,
        };
        Ok(RecipeAnalyzer::new(generator))
    }
}
