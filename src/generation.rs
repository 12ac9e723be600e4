//! Outbound text generation for recipe prompts.
//!
//! The orchestrator only sees [`RecipeGenerator`]; [`ChatRecipeGenerator`] is
//! the production implementation backed by an OpenAI-compatible chat API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{
    ChatCompletionRequest, ChatMessage, Provider, DEFAULT_API_BASE_URL, DEFAULT_CHAT_MODEL,
};
use crate::prompt_builder::RECIPE_SYSTEM_PROMPT;

/// Any failure to obtain usable text from the model.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("AI service error: {0}")]
    Upstream(#[from] ApiConnectionError),
    #[error("AI service returned no choices")]
    NoChoices,
    #[error("AI service returned empty content")]
    EmptyContent,
}

#[async_trait]
pub trait RecipeGenerator: Send + Sync + fmt::Debug {
    /// Sends one prompt and returns the model's raw text, trimmed.
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;

    fn model_name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSettings {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout: Duration,
    pub base_url: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_CHAT_MODEL.to_string(),
            max_tokens: 1500,
            temperature: 0.7,
            timeout: Duration::from_secs(30),
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct ChatRecipeGenerator {
    provider: Provider,
    settings: GenerationSettings,
}

impl ChatRecipeGenerator {
    pub fn new(api_key: impl Into<String>, settings: GenerationSettings) -> Result<Self, GenerationError> {
        let provider =
            Provider::openai_compatible(api_key, settings.base_url.clone(), settings.timeout)?;
        Ok(Self { provider, settings })
    }

    pub fn build_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.settings.model.clone(),
            messages: vec![
                ChatMessage::system(RECIPE_SYSTEM_PROMPT),
                ChatMessage::user(prompt),
            ],
            temperature: Some(self.settings.temperature),
            max_tokens: Some(self.settings.max_tokens),
        }
    }
}

#[async_trait]
impl RecipeGenerator for ChatRecipeGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = self.build_request(prompt);
        tracing::info!(model = %self.settings.model, "Sending recipe prompt to chat completion API");

        let response = self.provider.call_chat_completion(&request).await?;
        if response.choices.is_empty() {
            return Err(GenerationError::NoChoices);
        }

        let content = response
            .first_content()
            .map(str::trim)
            .filter(|content| !content.is_empty())
            .ok_or(GenerationError::EmptyContent)?;

        tracing::debug!(preview = %preview(content, 200), "Raw chat completion content");
        Ok(content.to_string())
    }

    fn model_name(&self) -> &str {
        &self.settings.model
    }
}

/// First `max_chars` characters, for log lines.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
