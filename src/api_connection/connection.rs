use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::endpoints::{ChatCompletionRequest, ChatCompletionResponse, Provider};

#[derive(Debug, Error)]
pub enum ApiConnectionError {
    #[error("Request timed out: {0}")]
    Timeout(#[source] reqwest::Error),
    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("API error {status}: {error_body}")]
    ApiError {
        status: reqwest::StatusCode,
        error_body: String,
    },
}

impl From<reqwest::Error> for ApiConnectionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiConnectionError::Timeout(err)
        } else {
            ApiConnectionError::NetworkError(err)
        }
    }
}

impl Provider {
    /// Builds a provider with its own pooled client. `timeout` bounds each whole request.
    pub fn openai_compatible(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ApiConnectionError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::OpenAiCompatible {
            api_key: api_key.into(),
            base_url: base_url.into(),
            client,
        })
    }

    pub fn chat_completions_url(&self) -> String {
        match self {
            Provider::OpenAiCompatible { base_url, .. } => {
                format!("{}/chat/completions", base_url.trim_end_matches('/'))
            }
        }
    }

    pub async fn call_chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ApiConnectionError> {
        match self {
            Provider::OpenAiCompatible {
                api_key, client, ..
            } => {
                let response = client
                    .post(self.chat_completions_url())
                    .bearer_auth(api_key)
                    .json(request)
                    .send()
                    .await?;

                let status = response.status();
                if status.is_success() {
                    let body = response.text().await?;
                    let chat_response = serde_json::from_str::<ChatCompletionResponse>(&body)?;
                    Ok(chat_response)
                } else {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to read error body".to_string());
                    Err(ApiConnectionError::ApiError { status, error_body })
                }
            }
        }
    }
}
