//! Chat-completions adapter for the qualitative assessment.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

use super::{ProviderError, TextGenProvider};
use crate::config::AnalysisConfig;

pub struct MistralClient {
    http: Client,
    config: AnalysisConfig,
}

impl MistralClient {
    pub fn new(config: AnalysisConfig) -> Self {
        // The completion call sits inline in the scoring path; the client
        // timeout bounds how long a scoring request can hang on it.
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_s))
            .build()
            .unwrap_or_default();

        Self { http, config }
    }
}

#[async_trait]
impl TextGenProvider for MistralClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.config.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.config.temperature,
            "max_tokens": self.config.max_tokens,
        });

        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let completion: CompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| ProviderError::Payload("completion had no choices".to_string()))?;

        debug!(response_len = text.len(), "received qualitative assessment");
        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}
