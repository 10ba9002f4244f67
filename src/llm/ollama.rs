//! Ollama chat client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::TextCompletion;
use crate::error::{PipelineError, Result};

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    format: &'a str,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: Option<ResponseMessage>,
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: String,
}

/// Client for a local Ollama runtime
#[derive(Clone)]
pub struct OllamaClient {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaClient {
    pub fn new(client: Client, base_url: &str, model: &str, timeout: Duration) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl TextCompletion for OllamaClient {
    async fn complete_json(&self, prompt: &str, temperature: f32) -> Result<String> {
        let url = format!("{}/api/chat", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage { role: "user", content: prompt }],
            format: "json",
            stream: false,
            options: ChatOptions { temperature },
        };

        debug!(model = %self.model, prompt_len = prompt.len(), "Calling chat endpoint");

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| PipelineError::ModelError(e.to_string()))?;

        let status = response.status();
        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| PipelineError::ModelError(format!("HTTP {}: {}", status, e)))?;

        if let Some(error) = body.error {
            return Err(PipelineError::ModelError(error));
        }
        if !status.is_success() {
            return Err(PipelineError::ModelError(format!("HTTP {}", status)));
        }

        body.message
            .map(|m| m.content)
            .ok_or_else(|| PipelineError::ModelError("response without message".to_string()))
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(|e| PipelineError::ServiceUnreachable(format!("{}: {}", self.base_url, e)))?;

        if !response.status().is_success() {
            return Err(PipelineError::ServiceUnreachable(format!(
                "{} answered HTTP {}",
                self.base_url,
                response.status()
            )));
        }
        Ok(())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
