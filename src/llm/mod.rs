//! Generative text service access
//!
//! `TextCompletion` is the seam between the pipeline and the model runtime;
//! tests swap in deterministic fakes.

pub mod ollama;

use async_trait::async_trait;

use crate::error::Result;

pub use ollama::OllamaClient;

#[async_trait]
pub trait TextCompletion: Send + Sync {
    /// Sends a single-turn prompt asking for JSON output; returns the raw text
    async fn complete_json(&self, prompt: &str, temperature: f32) -> Result<String>;

    /// Checks that the service answers at all
    async fn health_check(&self) -> Result<()>;

    /// Model identifier for logging
    fn model(&self) -> &str;
}
