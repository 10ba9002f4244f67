//! Configuration for the content pipeline

use serde::Deserialize;
use std::time::Duration;

use crate::error::{PipelineError, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // Generative text service
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,
    #[serde(default = "default_ollama_model")]
    pub ollama_model: String,
    #[serde(default = "default_model_temperature")]
    pub model_temperature: f32,
    #[serde(default = "default_model_timeout")]
    pub model_timeout_secs: u64,

    // Affiliate links
    #[serde(default = "default_affiliate_tag")]
    pub affiliate_tag: String,
    #[serde(default = "default_marketplace_search_url")]
    pub marketplace_search_url: String,

    // Persisted store
    #[serde(default = "default_store_backend")]
    pub store_backend: String,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub database_url: Option<String>,
    #[serde(default = "default_articles_table")]
    pub articles_table: String,

    // Image fallback
    #[serde(default = "default_image_endpoint")]
    pub image_endpoint: String,
    #[serde(default = "default_image_width")]
    pub image_width: u32,
    #[serde(default = "default_image_height")]
    pub image_height: u32,
    #[serde(default = "default_image_model")]
    pub image_model: String,

    // Pacing
    #[serde(default = "default_source_delay")]
    pub source_delay_ms: u64,
    #[serde(default = "default_cycle_interval")]
    pub cycle_interval_secs: u64,

    // Bounds
    #[serde(default = "default_entries_per_fetch")]
    pub entries_per_fetch: usize,
    #[serde(default = "default_summary_max_chars")]
    pub summary_max_chars: usize,
    #[serde(default = "default_image_title_max_chars")]
    pub image_title_max_chars: usize,

    // Feed HTTP
    #[serde(default = "default_feed_timeout")]
    pub feed_timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1".to_string()
}

fn default_model_temperature() -> f32 {
    0.7
}

fn default_model_timeout() -> u64 {
    120
}

fn default_affiliate_tag() -> String {
    "timauk27-20".to_string()
}

fn default_marketplace_search_url() -> String {
    "https://www.amazon.com.br/s".to_string()
}

fn default_store_backend() -> String {
    "rest".to_string()
}

fn default_articles_table() -> String {
    "noticias".to_string()
}

fn default_image_endpoint() -> String {
    "https://image.pollinations.ai/prompt".to_string()
}

fn default_image_width() -> u32 {
    800
}

fn default_image_height() -> u32 {
    450
}

fn default_image_model() -> String {
    "flux".to_string()
}

fn default_source_delay() -> u64 {
    1000 // 1 second between sources
}

fn default_cycle_interval() -> u64 {
    600 // 10 minutes between cycles
}

fn default_entries_per_fetch() -> usize {
    2
}

fn default_summary_max_chars() -> usize {
    2000
}

fn default_image_title_max_chars() -> usize {
    100
}

fn default_feed_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("roboportal/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            ollama_model: default_ollama_model(),
            model_temperature: default_model_temperature(),
            model_timeout_secs: default_model_timeout(),
            affiliate_tag: default_affiliate_tag(),
            marketplace_search_url: default_marketplace_search_url(),
            store_backend: default_store_backend(),
            supabase_url: None,
            supabase_key: None,
            database_url: None,
            articles_table: default_articles_table(),
            image_endpoint: default_image_endpoint(),
            image_width: default_image_width(),
            image_height: default_image_height(),
            image_model: default_image_model(),
            source_delay_ms: default_source_delay(),
            cycle_interval_secs: default_cycle_interval(),
            entries_per_fetch: default_entries_per_fetch(),
            summary_max_chars: default_summary_max_chars(),
            image_title_max_chars: default_image_title_max_chars(),
            feed_timeout_secs: default_feed_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load .env file
        dotenvy::dotenv().ok();

        // Build config from environment
        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        let cfg: Config = config.try_deserialize()?;
        Ok(cfg)
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        match self.store_backend.as_str() {
            "rest" => {
                if self.supabase_url.is_none() || self.supabase_key.is_none() {
                    return Err(PipelineError::ValidationError(
                        "rest store requires SUPABASE_URL and SUPABASE_KEY".to_string(),
                    ));
                }
            }
            "postgres" => {
                if self.database_url.is_none() {
                    return Err(PipelineError::ValidationError(
                        "postgres store requires DATABASE_URL".to_string(),
                    ));
                }
            }
            other => {
                return Err(PipelineError::ValidationError(format!(
                    "unknown store backend: {}",
                    other
                )));
            }
        }

        let endpoints = [
            ("OLLAMA_URL", Some(&self.ollama_url)),
            ("MARKETPLACE_SEARCH_URL", Some(&self.marketplace_search_url)),
            ("IMAGE_ENDPOINT", Some(&self.image_endpoint)),
            ("SUPABASE_URL", self.supabase_url.as_ref()),
        ];
        for (name, value) in endpoints {
            if let Some(value) = value {
                url::Url::parse(value).map_err(|e| {
                    PipelineError::ValidationError(format!("{} is not a valid URL: {}", name, e))
                })?;
            }
        }

        if self.entries_per_fetch == 0 {
            return Err(PipelineError::ValidationError(
                "ENTRIES_PER_FETCH must be at least 1".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.model_temperature) {
            return Err(PipelineError::ValidationError(format!(
                "model temperature {} outside [0, 2]",
                self.model_temperature
            )));
        }

        Ok(())
    }

    pub fn source_delay(&self) -> Duration {
        Duration::from_millis(self.source_delay_ms)
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.cycle_interval_secs)
    }
}
