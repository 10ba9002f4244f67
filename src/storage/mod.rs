//! Storage layer for generated articles
//!
//! The pipeline only ever asks two things of the store: whether a source link
//! is already present, and to append a new article.

pub mod postgres;
pub mod rest;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::schemas::Article;

pub use postgres::PgArticleStore;
pub use rest::RestArticleStore;

/// Append-only article store
#[async_trait]
pub trait ArticleStore: Send + Sync {
    /// Returns true when an article with this `fonte_original` exists
    async fn exists_by_source(&self, link: &str) -> Result<bool>;

    /// Inserts a new article
    async fn insert(&self, article: &Article) -> Result<()>;
}

/// Builds the store selected by `STORE_BACKEND`
pub async fn create_store(config: &Config, client: reqwest::Client) -> Result<Arc<dyn ArticleStore>> {
    match config.store_backend.as_str() {
        "rest" => {
            let base_url = config.supabase_url.as_deref().ok_or_else(|| {
                PipelineError::ValidationError("SUPABASE_URL not set".to_string())
            })?;
            let api_key = config.supabase_key.as_deref().ok_or_else(|| {
                PipelineError::ValidationError("SUPABASE_KEY not set".to_string())
            })?;
            info!(url = %base_url, table = %config.articles_table, "Using REST article store");
            Ok(Arc::new(RestArticleStore::new(
                client,
                base_url,
                api_key,
                &config.articles_table,
            )))
        }
        "postgres" => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                PipelineError::ValidationError("DATABASE_URL not set".to_string())
            })?;
            info!(table = %config.articles_table, "Connecting to Postgres article store...");
            let store = PgArticleStore::connect(database_url, &config.articles_table).await?;
            Ok(Arc::new(store))
        }
        other => Err(PipelineError::ValidationError(format!(
            "unknown store backend: {}",
            other
        ))),
    }
}
