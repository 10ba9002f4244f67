//! PostgREST (Supabase) article store

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use tracing::debug;

use super::ArticleStore;
use crate::error::{PipelineError, Result};
use crate::schemas::Article;

/// Article store speaking the PostgREST dialect over HTTP
#[derive(Clone)]
pub struct RestArticleStore {
    client: Client,
    table_url: String,
    api_key: String,
}

impl RestArticleStore {
    pub fn new(client: Client, base_url: &str, api_key: &str, table: &str) -> Self {
        Self {
            client,
            table_url: format!("{}/rest/v1/{}", base_url.trim_end_matches('/'), table),
            api_key: api_key.to_string(),
        }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PipelineError::StoreApiError {
            code: status.to_string(),
            message: body,
        })
    }
}

#[async_trait]
impl ArticleStore for RestArticleStore {
    async fn exists_by_source(&self, link: &str) -> Result<bool> {
        let filter = format!("eq.{}", link);
        let request = self
            .client
            .get(&self.table_url)
            .query(&[("select", "id"), ("fonte_original", filter.as_str()), ("limit", "1")]);

        let response = Self::check_status(self.authorize(request).send().await?).await?;
        let rows: Vec<serde_json::Value> = response.json().await?;

        debug!(link = %link, matches = rows.len(), "Existence check");
        Ok(!rows.is_empty())
    }

    async fn insert(&self, article: &Article) -> Result<()> {
        let request = self
            .client
            .post(&self.table_url)
            .header("Prefer", "return=minimal")
            .json(article);

        Self::check_status(self.authorize(request).send().await?).await?;
        Ok(())
    }
}
