//! Postgres article store

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::ArticleStore;
use crate::error::{PipelineError, Result};
use crate::schemas::Article;

/// Article store backed by a sqlx Postgres pool
#[derive(Clone)]
pub struct PgArticleStore {
    db: PgPool,
    table: String,
}

impl PgArticleStore {
    /// Connects to the database and targets the given table
    pub async fn connect(database_url: &str, table: &str) -> Result<Self> {
        let db = PgPool::connect(database_url).await?;
        info!("Postgres article store connected");
        Self::with_pool(db, table)
    }

    pub fn with_pool(db: PgPool, table: &str) -> Result<Self> {
        if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PipelineError::ValidationError(format!(
                "invalid table name: {}",
                table
            )));
        }
        Ok(Self {
            db,
            table: table.to_string(),
        })
    }
}

#[async_trait]
impl ArticleStore for PgArticleStore {
    async fn exists_by_source(&self, link: &str) -> Result<bool> {
        // Runtime query so the crate builds without a live database
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE fonte_original = $1)",
            self.table
        );
        let exists: bool = sqlx::query_scalar(&sql)
            .bind(link)
            .fetch_one(&self.db)
            .await?;
        Ok(exists)
    }

    async fn insert(&self, article: &Article) -> Result<()> {
        let sql = format!(
            r#"
            INSERT INTO {} (
                slug, titulo_viral, titulo_original, conteudo_html, resumo_seo,
                categoria, imagem_capa, imagem_alt, call_to_action_prod,
                link_afiliado_gerado, created_at, fonte_original, views_fake
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            "#,
            self.table
        );

        sqlx::query(&sql)
            .bind(&article.slug)
            .bind(&article.titulo_viral)
            .bind(&article.titulo_original)
            .bind(&article.conteudo_html)
            .bind(&article.resumo_seo)
            .bind(&article.categoria)
            .bind(&article.imagem_capa)
            .bind(&article.imagem_alt)
            .bind(&article.call_to_action_prod)
            .bind(&article.link_afiliado_gerado)
            .bind(article.created_at)
            .bind(&article.fonte_original)
            .bind(article.views_fake)
            .execute(&self.db)
            .await?;

        Ok(())
    }
}
