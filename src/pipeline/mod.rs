//! Per-source article pipeline
//!
//! fetch → dedup → sanitize → transform → affiliate link + image → slug → persist
//!
//! Every entry is an independent unit of work. Failures are classified by
//! `ErrorTier`: `SkipEntry` drops only that entry, `SkipSource` drops the rest
//! of the source for this pass, `Abort` is handed back to the scheduler.

use chrono::Utc;
use rand::Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::affiliate::AffiliateLinkBuilder;
use crate::config::Config;
use crate::dedup::DuplicateFilter;
use crate::error::{ErrorTier, PipelineError, Result};
use crate::feeds::{FeedFetcher, Source};
use crate::image::{ImageFallback, ImageResolver};
use crate::llm::TextCompletion;
use crate::sanitize::{clean_html, truncate_chars};
use crate::schemas::{Article, FeedEntry, TransformationResult};
use crate::slug::slugify;
use crate::storage::ArticleStore;
use crate::transformer::ContentTransformer;

/// Bounds of the synthetic view counter
pub const VIEWS_FAKE_RANGE: std::ops::RangeInclusive<i32> = 50..=500;

/// What happened to a single entry
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    Created(Box<Article>),
    Duplicate,
}

/// Tally for one source pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceReport {
    pub skipped: bool,
    pub entries: usize,
    pub duplicates: usize,
    pub transform_failures: usize,
    pub persist_failures: usize,
    pub created: usize,
}

pub struct ArticlePipeline {
    fetcher: Arc<dyn FeedFetcher>,
    store: Arc<dyn ArticleStore>,
    dedup: DuplicateFilter,
    transformer: ContentTransformer,
    affiliate: AffiliateLinkBuilder,
    images: ImageResolver,
    entries_per_fetch: usize,
    summary_max_chars: usize,
}

impl ArticlePipeline {
    pub fn new(
        config: &Config,
        fetcher: Arc<dyn FeedFetcher>,
        store: Arc<dyn ArticleStore>,
        model: Arc<dyn TextCompletion>,
        image_fallback: Box<dyn ImageFallback>,
    ) -> Self {
        Self {
            fetcher,
            dedup: DuplicateFilter::new(store.clone()),
            store,
            transformer: ContentTransformer::new(model, config.model_temperature),
            affiliate: AffiliateLinkBuilder::new(
                config.marketplace_search_url.clone(),
                config.affiliate_tag.clone(),
            ),
            images: ImageResolver::new(image_fallback),
            entries_per_fetch: config.entries_per_fetch,
            summary_max_chars: config.summary_max_chars,
        }
    }

    /// Runs one source end to end
    ///
    /// Entry and source level failures are absorbed into the report; only an
    /// `Abort` tier error is returned.
    pub async fn process_source(&self, source: &Source) -> Result<SourceReport> {
        let mut report = SourceReport::default();
        info!(source = %source.url, category = %source.category, "Scanning source");

        let entries = match self.fetcher.fetch(&source.url, self.entries_per_fetch).await {
            Ok(entries) => entries,
            Err(e) if e.tier() == ErrorTier::Abort => return Err(e),
            Err(e) => {
                warn!(source = %source.url, error = %e, "Feed unavailable, skipping source");
                report.skipped = true;
                return Ok(report);
            }
        };

        for entry in entries.iter().take(self.entries_per_fetch) {
            report.entries += 1;
            let err = match self.process_entry(entry, &source.category).await {
                Ok(EntryOutcome::Created(article)) => {
                    info!(
                        title = %truncate_chars(&article.titulo_viral, 40),
                        product = %article.call_to_action_prod,
                        "Article created"
                    );
                    report.created += 1;
                    continue;
                }
                Ok(EntryOutcome::Duplicate) => {
                    report.duplicates += 1;
                    continue;
                }
                Err(err) => err,
            };

            match &err {
                StageError::Transform(e) => {
                    warn!(link = %entry.link, error = %e, "Transformation failed");
                    report.transform_failures += 1;
                }
                StageError::Persist(e) => {
                    error!(link = %entry.link, error = %e, "Insert failed");
                    report.persist_failures += 1;
                }
            }

            match err.tier() {
                ErrorTier::SkipEntry => {}
                ErrorTier::SkipSource => {
                    warn!(source = %source.url, "Skipping rest of source");
                    report.skipped = true;
                    break;
                }
                ErrorTier::Abort => return Err(err.into_inner()),
            }
        }

        debug!(source = %source.url, created = report.created, "Source done");
        Ok(report)
    }

    /// Processes one entry; returns the persisted article on success
    pub async fn process_entry(
        &self,
        entry: &FeedEntry,
        category: &str,
    ) -> std::result::Result<EntryOutcome, StageError> {
        if self.dedup.is_known(&entry.link).await {
            debug!(link = %entry.link, "Already published");
            return Ok(EntryOutcome::Duplicate);
        }

        info!(title = %truncate_chars(&entry.title, 30), "Processing entry");

        let summary = truncate_chars(&clean_html(&entry.summary), self.summary_max_chars);
        let transformed = self
            .transformer
            .transform(&entry.title, &summary, category)
            .await
            .map_err(StageError::Transform)?;

        let article = self.assemble(entry, category, transformed);
        self.store.insert(&article).await.map_err(StageError::Persist)?;

        Ok(EntryOutcome::Created(Box::new(article)))
    }

    fn assemble(&self, entry: &FeedEntry, category: &str, result: TransformationResult) -> Article {
        let cover = self.images.resolve(entry, &result.titulo);
        let affiliate_link = self.affiliate.link_for(&result.produto_venda);

        Article {
            slug: slugify(&result.titulo),
            titulo_viral: result.titulo.clone(),
            titulo_original: entry.title.clone(),
            conteudo_html: result.conteudo_html,
            resumo_seo: result.resumo_seo,
            categoria: category.to_string(),
            imagem_capa: cover,
            imagem_alt: result.titulo,
            call_to_action_prod: result.produto_venda,
            link_afiliado_gerado: affiliate_link,
            created_at: Utc::now(),
            fonte_original: entry.link.clone(),
            views_fake: rand::thread_rng().gen_range(VIEWS_FAKE_RANGE),
        }
    }
}

/// Entry-level failure, tagged with the stage that produced it
#[derive(Debug, Error)]
pub enum StageError {
    #[error("transform: {0}")]
    Transform(PipelineError),

    #[error("persist: {0}")]
    Persist(PipelineError),
}

impl StageError {
    pub fn tier(&self) -> ErrorTier {
        match self {
            StageError::Transform(e) | StageError::Persist(e) => e.tier(),
        }
    }

    pub fn into_inner(self) -> PipelineError {
        match self {
            StageError::Transform(e) | StageError::Persist(e) => e,
        }
    }
}

/// Checks the model once at startup; unreachable is fatal
pub async fn ensure_model_available(model: &dyn TextCompletion) -> Result<()> {
    model.health_check().await.map_err(|e| {
        error!(error = %e, "Model service offline, start it first");
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_error_display_and_tier() {
        let err = StageError::Transform(PipelineError::MalformedOutput("eof".to_string()));
        assert_eq!(err.to_string(), "transform: Malformed model output: eof");
        assert_eq!(err.tier(), ErrorTier::SkipEntry);

        let err = StageError::Persist(PipelineError::ServiceUnreachable("store".to_string()));
        assert_eq!(err.tier(), ErrorTier::Abort);
        assert!(matches!(err.into_inner(), PipelineError::ServiceUnreachable(_)));
    }
}
