//! In-memory fakes shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use roboportal::config::Config;
use roboportal::error::{PipelineError, Result};
use roboportal::feeds::FeedFetcher;
use roboportal::image::PromptImageGenerator;
use roboportal::llm::TextCompletion;
use roboportal::pipeline::ArticlePipeline;
use roboportal::schemas::{Article, FeedEntry};
use roboportal::storage::ArticleStore;

/// Article store backed by a Vec
#[derive(Default)]
pub struct MemoryStore {
    pub articles: Mutex<Vec<Article>>,
    pub fail_lookups: AtomicBool,
    pub fail_inserts: AtomicBool,
    pub insert_attempts: AtomicUsize,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.articles.lock().unwrap().len()
    }

    pub fn first(&self) -> Article {
        self.articles.lock().unwrap()[0].clone()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn exists_by_source(&self, link: &str) -> Result<bool> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(PipelineError::StoreApiError {
                code: "503".to_string(),
                message: "lookup unavailable".to_string(),
            });
        }
        Ok(self
            .articles
            .lock()
            .unwrap()
            .iter()
            .any(|a| a.fonte_original == link))
    }

    async fn insert(&self, article: &Article) -> Result<()> {
        self.insert_attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(PipelineError::StoreApiError {
                code: "500".to_string(),
                message: "insert rejected".to_string(),
            });
        }
        self.articles.lock().unwrap().push(article.clone());
        Ok(())
    }
}

/// Model that always answers with the same text
pub struct ScriptedModel {
    reply: String,
    pub calls: AtomicUsize,
    pub last_prompt: Mutex<Option<String>>,
}

impl ScriptedModel {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn answering(titulo: &str, produto: &str) -> Self {
        Self::new(
            serde_json::json!({
                "titulo": titulo,
                "resumo_seo": "Resumo curto",
                "produto_venda": produto,
                "conteudo_html": "<p>Texto reescrito</p>",
            })
            .to_string(),
        )
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextCompletion for ScriptedModel {
    async fn complete_json(&self, prompt: &str, _temperature: f32) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        Ok(self.reply.clone())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Fetcher serving canned entries per URL; unknown URLs fail
#[derive(Default)]
pub struct StaticFetcher {
    feeds: HashMap<String, Vec<FeedEntry>>,
    unreachable: HashSet<String>,
    pub fetches: AtomicUsize,
}

impl StaticFetcher {
    pub fn with_feed(mut self, url: &str, entries: Vec<FeedEntry>) -> Self {
        self.feeds.insert(url.to_string(), entries);
        self
    }

    /// URLs that fail with an abort-tier error
    pub fn with_unreachable(mut self, url: &str) -> Self {
        self.unreachable.insert(url.to_string());
        self
    }
}

#[async_trait]
impl FeedFetcher for StaticFetcher {
    async fn fetch(&self, url: &str, limit: usize) -> Result<Vec<FeedEntry>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.unreachable.contains(url) {
            return Err(PipelineError::ServiceUnreachable(url.to_string()));
        }
        self.feeds
            .get(url)
            .map(|entries| entries.iter().take(limit).cloned().collect())
            .ok_or_else(|| PipelineError::feed(url, "connection refused"))
    }
}

pub fn pipeline(
    fetcher: Arc<StaticFetcher>,
    store: Arc<MemoryStore>,
    model: Arc<ScriptedModel>,
) -> ArticlePipeline {
    let config = Config::default();
    ArticlePipeline::new(
        &config,
        fetcher,
        store,
        model,
        Box::new(PromptImageGenerator::from_config(&config)),
    )
}
