//! Cover image resolution
//!
//! Resolution order, first hit wins:
//! 1. structured media attachment
//! 2. entry link with an `image/*` MIME type
//! 3. first `<img>` inside the entry's HTML content
//! 4. generated image URL built from the rewritten title

use scraper::{Html, Selector};
use tracing::debug;

use crate::config::Config;
use crate::sanitize::alphanumeric_title;
use crate::schemas::FeedEntry;

/// Last-resort image source keyed by title
pub trait ImageFallback: Send + Sync {
    fn image_url(&self, title: &str) -> String;
}

/// Prompt-templated image generation endpoint (pollinations-style)
#[derive(Debug, Clone)]
pub struct PromptImageGenerator {
    endpoint: String,
    width: u32,
    height: u32,
    model: String,
    title_max_chars: usize,
}

impl PromptImageGenerator {
    pub fn new(endpoint: impl Into<String>, width: u32, height: u32, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            width,
            height,
            model: model.into(),
            title_max_chars: 100,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.image_endpoint.trim_end_matches('/'),
            config.image_width,
            config.image_height,
            config.image_model.clone(),
        )
        .with_title_max_chars(config.image_title_max_chars)
    }

    pub fn with_title_max_chars(mut self, max_chars: usize) -> Self {
        self.title_max_chars = max_chars;
        self
    }
}

impl ImageFallback for PromptImageGenerator {
    fn image_url(&self, title: &str) -> String {
        let clean = alphanumeric_title(title, self.title_max_chars);
        let prompt = format!("news photo of {}, realistic, 4k", clean);
        format!(
            "{}/{}?width={}&height={}&model={}&nologo=true",
            self.endpoint,
            urlencoding::encode(&prompt),
            self.width,
            self.height,
            self.model
        )
    }
}

pub struct ImageResolver {
    fallback: Box<dyn ImageFallback>,
}

impl ImageResolver {
    pub fn new(fallback: Box<dyn ImageFallback>) -> Self {
        Self { fallback }
    }

    /// Picks the cover image for `entry`; never fails
    pub fn resolve(&self, entry: &FeedEntry, title: &str) -> String {
        if let Some(url) = from_attachment(entry) {
            debug!(url = %url, "Image from media attachment");
            return url;
        }
        if let Some(url) = from_image_link(entry) {
            debug!(url = %url, "Image from typed link");
            return url;
        }
        if let Some(url) = from_content_html(entry) {
            debug!(url = %url, "Image from content HTML");
            return url;
        }
        self.fallback.image_url(title)
    }
}

fn from_attachment(entry: &FeedEntry) -> Option<String> {
    entry
        .media
        .attachments
        .first()
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
}

fn from_image_link(entry: &FeedEntry) -> Option<String> {
    entry
        .media
        .links
        .iter()
        .find(|l| {
            l.media_type
                .as_deref()
                .map(|t| t.starts_with("image/"))
                .unwrap_or(false)
        })
        .map(|l| l.href.clone())
        .filter(|href| !href.is_empty())
}

fn from_content_html(entry: &FeedEntry) -> Option<String> {
    let selector = Selector::parse("img").ok()?;
    entry.media.content_blocks.iter().find_map(|block| {
        let fragment = Html::parse_fragment(block);
        let src = fragment
            .select(&selector)
            .find_map(|img| img.value().attr("src"))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        src
    })
}
