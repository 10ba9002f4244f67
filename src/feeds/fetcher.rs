//! Feed fetching and parsing
//!
//! Downloads an RSS/Atom document and turns its leading entries into
//! `FeedEntry` values. Each call re-fetches the endpoint.

use async_trait::async_trait;
use chrono::Utc;
use feed_rs::model::Entry;
use reqwest::Client;
use tracing::debug;

use crate::error::{PipelineError, Result};
use crate::schemas::{EntryLink, EntryMedia, FeedEntry, UNTITLED};

/// Retrieves the leading entries of a feed endpoint
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Fetches at most `limit` entries in feed order
    async fn fetch(&self, url: &str, limit: usize) -> Result<Vec<FeedEntry>>;
}

/// reqwest + feed-rs implementation
#[derive(Clone)]
pub struct HttpFeedFetcher {
    client: Client,
}

impl HttpFeedFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedFetcher for HttpFeedFetcher {
    async fn fetch(&self, url: &str, limit: usize) -> Result<Vec<FeedEntry>> {
        debug!(url = %url, "Fetching feed");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| PipelineError::feed(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::feed(url, format!("HTTP {}", status)));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| PipelineError::feed(url, e))?;

        parse_feed(url, &bytes, limit)
    }
}

/// Parses a feed document and keeps the first `limit` entries
pub fn parse_feed(url: &str, body: &[u8], limit: usize) -> Result<Vec<FeedEntry>> {
    let feed = feed_rs::parser::parse(body).map_err(|e| PipelineError::feed(url, e))?;

    let entries: Vec<FeedEntry> = feed
        .entries
        .into_iter()
        .take(limit)
        .map(convert_entry)
        .collect();

    debug!(url = %url, entries = entries.len(), "Parsed feed");
    Ok(entries)
}

fn convert_entry(entry: Entry) -> FeedEntry {
    let link = primary_link(&entry)
        .unwrap_or_else(|| format!("nolink-{}", Utc::now().timestamp()));

    let title = entry
        .title
        .as_ref()
        .map(|t| t.content.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());

    let content_body = entry.content.as_ref().and_then(|c| c.body.clone());

    let summary = entry
        .summary
        .as_ref()
        .map(|s| s.content.clone())
        .or_else(|| content_body.clone())
        .unwrap_or_default();

    let attachments = entry
        .media
        .iter()
        .flat_map(|m| m.content.iter())
        .filter(|c| {
            // <enclosure> lands here too; podcasts and videos are not covers
            c.content_type
                .as_ref()
                .map(|t| t.essence_str().starts_with("image/"))
                .unwrap_or(true)
        })
        .filter_map(|c| c.url.as_ref().map(|u| u.to_string()))
        .collect();

    let links = entry
        .links
        .iter()
        .map(|l| EntryLink {
            href: l.href.clone(),
            media_type: l.media_type.clone(),
        })
        .collect();

    let media = EntryMedia {
        attachments,
        links,
        content_blocks: content_body.into_iter().collect(),
    };

    FeedEntry::new(link, title, summary).with_media(media)
}

/// Prefers the alternate (or untyped) link, falling back to the first one
fn primary_link(entry: &Entry) -> Option<String> {
    entry
        .links
        .iter()
        .find(|l| matches!(l.rel.as_deref(), None | Some("alternate")))
        .or_else(|| entry.links.first())
        .map(|l| l.href.trim().to_string())
        .filter(|href| !href.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Portal</title>
    <link>https://example.com</link>
    <description>News</description>
    <item>
      <title>First story</title>
      <link>https://example.com/1</link>
      <description><![CDATA[<p>First <b>summary</b></p>]]></description>
      <media:content url="https://example.com/1.jpg" medium="image" />
    </item>
    <item>
      <title>Second story</title>
      <link>https://example.com/2</link>
      <description>Second summary</description>
      <content:encoded><![CDATA[<p>Body <img src="https://example.com/2.png"/></p>]]></content:encoded>
    </item>
    <item>
      <title>Third story</title>
      <link>https://example.com/3</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn test_parse_limits_entries() {
        let entries = parse_feed("https://example.com/feed", RSS.as_bytes(), 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].link, "https://example.com/1");
        assert_eq!(entries[1].link, "https://example.com/2");
    }

    #[test]
    fn test_parse_media_and_content() {
        let entries = parse_feed("https://example.com/feed", RSS.as_bytes(), 10).unwrap();
        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0].title, "First story");
        assert!(entries[0].summary.contains("First"));
        assert_eq!(entries[0].media.attachments, vec!["https://example.com/1.jpg".to_string()]);

        assert!(entries[1].media.attachments.is_empty());
        assert_eq!(entries[1].media.content_blocks.len(), 1);
        assert!(entries[1].media.content_blocks[0].contains("2.png"));
    }

    #[test]
    fn test_parse_invalid_feed() {
        let err = parse_feed("https://example.com/feed", b"<html>not a feed", 2).unwrap_err();
        assert!(matches!(err, PipelineError::FeedError { .. }));
    }

    #[test]
    fn test_non_image_enclosure_is_not_attachment() {
        let rss = r#"<rss version="2.0"><channel><title>x</title>
            <item>
              <title>Episode 1</title>
              <link>https://example.com/ep1</link>
              <enclosure url="https://example.com/ep1.mp3" type="audio/mpeg" length="1000"/>
            </item>
            <item>
              <title>Photo story</title>
              <link>https://example.com/photo</link>
              <enclosure url="https://example.com/photo.jpg" type="image/jpeg" length="1000"/>
            </item>
            </channel></rss>"#;
        let entries = parse_feed("u", rss.as_bytes(), 2).unwrap();
        assert!(entries[0].media.attachments.is_empty());
        assert_eq!(entries[1].media.attachments, vec!["https://example.com/photo.jpg".to_string()]);
    }

    #[test]
    fn test_missing_title_uses_placeholder() {
        let rss = r#"<rss version="2.0"><channel><title>x</title>
            <item><link>https://example.com/a</link><description>d</description></item>
            </channel></rss>"#;
        let entries = parse_feed("u", rss.as_bytes(), 2).unwrap();
        assert_eq!(entries[0].title, UNTITLED);
    }
}
