//! FeedEntry Schema
//!
//! One candidate story pulled from a feed, with the media metadata the
//! image resolver inspects.

use serde::{Deserialize, Serialize};

/// Title used when a feed entry carries none
pub const UNTITLED: &str = "Sem Titulo";

/// Entry-level link with its declared MIME type
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryLink {
    pub href: String,
    pub media_type: Option<String>,
}

/// Media-related metadata kept from the parsed feed entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMedia {
    /// URLs of structured media attachments (media:content and friends), in feed order
    pub attachments: Vec<String>,
    /// All entry-level links
    pub links: Vec<EntryLink>,
    /// Raw HTML content blocks attached to the entry
    pub content_blocks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    /// Canonical link, the dedup key
    pub link: String,
    pub title: String,
    /// Raw summary HTML as published by the feed
    pub summary: String,
    pub media: EntryMedia,
}

impl FeedEntry {
    pub fn new(link: impl Into<String>, title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            title: title.into(),
            summary: summary.into(),
            media: EntryMedia::default(),
        }
    }

    pub fn with_media(mut self, media: EntryMedia) -> Self {
        self.media = media;
        self
    }
}
