//! Feed sources for the pipeline
//!
//! The catalog names what to poll; the fetcher turns one endpoint into entries.

pub mod catalog;
pub mod fetcher;

pub use catalog::{Source, SourceCatalog};
pub use fetcher::{parse_feed, FeedFetcher, HttpFeedFetcher};
