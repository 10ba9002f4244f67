//! Roboportal content pipeline
//!
//! Harvests RSS/Atom feeds per editorial category, rewrites each new story
//! with a local language model, attaches an affiliate product link and a
//! cover image, and persists the result as a publishable article.

pub mod affiliate;
pub mod config;
pub mod dedup;
pub mod error;
pub mod feeds;
pub mod http_client;
pub mod image;
pub mod llm;
pub mod pipeline;
pub mod sanitize;
pub mod schemas;
pub mod scheduler;
pub mod slug;
pub mod storage;
pub mod transformer;

pub use config::Config;
pub use error::{ErrorTier, PipelineError, Result};
pub use pipeline::{ArticlePipeline, EntryOutcome, SourceReport};
pub use scheduler::{CycleReport, CycleScheduler, StopHandle};
