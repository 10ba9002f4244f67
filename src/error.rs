//! Error types for the content pipeline
//!
//! Every error carries a tier that tells the caller how far the failure
//! reaches: the current entry, the current source, or the whole process.

use thiserror::Error;

/// How far up the pipeline a failure propagates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorTier {
    /// Drop this entry, keep processing the source
    SkipEntry,
    /// Drop the rest of this source for the current pass
    SkipSource,
    /// Stop the process before (or instead of) entering the loop
    Abort,
}

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    #[error("Feed error for {url}: {message}")]
    FeedError {
        url: String,
        message: String,
    },

    #[error("Model call failed: {0}")]
    ModelError(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Store API error: {code} - {message}")]
    StoreApiError {
        code: String,
        message: String,
    },

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Service unreachable: {0}")]
    ServiceUnreachable(String),
}

impl PipelineError {
    /// Classifies the error for the skip-and-continue boundaries
    pub fn tier(&self) -> ErrorTier {
        match self {
            PipelineError::FeedError { .. } => ErrorTier::SkipSource,
            PipelineError::ConfigError(_)
            | PipelineError::ValidationError(_)
            | PipelineError::ServiceUnreachable(_) => ErrorTier::Abort,
            PipelineError::HttpError(_)
            | PipelineError::JsonError(_)
            | PipelineError::DatabaseError(_)
            | PipelineError::ModelError(_)
            | PipelineError::MalformedOutput(_)
            | PipelineError::StoreApiError { .. } => ErrorTier::SkipEntry,
        }
    }

    pub fn feed(url: impl Into<String>, message: impl ToString) -> Self {
        PipelineError::FeedError {
            url: url.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
