//! Deduplication Module
//!
//! An entry is known when the store already holds an article whose
//! `fonte_original` equals the entry link. A failed lookup counts as
//! "not known": availability wins over strict dedup, so a flaky store can
//! let a duplicate through.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::storage::ArticleStore;

#[derive(Clone)]
pub struct DuplicateFilter {
    store: Arc<dyn ArticleStore>,
}

impl DuplicateFilter {
    pub fn new(store: Arc<dyn ArticleStore>) -> Self {
        Self { store }
    }

    /// Returns true if `link` is already persisted
    pub async fn is_known(&self, link: &str) -> bool {
        match self.store.exists_by_source(link).await {
            Ok(known) => {
                debug!(link = %link, known, "Dedup check");
                known
            }
            Err(e) => {
                warn!(link = %link, error = %e, "Dedup check failed, treating as new");
                false
            }
        }
    }
}
