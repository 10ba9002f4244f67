//! Affiliate search links
//!
//! Turns the product keyword picked by the model into a marketplace search
//! URL carrying the affiliate tag. Pure string work, no network.

#[derive(Debug, Clone)]
pub struct AffiliateLinkBuilder {
    search_url: String,
    tag: String,
}

impl AffiliateLinkBuilder {
    pub fn new(search_url: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            tag: tag.into(),
        }
    }

    /// Search URL for `product` tagged with this builder's affiliate id
    pub fn link_for(&self, product: &str) -> String {
        format!(
            "{}?k={}&tag={}",
            self.search_url,
            urlencoding::encode(product.trim()),
            urlencoding::encode(&self.tag)
        )
    }
}
