//! Record types flowing through the pipeline
//!
//! `FeedEntry` is transient, `TransformationResult` is the model's JSON
//! contract, and `Article` is the row written to the store.

pub mod article;
pub mod feed_entry;
pub mod transformation;

pub use article::*;
pub use feed_entry::*;
pub use transformation::*;
