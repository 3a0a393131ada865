//! Catalog interface used by the sync pipeline.
//!
//! The HTTP client implements it for production; tests swap in an
//! in-memory catalog.

use std::future::Future;

use super::error::ApiError;
use super::types::{CollectionPage, CollectionQuery, SubjectDetail};

/// Read-only access to a media catalog
pub trait CatalogApi: Send + Sync {
    /// Fetch one page of a user's collection.
    fn collections(
        &self,
        query: &CollectionQuery,
    ) -> impl Future<Output = Result<CollectionPage, ApiError>> + Send;

    /// Fetch the full record of one subject.
    fn subject(&self, subject_id: u64)
        -> impl Future<Output = Result<SubjectDetail, ApiError>> + Send;
}
