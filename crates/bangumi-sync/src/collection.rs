//! Paginated collection fetching.
//!
//! Walks one status bucket of a user's collection page by page until a short
//! page comes back. Failed pages are not retried: pagination stops and the
//! pages gathered so far are kept. A 404 at any offset means the bucket has
//! no data and discards whatever was gathered.

use crate::api::{CatalogApi, CollectionEntry, CollectionQuery, SubjectType, Throttle};
use shared::CollectionStatus;
use tracing::{debug, info, warn};

/// Result of walking one status bucket
#[derive(Debug, Default)]
pub struct CollectionFetch {
    /// Entries in listing order
    pub entries: Vec<CollectionEntry>,
    /// Pages successfully fetched
    pub pages: usize,
    /// Whether pagination stopped on an error rather than a short page
    pub failed: bool,
}

/// Fetches every page of a collection bucket
pub struct CollectionFetcher<'a, A: CatalogApi> {
    api: &'a A,
    throttle: &'a Throttle,
    page_size: u32,
}

impl<'a, A: CatalogApi> CollectionFetcher<'a, A> {
    pub fn new(api: &'a A, throttle: &'a Throttle, page_size: u32) -> Self {
        Self {
            api,
            throttle,
            page_size,
        }
    }

    /// Fetch all entries of `user_id`'s collection with the given status and subject type
    pub async fn fetch(
        &self,
        user_id: &str,
        status: CollectionStatus,
        subject_type: SubjectType,
    ) -> CollectionFetch {
        let mut fetch = CollectionFetch::default();
        let mut offset = 0;

        debug!(status = %status, subject_type = subject_type.code(), "Fetching collection");

        loop {
            let query = CollectionQuery {
                user_id: user_id.to_string(),
                subject_type,
                collection_type: status.into(),
                limit: self.page_size,
                offset,
            };

            match self.api.collections(&query).await {
                Ok(page) => {
                    let entries = page.into_entries();
                    let count = entries.len();

                    fetch.pages += 1;
                    fetch.entries.extend(entries);
                    debug!(
                        status = %status,
                        offset = offset,
                        fetched = fetch.entries.len(),
                        "Fetched collection page"
                    );

                    // An empty page also ends the walk, even with a zero page size
                    if count == 0 || count < self.page_size as usize {
                        break;
                    }

                    offset += self.page_size;
                    self.throttle.after_page().await;
                }
                Err(e) if e.is_not_found() => {
                    info!(
                        user_id = user_id,
                        status = %status,
                        offset = offset,
                        discarded = fetch.entries.len(),
                        "User does not exist or has no data of this type"
                    );
                    fetch.entries.clear();
                    break;
                }
                Err(e) => {
                    warn!(
                        status = %status,
                        offset = offset,
                        kept = fetch.entries.len(),
                        error = %e,
                        "Collection fetch failed, stopping pagination"
                    );
                    fetch.failed = true;
                    break;
                }
            }
        }

        fetch
    }
}
