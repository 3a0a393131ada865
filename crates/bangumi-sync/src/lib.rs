//! Bangumi collection sync for the site's media pages.
//!
//! This library fetches a user's anime, book and game collections from the
//! Bangumi API v0, normalizes every entry into the site's record shape, and
//! writes one JSON file per category.

pub mod api;
pub mod collection;
pub mod local;
pub mod normalize;
pub mod sync;
pub mod writer;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ApiError, BangumiClient, CatalogApi, Throttle};
pub use collection::{CollectionFetch, CollectionFetcher};
pub use local::{check_local_data, LocalReport};
pub use normalize::Normalize;
pub use sync::{BangumiSync, SyncStats};
