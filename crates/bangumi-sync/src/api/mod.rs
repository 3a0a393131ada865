//! Bangumi API v0 client implementation.
//!
//! This module provides the HTTP client, the response types, and the fixed
//! pacing used between requests.

pub mod client;
pub mod error;
pub mod throttle;
pub mod traits;
pub mod types;

pub use client::BangumiClient;
pub use error::ApiError;
pub use throttle::Throttle;
pub use traits::CatalogApi;
pub use types::*;
