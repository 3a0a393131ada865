use thiserror::Error;

/// Failure of a single catalog API request
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404: unknown user or subject, or nothing collected of this type
    #[error("not found: {url}")]
    NotFound { url: String },

    #[error("request to {url} failed with status {status}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }
}
