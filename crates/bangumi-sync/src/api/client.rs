//! Bangumi API client.
//!
//! Plain request/response plumbing: no retries and no rate limiting here.
//! Pacing between requests is the caller's job (see [`super::Throttle`]).

use super::error::ApiError;
use super::traits::CatalogApi;
use super::types::*;
use anyhow::{Context, Result};
use reqwest::{Client, ClientBuilder, StatusCode};
use shared::config::ApiConfig;
use std::time::Duration;
use tracing::debug;

/// Bangumi API v0 client
pub struct BangumiClient {
    /// HTTP client
    client: Client,
    /// Base URL for the API, without trailing slash
    base_url: String,
}

impl BangumiClient {
    /// Create a new client from the `[api]` settings
    pub fn new(settings: &ApiConfig) -> Result<Self> {
        Self::build(Client::builder(), settings)
    }

    fn build(builder: ClientBuilder, settings: &ApiConfig) -> Result<Self> {
        let client = builder
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request and decode the JSON body
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);

        debug!(url = %url, "Making API request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { url });
        }

        let body = response.text().await.map_err(|source| ApiError::Transport {
            url: url.clone(),
            source,
        })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
    }
}

impl CatalogApi for BangumiClient {
    async fn collections(&self, query: &CollectionQuery) -> Result<CollectionPage, ApiError> {
        self.get(&query.endpoint()).await
    }

    async fn subject(&self, subject_id: u64) -> Result<SubjectDetail, ApiError> {
        self.get(&format!("/v0/subjects/{}", subject_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Throttle;
    use crate::collection::CollectionFetcher;
    use shared::CollectionStatus;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Serve one canned response per connection, returning the raw requests
    async fn serve(responses: Vec<(&'static str, &'static str)>) -> (String, JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let mut requests = Vec::new();
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();

                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = socket.read(&mut buf).await.unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let response = format!(
                    "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                socket.write_all(response.as_bytes()).await.unwrap();
                socket.shutdown().await.ok();

                requests.push(String::from_utf8_lossy(&request).to_string());
            }
            requests
        });

        (format!("http://{}/", addr), handle)
    }

    fn client(base_url: &str) -> BangumiClient {
        let settings = ApiConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        };
        BangumiClient::build(Client::builder().no_proxy(), &settings).unwrap()
    }

    fn query() -> CollectionQuery {
        CollectionQuery {
            user_id: "sai".to_string(),
            subject_type: SubjectType::Anime,
            collection_type: CollectionType::Doing,
            limit: 50,
            offset: 0,
        }
    }

    #[test]
    fn test_client_creation() {
        let mut settings = ApiConfig::default();
        settings.base_url = "https://api.bgm.tv/".to_string();

        let client = BangumiClient::new(&settings).unwrap();
        assert_eq!(client.base_url, "https://api.bgm.tv");
    }

    #[tokio::test]
    async fn test_collection_page_request() {
        let (base_url, server) = serve(vec![(
            "200 OK",
            r#"{"total":1,"limit":50,"offset":0,"data":[{"subject_id":253,"rate":9,"ep_status":26}]}"#,
        )])
        .await;

        let page = client(&base_url).collections(&query()).await.unwrap();
        let entries = page.into_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].subject_id, 253);
        assert_eq!(entries[0].ep_status, Some(26));

        let requests = server.await.unwrap();
        let request = requests[0].to_ascii_lowercase();
        assert!(request.starts_with(
            "get /v0/users/sai/collections?subject_type=2&type=3&limit=50&offset=0 http/1.1"
        ));
        assert!(request.contains("user-agent: bangumi-sync/"));
    }

    #[tokio::test]
    async fn test_page_without_data_is_empty() {
        let (base_url, server) = serve(vec![("200 OK", r#"{"total":0,"limit":50,"offset":0}"#)]).await;

        let page = client(&base_url).collections(&query()).await.unwrap();
        assert!(page.into_entries().is_empty());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_not_found_status() {
        let (base_url, server) = serve(vec![(
            "404 Not Found",
            r#"{"title":"Not Found","description":"user doesn't exist or has been removed"}"#,
        )])
        .await;

        let err = client(&base_url).collections(&query()).await.unwrap_err();
        assert!(err.is_not_found());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_error_statuses_keep_code_and_body() {
        let (base_url, server) = serve(vec![
            ("429 Too Many Requests", r#"{"title":"Too Many Requests"}"#),
            ("500 Internal Server Error", "oops"),
        ])
        .await;
        let client = client(&base_url);

        match client.collections(&query()).await {
            Err(ApiError::Status { status, body, .. }) => {
                assert_eq!(status, 429);
                assert!(body.contains("Too Many Requests"));
            }
            other => panic!("expected status error, got {:?}", other),
        }

        match client.subject(253).await {
            Err(ApiError::Status { status, body, .. }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "oops");
            }
            other => panic!("expected status error, got {:?}", other),
        }

        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let (base_url, server) = serve(vec![("200 OK", "<html>maintenance</html>")]).await;

        let err = client(&base_url).subject(253).await.unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert!(!err.is_not_found());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_subject_request() {
        let (base_url, server) = serve(vec![(
            "200 OK",
            r#"{"id":253,"summary":"公元2071年","platform":"TV","infobox":[{"key":"动画制作","value":"サンライズ"}]}"#,
        )])
        .await;

        let detail = client(&base_url).subject(253).await.unwrap();
        assert_eq!(detail.id, Some(253));
        assert_eq!(detail.infobox_field(&["动画制作"]), Some("サンライズ"));

        let requests = server.await.unwrap();
        assert!(requests[0].starts_with("GET /v0/subjects/253 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client(&format!("http://{}", addr)).subject(1).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }

    #[tokio::test]
    async fn test_not_found_from_server_yields_empty_bucket() {
        let (base_url, server) = serve(vec![("404 Not Found", "{}")]).await;
        let client = client(&base_url);
        let throttle = Throttle::none();

        let fetch = CollectionFetcher::new(&client, &throttle, 50)
            .fetch("nobody", CollectionStatus::Watching, SubjectType::Anime)
            .await;

        assert!(fetch.entries.is_empty());
        assert!(!fetch.failed);
        assert_eq!(server.await.unwrap().len(), 1);
    }
}
