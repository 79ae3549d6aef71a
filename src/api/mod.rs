pub mod map;
pub mod types;

use async_trait::async_trait;
use reqwest::Response;
use serde::de::DeserializeOwned;
use thiserror::Error;

use types::{ContentBlock, PostSummary, RawBlock, RawPost, ResultsPayload};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("provider error (status {status}): {detail}")]
    Status { status: u16, detail: String },
    #[error("deserialization error: {0}")]
    Decode(String),
    #[error("mapping error: {0}")]
    Map(#[from] map::MapError),
}

// ---------------------------------------------------------------------------
// Provider trait
// ---------------------------------------------------------------------------

/// Remote source of post summaries and per-post block sequences. The rest of
/// the application only ever talks to this trait, so tests can swap in
/// scripted providers.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, ProviderError>;
    async fn post_blocks(&self, post_id: &str) -> Result<Vec<ContentBlock>, ProviderError>;
}

// ---------------------------------------------------------------------------
// HTTP provider
// ---------------------------------------------------------------------------

pub struct HttpContentProvider {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpContentProvider {
    pub fn new(base_url: &str) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a full URL from a path (e.g. "/posts/123/blocks").
    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        let resp = self.http_client.get(url).send().await?;
        handle_response(resp).await
    }
}

/// Check status, then deserialize the body. Any non-2xx status is the same
/// "fetch failed" outcome as a transport error to callers.
async fn handle_response<T: DeserializeOwned>(resp: Response) -> Result<T, ProviderError> {
    let status = resp.status();
    if !status.is_success() {
        let detail = resp.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    let body = resp.text().await?;
    serde_json::from_str::<T>(&body).map_err(|e| ProviderError::Decode(format!("{e}: {body}")))
}

#[async_trait]
impl ContentProvider for HttpContentProvider {
    async fn list_posts(&self) -> Result<Vec<PostSummary>, ProviderError> {
        let payload: ResultsPayload<RawPost> = self.get_json(&self.url("/posts")).await?;
        Ok(map::map_posts_v1(payload.results)?)
    }

    async fn post_blocks(&self, post_id: &str) -> Result<Vec<ContentBlock>, ProviderError> {
        let url = self.url(&format!("/posts/{post_id}/blocks"));
        let payload: ResultsPayload<RawBlock> = self.get_json(&url).await?;
        Ok(map::map_blocks_v1(payload.results)?)
    }
}
