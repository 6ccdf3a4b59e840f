// Content source trait: the swap-ready seam between the evaluation core
// and the network. The CLI uses the live Bluesky source; tests substitute
// an in-memory one.

use anyhow::Result;
use async_trait::async_trait;

use super::client::PublicAtpClient;
use crate::post::Post;

#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Resolve a post URL into a fully materialized Post. Failure fails
    /// that single post's evaluation only.
    async fn fetch_post(&self, url: &str) -> Result<Post>;
}

/// Live content source backed by the public AT Protocol API.
pub struct BlueskySource {
    client: PublicAtpClient,
}

impl BlueskySource {
    pub fn new(public_api_url: &str) -> Result<Self> {
        Ok(Self {
            client: PublicAtpClient::new(public_api_url)?,
        })
    }
}

#[async_trait]
impl ContentSource for BlueskySource {
    async fn fetch_post(&self, url: &str) -> Result<Post> {
        super::posts::fetch_post(&self.client, url).await
    }
}
