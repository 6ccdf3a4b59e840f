// Public AT Protocol client: unauthenticated XRPC over HTTP.
//
// All the read endpoints the labeler needs are public. The same client also
// downloads image blobs from the CDN URLs embedded in post views.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Default public API endpoint for AT Protocol read operations.
pub const DEFAULT_PUBLIC_API_URL: &str = "https://public.api.bsky.app";

/// Unauthenticated HTTP client for public AT Protocol XRPC endpoints.
pub struct PublicAtpClient {
    client: reqwest::Client,
    base_url: String,
}

impl PublicAtpClient {
    /// Create a new public API client pointing at the given base URL.
    ///
    /// Defaults to `https://public.api.bsky.app`; pass a different URL
    /// for testing or alternate PDS instances.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("brindle/0.1 (moderation-labeler)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request to an XRPC endpoint and deserialize the response.
    ///
    /// `nsid` is the XRPC method name (e.g. "app.bsky.feed.getPosts").
    /// `params` are query string key-value pairs.
    pub async fn xrpc_get<T: DeserializeOwned>(
        &self,
        nsid: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}/xrpc/{}", self.base_url, nsid);

        debug!(nsid = nsid, "XRPC GET request");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .with_context(|| format!("XRPC request failed: {nsid}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("XRPC {nsid} returned {status}: {body}");
        }

        response
            .json::<T>()
            .await
            .with_context(|| format!("Failed to deserialize {nsid} response"))
    }

    /// Resolve a handle to its DID via the public API.
    pub async fn resolve_handle(&self, handle: &str) -> Result<String> {
        let resp: ResolveHandleResponse = self
            .xrpc_get(
                "com.atproto.identity.resolveHandle",
                &[("handle", handle)],
            )
            .await
            .with_context(|| format!("Failed to resolve handle @{handle}"))?;
        Ok(resp.did)
    }

    /// Download raw bytes from an absolute URL (image CDN blobs).
    ///
    /// Callers treat a failure here as a degraded signal for that one image,
    /// not as a post-level error.
    pub async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Failed to download {url}"))?;

        if !response.status().is_success() {
            anyhow::bail!("Download of {url} returned {}", response.status());
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read body of {url}"))?;
        Ok(bytes.to_vec())
    }
}

// -- Serde types for identity resolution --

#[derive(Deserialize)]
struct ResolveHandleResponse {
    did: String,
}
