// Post fetching: resolve a bsky.app URL to a fully materialized Post.
//
// The record text and facets are required (keyword and domain analysis need
// the full text, so a decode failure is fatal for that post); individual
// image downloads are not; a failed image degrades that one signal.

use anyhow::{Context, Result};
use atrium_api::app::bsky::feed::defs::PostViewEmbedRefs;
use atrium_api::app::bsky::feed::get_posts;
use atrium_api::app::bsky::richtext::facet::MainFeaturesItem;
use atrium_api::types::{TryFromUnknown, Union};
use futures::future::join_all;
use tracing::{debug, warn};

use super::client::PublicAtpClient;
use crate::post::{ImageContent, Post};

/// What a post embeds, as a closed set of kinds the policies care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmbedKind {
    /// External link card with its URI
    LinkPreview(String),
    /// One or more images, as fullsize CDN URLs
    ImageSet(Vec<String>),
    /// No embed, or an embed kind we don't inspect (records, video)
    None,
}

/// Parse a bsky.app post URL into (actor, rkey).
///
/// Accepts `https://bsky.app/profile/<handle-or-did>/post/<rkey>`.
pub fn parse_post_url(url: &str) -> Result<(String, String)> {
    let parts: Vec<&str> = url.trim_end_matches('/').split('/').collect();
    let rkey_pos = parts.len().checked_sub(1);
    let post_pos = parts.len().checked_sub(2);
    let actor_pos = parts.len().checked_sub(3);

    match (actor_pos, post_pos, rkey_pos) {
        (Some(a), Some(p), Some(r)) if parts[p] == "post" && !parts[a].is_empty() => {
            Ok((parts[a].to_string(), parts[r].to_string()))
        }
        _ => anyhow::bail!("Invalid post URL format: {url}"),
    }
}

/// Fetch a post by its bsky.app URL and materialize it for evaluation.
pub async fn fetch_post(client: &PublicAtpClient, url: &str) -> Result<Post> {
    let (actor, rkey) = parse_post_url(url)?;

    let did = if actor.starts_with("did:") {
        actor
    } else {
        client.resolve_handle(&actor).await?
    };

    let at_uri = format!("at://{did}/app.bsky.feed.post/{rkey}");
    let output: get_posts::Output = client
        .xrpc_get("app.bsky.feed.getPosts", &[("uris", &at_uri)])
        .await
        .with_context(|| format!("Failed to fetch post {at_uri}"))?;

    let post_view = output
        .posts
        .first()
        .with_context(|| format!("Post not found: {at_uri}"))?;

    // Decode the untyped IPLD record into the typed post::Record. The full
    // text is required for keyword analysis, so failure here fails the post.
    let record = atrium_api::app::bsky::feed::post::Record::try_from_unknown(
        post_view.record.clone(),
    )
    .map_err(|e| anyhow::anyhow!("Failed to decode record of {at_uri}: {e}"))?;

    let text = record.data.text.clone();
    let facet_links = facet_link_uris(record.data.facets.as_deref());
    let embed = embed_kind(post_view.embed.as_ref());

    debug!(
        uri = %at_uri,
        facet_links = facet_links.len(),
        embed = ?embed,
        "Materializing post content"
    );

    let (embed_link, images) = match embed {
        EmbedKind::LinkPreview(uri) => (Some(uri), Vec::new()),
        EmbedKind::ImageSet(image_urls) => (None, fetch_images(client, &image_urls).await),
        EmbedKind::None => (None, Vec::new()),
    };

    Ok(Post::new(
        at_uri,
        post_view.author.did.as_str().to_string(),
        text,
        facet_links,
        embed_link,
        images,
    ))
}

/// Extract link URIs from rich-text facets.
fn facet_link_uris(
    facets: Option<&[atrium_api::app::bsky::richtext::facet::Main]>,
) -> Vec<String> {
    let mut links = Vec::new();
    for facet in facets.unwrap_or_default() {
        for feature in &facet.features {
            if let Union::Refs(MainFeaturesItem::Link(link)) = feature {
                links.push(link.uri.clone());
            }
        }
    }
    links
}

/// Map a post view embed to the closed EmbedKind set.
fn embed_kind(embed: Option<&Union<PostViewEmbedRefs>>) -> EmbedKind {
    match embed {
        Some(Union::Refs(PostViewEmbedRefs::AppBskyEmbedExternalView(view))) => {
            EmbedKind::LinkPreview(view.external.uri.clone())
        }
        Some(Union::Refs(PostViewEmbedRefs::AppBskyEmbedImagesView(view))) => EmbedKind::ImageSet(
            view.images.iter().map(|img| img.fullsize.clone()).collect(),
        ),
        _ => EmbedKind::None,
    }
}

/// Download embedded images concurrently. A failed download is dropped with
/// a warning; one bad image must not abort evaluation of the post.
async fn fetch_images(client: &PublicAtpClient, urls: &[String]) -> Vec<ImageContent> {
    let downloads = join_all(urls.iter().map(|url| client.fetch_bytes(url))).await;

    downloads
        .into_iter()
        .zip(urls)
        .filter_map(|(result, url)| match result {
            Ok(bytes) => Some(ImageContent::Bytes(bytes)),
            Err(e) => {
                warn!(url = url.as_str(), error = %e, "Skipping failed image download");
                None
            }
        })
        .collect()
}
