// Post model: the normalized representation the detectors operate on.
//
// A Post is immutable once constructed for a given evaluation. URL candidates
// come from three independent producers (rich-text link facets, the external
// link embed, and a regex scan of the raw text) whose outputs are unioned and
// deduplicated; no producer takes priority over another.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::phash::Fingerprint;

/// Embedded image content, either raw bytes fetched by the adapter or a
/// fingerprint computed upstream.
#[derive(Debug, Clone)]
pub enum ImageContent {
    Bytes(Vec<u8>),
    Fingerprint(Fingerprint),
}

/// A post ready for policy evaluation.
#[derive(Debug, Clone)]
pub struct Post {
    /// AT URI of the post record
    pub uri: String,
    /// DID of the author
    pub author: String,
    /// Raw post text
    pub text: String,
    /// Extracted URL candidates, discovery order, deduplicated
    pub urls: Vec<String>,
    /// Embedded images (already materialized; the core never fetches)
    pub images: Vec<ImageContent>,
}

impl Post {
    /// Construct a post, collecting URL candidates from the given facet
    /// links and embed link plus a scan of the text itself.
    pub fn new(
        uri: String,
        author: String,
        text: String,
        facet_links: Vec<String>,
        embed_link: Option<String>,
        images: Vec<ImageContent>,
    ) -> Self {
        let urls = collect_urls(&facet_links, embed_link.as_deref(), &text);
        Self {
            uri,
            author,
            text,
            urls,
            images,
        }
    }
}

/// Scan raw text for http/https URLs.
pub fn scan_text_urls(text: &str) -> Vec<String> {
    static URL_SCAN: OnceLock<Regex> = OnceLock::new();
    let re = URL_SCAN.get_or_init(|| {
        Regex::new(r"https?://[^\s/$.?#].[^\s]*").expect("URL scan pattern is valid")
    });
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Union the three URL producers and deduplicate.
///
/// Candidates keep discovery order (facets, then embed, then text scan);
/// the dedup key is the trimmed URL string, so the same link surfaced by
/// multiple producers appears once.
pub fn collect_urls(facet_links: &[String], embed_link: Option<&str>, text: &str) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut urls = Vec::new();

    let candidates = facet_links
        .iter()
        .map(String::as_str)
        .chain(embed_link)
        .map(str::to_string)
        .chain(scan_text_urls(text));

    for candidate in candidates {
        let trimmed = candidate.trim().to_string();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.clone()) {
            urls.push(trimmed);
        }
    }
    urls
}
