// Lexicon store: named keyword and domain sets loaded once at startup.
//
// All entries are normalized (lowercased, trimmed) at load time, and lookups
// normalize their input the same way, so matching is case- and
// format-insensitive. Lexicons are immutable after construction and safe to
// share across concurrently evaluated posts.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use url::Url;

/// A named set of normalized lowercase keywords or domains.
#[derive(Debug, Clone)]
pub struct Lexicon {
    name: String,
    entries: Vec<String>,
}

impl Lexicon {
    /// Build a lexicon from raw entries, normalizing each one.
    /// Empty entries are dropped.
    pub fn new(name: &str, entries: impl IntoIterator<Item = String>) -> Self {
        let entries: Vec<String> = entries
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self {
            name: name.to_string(),
            entries,
        }
    }

    /// Load a single-column CSV file: one keyword or phrase per row, first
    /// column only. Fails fast if the file is missing; the labeler must not
    /// run with partial moderation data.
    pub fn load(path: &Path, name: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let entries = raw
            .lines()
            .filter_map(|line| line.split(',').next())
            .map(|s| s.to_string());
        Ok(Self::new(name, entries))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Case-insensitive substring test: true if any entry of this lexicon
    /// occurs anywhere in `text`. Returns on the first match.
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.entries.iter().any(|entry| lower.contains(entry))
    }
}

/// Mapping from normalized news domain to its canonical outlet label
/// (e.g. "cnn.com" -> "cnn").
#[derive(Debug, Clone)]
pub struct DomainMap {
    map: HashMap<String, String>,
}

impl DomainMap {
    pub fn new(pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        let map = pairs
            .into_iter()
            .filter_map(|(domain, label)| {
                let domain = domain.trim().to_lowercase();
                let label = label.trim().to_string();
                if domain.is_empty() || label.is_empty() {
                    None
                } else {
                    Some((domain, label))
                }
            })
            .collect();
        Self { map }
    }

    /// Load a two-column CSV file: domain,label per row. Rows without both
    /// columns are skipped; a missing file is fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read domain map {}", path.display()))?;
        let pairs = raw.lines().filter_map(|line| {
            let mut fields = line.split(',');
            let domain = fields.next()?;
            let label = fields.next()?;
            Some((domain.to_string(), label.to_string()))
        });
        Ok(Self::new(pairs))
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Look up the canonical label for a URL or bare domain.
    pub fn lookup(&self, url: &str) -> Option<&str> {
        let domain = normalize_domain(url)?;
        self.map.get(&domain).map(String::as_str)
    }
}

/// Normalize a URL (or bare domain) to its lowercase host with any leading
/// "www." stripped. Scheme, path, and query are discarded.
///
/// Idempotent: feeding the output back in returns the same value, because a
/// bare domain is treated as its own host. Returns None for inputs with no
/// usable host (e.g. mailto: links); callers skip those candidates.
pub fn normalize_domain(url: &str) -> Option<String> {
    let host = match Url::parse(url) {
        Ok(parsed) => parsed.host_str()?.to_string(),
        // Not an absolute URL; treat everything up to the first path or
        // query separator as the host. This is the bare-domain case.
        Err(_) => {
            let candidate = url.split(['/', '?', '#']).next().unwrap_or("");
            candidate.to_string()
        }
    };

    let host = host.trim().to_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}
