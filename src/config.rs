use std::env;
use std::path::PathBuf;

use anyhow::Result;

use crate::phash::DEFAULT_HAMMING_THRESHOLD;

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Rule data
/// itself lives in the input directory; reloading rules requires a restart.
pub struct Config {
    /// Directory containing the lexicon CSVs and reference images
    pub input_dir: PathBuf,
    /// Public AT Protocol API endpoint (defaults to https://public.api.bsky.app).
    /// All reads go through the public API; no auth needed.
    pub public_api_url: String,
    /// Maximum Hamming distance for an image-similarity match
    pub hamming_threshold: u32,
}

impl Config {
    /// Load configuration from environment variables. A malformed threshold
    /// is a configuration error and fails fast.
    pub fn load() -> Result<Self> {
        let hamming_threshold = match env::var("BRINDLE_HAMMING_THRESHOLD") {
            Ok(raw) => raw.parse().map_err(|_| {
                anyhow::anyhow!(
                    "BRINDLE_HAMMING_THRESHOLD must be a non-negative integer, got '{raw}'"
                )
            })?,
            Err(_) => DEFAULT_HAMMING_THRESHOLD,
        };

        Ok(Self {
            input_dir: env::var("BRINDLE_INPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./labeler-inputs")),
            public_api_url: env::var("PUBLIC_API_URL")
                .unwrap_or_else(|_| crate::bluesky::client::DEFAULT_PUBLIC_API_URL.to_string()),
            hamming_threshold,
        })
    }

    /// Check that the input directory exists before trying to load rules.
    pub fn require_input_dir(&self) -> Result<()> {
        if !self.input_dir.is_dir() {
            anyhow::bail!(
                "Input directory not found: {}\n\
                 Set BRINDLE_INPUT_DIR in your .env file or place the\n\
                 labeler-inputs directory next to the binary.",
                self.input_dir.display()
            );
        }
        Ok(())
    }
}
