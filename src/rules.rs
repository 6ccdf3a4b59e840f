// Rules: the immutable moderation configuration, built once at startup.
//
// Everything a policy needs lives here: keyword lexicons, the news domain
// map, the compiled pattern bank, and the reference image index. Loading
// fails fast on any missing or malformed input; the labeler must not run
// with partial moderation data. After construction the whole object is
// read-only and shared by Arc across policies and worker tasks.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::lexicon::{DomainMap, Lexicon};
use crate::patterns::PatternBank;
use crate::phash::HashIndex;

pub struct Rules {
    /// Trust & Safety keyword list
    pub ts_words: Lexicon,
    /// Trust & Safety domain list (matched as substrings of post text)
    pub ts_domains: Lexicon,
    /// News domain -> canonical outlet label
    pub news_domains: DomainMap,
    /// Payment-platform terms (co-occurrence subject)
    pub payment_keywords: Lexicon,
    /// Cryptocurrency terms (co-occurrence subject)
    pub crypto_keywords: Lexicon,
    /// Solicitation verbs and phrases (co-occurrence requirement)
    pub call_to_action: Lexicon,
    /// Structured financial patterns
    pub patterns: PatternBank,
    /// Reference image fingerprints
    pub reference_images: HashIndex,
    /// Maximum Hamming distance for an image match
    pub hamming_threshold: u32,
}

impl Rules {
    /// Load the full rule set from the input directory.
    ///
    /// Expected layout (same as the labeler-inputs bundle):
    ///   t-and-s-words.csv, t-and-s-domains.csv, news-domains.csv,
    ///   payment-app-keywords.csv, crypto-keywords.csv,
    ///   call-to-action-keywords.csv, dog-list-images/
    pub fn load(input_dir: &Path, hamming_threshold: u32) -> Result<Self> {
        let rules = Self {
            ts_words: Lexicon::load(&input_dir.join("t-and-s-words.csv"), "t-and-s-words")?,
            ts_domains: Lexicon::load(&input_dir.join("t-and-s-domains.csv"), "t-and-s-domains")?,
            news_domains: DomainMap::load(&input_dir.join("news-domains.csv"))?,
            payment_keywords: Lexicon::load(
                &input_dir.join("payment-app-keywords.csv"),
                "payment-app-keywords",
            )?,
            crypto_keywords: Lexicon::load(
                &input_dir.join("crypto-keywords.csv"),
                "crypto-keywords",
            )?,
            call_to_action: Lexicon::load(
                &input_dir.join("call-to-action-keywords.csv"),
                "call-to-action-keywords",
            )?,
            patterns: PatternBank::standard().context("Failed to compile pattern bank")?,
            reference_images: HashIndex::load_dir(&input_dir.join("dog-list-images"), "dog")?,
            hamming_threshold,
        };

        info!(
            ts_words = rules.ts_words.len(),
            ts_domains = rules.ts_domains.len(),
            news_domains = rules.news_domains.len(),
            payment_keywords = rules.payment_keywords.len(),
            crypto_keywords = rules.crypto_keywords.len(),
            call_to_action = rules.call_to_action.len(),
            patterns = rules.patterns.len(),
            reference_images = rules.reference_images.len(),
            "Moderation rules loaded"
        );
        Ok(rules)
    }
}
