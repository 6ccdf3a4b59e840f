// Pattern bank: compiled regexes for structured financial signals.
//
// Each pattern carries a strength tag. Strong patterns (crypto addresses,
// payment handles) are decisive on their own; combinable patterns only count
// alongside another signal. Compiled regexes are stateless and reentrant, so
// one bank can be shared across concurrently evaluated posts.
//
// Precision matters more than recall here: every pattern is anchored tightly
// enough to reject incidental substrings. The cashtag pattern in particular
// must not fire on a plain dollar amount like "$50".

use anyhow::{Context, Result};
use regex_lite::Regex;

/// How much weight a pattern match carries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    /// A single match is sufficient to fire the signal.
    Strong,
    /// Only meaningful in combination with another detector.
    Combinable,
}

/// A named, compiled regular expression with a strength classification.
#[derive(Debug)]
pub struct Pattern {
    pub name: &'static str,
    pub strength: Strength,
    regex: Regex,
}

impl Pattern {
    pub fn new(name: &'static str, strength: Strength, expr: &str) -> Result<Self> {
        let regex = Regex::new(expr)
            .with_context(|| format!("Invalid pattern definition '{name}'"))?;
        Ok(Self {
            name,
            strength,
            regex,
        })
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// An ordered bank of compiled patterns.
#[derive(Debug)]
pub struct PatternBank {
    patterns: Vec<Pattern>,
}

impl PatternBank {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self { patterns }
    }

    /// The standard financial-solicitation bank: cryptocurrency address
    /// formats for the major chains plus payment-platform handle and
    /// profile-URL formats. Compilation failure is a startup error.
    pub fn standard() -> Result<Self> {
        let patterns = vec![
            // Bitcoin P2PKH/P2SH (base58, leading 1 or 3)
            Pattern::new(
                "btc-address",
                Strength::Strong,
                r"\b[13][a-km-zA-HJ-NP-Z1-9]{25,34}\b",
            )?,
            // Bitcoin bech32 (bc1...)
            Pattern::new(
                "btc-bech32",
                Strength::Strong,
                r"(?i)\bbc1[ac-hj-np-z02-9]{25,87}\b",
            )?,
            // Ethereum (0x + 40 hex digits)
            Pattern::new("eth-address", Strength::Strong, r"\b0x[a-fA-F0-9]{40}\b")?,
            // Dollar-prefixed cashtag. The first character after '$' must be
            // a letter so bare amounts ("$50") never match.
            Pattern::new(
                "cashtag",
                Strength::Strong,
                r"(?:^|\s)\$[A-Za-z][A-Za-z0-9_]+",
            )?,
            // "cash app: $handle" / "cashapp @handle" in free text. A ':' or
            // '@' separator is required: a bare "cash app" mention followed
            // by an ordinary word must not look like a handle.
            Pattern::new(
                "cashapp-handle",
                Strength::Strong,
                r"(?i)cash\s?app\s*[:@]\s*\$?[a-zA-Z0-9_-]+",
            )?,
            Pattern::new(
                "paypal-me",
                Strength::Strong,
                r"(?i)paypal\.me/[a-zA-Z0-9_.-]+",
            )?,
            Pattern::new("ko-fi", Strength::Strong, r"(?i)ko-fi\.com/[a-zA-Z0-9_.-]+")?,
            Pattern::new(
                "venmo-handle",
                Strength::Strong,
                r"(?i)venmo\s*[:@]\s*\$?[a-zA-Z0-9_-]+",
            )?,
            Pattern::new(
                "venmo-link",
                Strength::Strong,
                r"(?i)venmo\.com/u/[a-zA-Z0-9_-]+",
            )?,
        ];
        Ok(Self::new(patterns))
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// True if any Strong pattern matches the text. A single strong match is
    /// decisive regardless of other context.
    pub fn find_strong_signal(&self, text: &str) -> bool {
        self.patterns
            .iter()
            .filter(|p| p.strength == Strength::Strong)
            .any(|p| p.is_match(text))
    }

    /// Names of all matching patterns, in bank order. Used for the `rules`
    /// inspection output and debug logging.
    pub fn matching_names(&self, text: &str) -> Vec<&'static str> {
        self.patterns
            .iter()
            .filter(|p| p.is_match(text))
            .map(|p| p.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank() -> PatternBank {
        PatternBank::standard().unwrap()
    }

    #[test]
    fn btc_address_fires() {
        assert!(bank().find_strong_signal("send to 1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa thanks"));
    }

    #[test]
    fn eth_address_fires() {
        assert!(bank().find_strong_signal(
            "my wallet 0x52908400098527886E0F7030069857D2E4169EE7"
        ));
    }

    #[test]
    fn bech32_address_fires() {
        assert!(bank().find_strong_signal("bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq"));
    }

    #[test]
    fn cashtag_fires() {
        assert!(bank().find_strong_signal("$myCashtag"));
        assert!(bank().find_strong_signal("tip me at $myCashtag please"));
    }

    #[test]
    fn dollar_amount_does_not_fire() {
        assert!(!bank().find_strong_signal("I have $50 left this month"));
    }

    #[test]
    fn paypal_and_kofi_fire() {
        assert!(bank().find_strong_signal("paypal.me/someone"));
        assert!(bank().find_strong_signal("support me: Ko-Fi.com/artist_1"));
    }

    #[test]
    fn venmo_formats_fire() {
        assert!(bank().find_strong_signal("venmo: $handle-1"));
        assert!(bank().find_strong_signal("https://venmo.com/u/somebody"));
    }

    #[test]
    fn plain_text_does_not_fire() {
        assert!(!bank().find_strong_signal("just talking about the weather today"));
    }

    #[test]
    fn combinable_patterns_do_not_count_as_strong() {
        let bank = PatternBank::new(vec![Pattern::new(
            "hashtag-help",
            Strength::Combinable,
            r"(?i)#donationswelcome",
        )
        .unwrap()]);
        assert!(!bank.find_strong_signal("#DonationsWelcome"));
        assert_eq!(bank.matching_names("#DonationsWelcome"), vec!["hashtag-help"]);
    }
}
