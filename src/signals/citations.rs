// Domain citation detector: maps a post's URL candidates to the canonical
// labels of known news outlets.

use std::collections::BTreeSet;

use crate::lexicon::DomainMap;

/// The set of outlet labels cited by the given URL candidates.
///
/// Each candidate is normalized to its domain and looked up in the map.
/// Malformed URLs are skipped; they never abort detection for the rest.
/// Output is deduplicated; discovery order is irrelevant.
pub fn cited_outlets(urls: &[String], domains: &DomainMap) -> BTreeSet<String> {
    urls.iter()
        .filter_map(|url| domains.lookup(url))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn news() -> DomainMap {
        DomainMap::new(vec![
            ("cnn.com".to_string(), "cnn".to_string()),
            ("reuters.com".to_string(), "reuters".to_string()),
        ])
    }

    #[test]
    fn matches_known_outlets() {
        let urls = vec![
            "https://www.cnn.com/2024/story".to_string(),
            "https://reuters.com/article/x".to_string(),
        ];
        let outlets = cited_outlets(&urls, &news());
        assert_eq!(
            outlets,
            BTreeSet::from(["cnn".to_string(), "reuters".to_string()])
        );
    }

    #[test]
    fn duplicate_citations_collapse() {
        let urls = vec![
            "https://cnn.com/a".to_string(),
            "https://www.CNN.com/b".to_string(),
        ];
        assert_eq!(cited_outlets(&urls, &news()).len(), 1);
    }

    #[test]
    fn malformed_and_unknown_urls_are_skipped() {
        let urls = vec![
            "mailto:tips@cnn.com".to_string(),
            "https://example.com/".to_string(),
            "https://reuters.com/x".to_string(),
        ];
        let outlets = cited_outlets(&urls, &news());
        assert_eq!(outlets, BTreeSet::from(["reuters".to_string()]));
    }

    #[test]
    fn no_urls_means_empty_set() {
        assert!(cited_outlets(&[], &news()).is_empty());
    }
}
