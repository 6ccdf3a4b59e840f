// Batch harness input: CSV rows of (post URL, expected labels) used to
// validate the labeler against a labeled set, plus timing statistics for
// the run summary.
//
// The expected-labels column holds a JSON array, so a row looks like:
//   https://bsky.app/profile/x/post/y,"[""t-and-s""]"
// Only that one column ever needs quoting, which keeps the parsing simple:
// split on the first comma, then unquote the remainder.

use std::collections::BTreeSet;

use anyhow::{Context, Result};

/// One labeled row from the batch CSV.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRow {
    pub url: String,
    pub expected: BTreeSet<String>,
}

/// Parse the batch CSV. A `URL,Labels` header row is skipped if present.
/// Malformed rows are an input error; a validation run with silently
/// dropped rows would report a misleading accuracy.
pub fn parse_batch_csv(raw: &str) -> Result<Vec<BatchRow>> {
    let mut rows = Vec::new();
    for (i, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if i == 0 && line.split(',').next() == Some("URL") {
            continue;
        }

        let (url, labels_field) = line
            .split_once(',')
            .with_context(|| format!("Row {} has no labels column: {line}", i + 1))?;

        let labels_json = unquote_csv_field(labels_field);
        let expected: Vec<String> = serde_json::from_str(&labels_json)
            .with_context(|| format!("Row {} has malformed expected labels: {labels_field}", i + 1))?;

        rows.push(BatchRow {
            url: url.trim().to_string(),
            expected: expected.into_iter().collect(),
        });
    }
    Ok(rows)
}

/// Strip one layer of CSV quoting: outer double quotes and doubled inner
/// quotes. Unquoted fields pass through unchanged.
fn unquote_csv_field(field: &str) -> String {
    let field = field.trim();
    match field.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => inner.replace("\"\"", "\""),
        None => field.to_string(),
    }
}

/// Per-post processing time summary for a batch run.
#[derive(Debug)]
pub struct TimingStats {
    pub avg_secs: f64,
    pub median_secs: f64,
    pub min_secs: f64,
    pub max_secs: f64,
}

impl TimingStats {
    /// Compute summary stats. Returns None for an empty run.
    pub fn from_secs(mut timings: Vec<f64>) -> Option<Self> {
        if timings.is_empty() {
            return None;
        }
        timings.sort_by(|a, b| a.total_cmp(b));

        let sum: f64 = timings.iter().sum();
        let mid = timings.len() / 2;
        let median = if timings.len() % 2 == 0 {
            (timings[mid - 1] + timings[mid]) / 2.0
        } else {
            timings[mid]
        };

        Some(Self {
            avg_secs: sum / timings.len() as f64,
            median_secs: median,
            min_secs: timings[0],
            max_secs: timings[timings.len() - 1],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_header() {
        let csv = "URL,Labels\n\
                   https://bsky.app/profile/a/post/1,\"[\"\"t-and-s\"\"]\"\n\
                   https://bsky.app/profile/b/post/2,[]\n";
        let rows = parse_batch_csv(csv).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://bsky.app/profile/a/post/1");
        assert_eq!(rows[0].expected, BTreeSet::from(["t-and-s".to_string()]));
        assert!(rows[1].expected.is_empty());
    }

    #[test]
    fn parses_multi_label_row() {
        let csv = "https://bsky.app/profile/a/post/1,\"[\"\"cnn\"\", \"\"reuters\"\"]\"";
        let rows = parse_batch_csv(csv).unwrap();
        assert_eq!(
            rows[0].expected,
            BTreeSet::from(["cnn".to_string(), "reuters".to_string()])
        );
    }

    #[test]
    fn rejects_row_without_labels_column() {
        assert!(parse_batch_csv("https://bsky.app/profile/a/post/1").is_err());
    }

    #[test]
    fn rejects_malformed_labels_json() {
        assert!(parse_batch_csv("https://x/post/1,\"not json\"").is_err());
    }

    #[test]
    fn timing_stats_even_count() {
        let stats = TimingStats::from_secs(vec![4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!((stats.avg_secs - 2.5).abs() < 1e-9);
        assert!((stats.median_secs - 2.5).abs() < 1e-9);
        assert_eq!(stats.min_secs, 1.0);
        assert_eq!(stats.max_secs, 4.0);
    }

    #[test]
    fn timing_stats_empty_is_none() {
        assert!(TimingStats::from_secs(Vec::new()).is_none());
    }
}
