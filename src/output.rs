// Output formatting: terminal display of label decisions, rule summaries,
// and batch run results.

use colored::Colorize;

use crate::batch::TimingStats;
use crate::policy::LabelDecision;
use crate::rules::Rules;

/// Truncate a string to at most `max_chars` characters, appending "..." if
/// truncated. Respects UTF-8 character boundaries, so it never panics on
/// multi-byte characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Render a label set inline: `(none)` for empty decisions.
pub fn format_labels(decision: &LabelDecision) -> String {
    if decision.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        decision
            .iter()
            .map(|label| label.bright_yellow().bold().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Show one post's moderation outcome with the per-policy breakdown.
pub fn display_decision(uri: &str, text: &str, per_policy: &[(&'static str, LabelDecision)]) {
    println!("\n{}", "=== Moderation Decision ===".bold());
    println!("  Post: {uri}");
    println!("  Text: \"{}\"", truncate_chars(text, 120).dimmed());
    println!();

    for (name, decision) in per_policy {
        println!("  {:<24} {}", name, format_labels(decision));
    }

    let combined: LabelDecision = per_policy
        .iter()
        .flat_map(|(_, d)| d.iter().cloned())
        .collect();
    println!("\n  Labels to apply: {}", format_labels(&combined));
}

/// Show the loaded rule counts so a misconfigured input directory is easy
/// to spot before a run.
pub fn display_rule_summary(rules: &Rules) {
    println!("\n{}", "=== Loaded Moderation Rules ===".bold());
    println!("  T&S words:              {}", rules.ts_words.len());
    println!("  T&S domains:            {}", rules.ts_domains.len());
    println!("  News domains:           {}", rules.news_domains.len());
    println!("  Payment keywords:       {}", rules.payment_keywords.len());
    println!("  Crypto keywords:        {}", rules.crypto_keywords.len());
    println!("  Call-to-action phrases: {}", rules.call_to_action.len());
    println!("  Structured patterns:    {}", rules.patterns.len());
    println!("  Reference fingerprints: {}", rules.reference_images.len());
    println!("  Hamming threshold:      {}", rules.hamming_threshold);
}

/// One mismatch from a batch run: what the labeler produced vs expected.
pub struct BatchMismatch {
    pub url: String,
    pub produced: LabelDecision,
    pub expected: LabelDecision,
}

/// Show the accuracy and timing summary for a batch run.
pub fn display_batch_summary(
    correct: usize,
    total: usize,
    mismatches: &[BatchMismatch],
    timings: Option<&TimingStats>,
) {
    for m in mismatches {
        println!(
            "  {} {} produced {} expected {}",
            "✗".red(),
            m.url,
            format_labels(&m.produced),
            format_labels(&m.expected),
        );
    }

    println!("\n{}", "=== Batch Summary ===".bold());
    println!("  Correct label assignments: {correct} / {total}");
    let ratio = if total > 0 {
        correct as f64 / total as f64
    } else {
        0.0
    };
    let ratio_line = format!("  Accuracy: {:.2}", ratio);
    if ratio >= 0.9 {
        println!("{}", ratio_line.green());
    } else {
        println!("{}", ratio_line.yellow());
    }

    if let Some(stats) = timings {
        println!("\n{}", "--- Performance ---".bold());
        println!("  Average per post: {:.4}s", stats.avg_secs);
        println!("  Median per post:  {:.4}s", stats.median_secs);
        println!("  Min per post:     {:.4}s", stats.min_secs);
        println!("  Max per post:     {:.4}s", stats.max_secs);
    }
}
