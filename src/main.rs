use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use brindle::batch::TimingStats;
use brindle::bluesky::source::{BlueskySource, ContentSource};
use brindle::config::Config;
use brindle::output::{self, BatchMismatch};
use brindle::policy::{LabelDecision, PolicySet};
use brindle::rules::Rules;

/// Brindle: automated moderation labeler for Bluesky.
///
/// Classifies posts against a set of moderation policies (keyword lexicons,
/// news domain citations, reference image similarity, and financial
/// solicitation patterns) and reports the labels each post earns.
#[derive(Parser)]
#[command(name = "brindle", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Moderate a single post and print the labels it earns
    Moderate {
        /// The bsky.app URL of the post
        url: String,
    },

    /// Run the labeler over a CSV of posts with expected labels
    Batch {
        /// CSV file with URL and Labels (JSON array) columns
        csv: String,
    },

    /// Show a summary of the loaded rule set
    Rules,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brindle=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moderate { url } => {
            let policies = load_policies()?;
            let source = open_source()?;

            println!("Fetching post...");
            let post = source.fetch_post(&url).await?;

            let per_policy = policies.evaluate_each(&post);
            output::display_decision(&post.uri, &post.text, &per_policy);
        }

        Commands::Batch { csv } => {
            let policies = load_policies()?;
            let source = open_source()?;

            let raw = std::fs::read_to_string(&csv)
                .with_context(|| format!("Failed to read batch file {csv}"))?;
            let rows = brindle::batch::parse_batch_csv(&raw)?;
            info!(rows = rows.len(), "Starting batch moderation run");

            let bar = ProgressBar::new(rows.len() as u64).with_style(
                ProgressStyle::with_template("  [{bar:30}] {pos}/{len} {msg}")
                    .expect("progress template is valid"),
            );

            let mut correct = 0usize;
            let mut mismatches: Vec<BatchMismatch> = Vec::new();
            let mut timings = Vec::with_capacity(rows.len());

            for row in &rows {
                let start = Instant::now();
                // A post-level fetch failure yields an empty decision rather
                // than aborting the run; the post simply receives no label.
                let decision: LabelDecision = match source.fetch_post(&row.url).await {
                    Ok(post) => policies.evaluate(&post),
                    Err(e) => {
                        warn!(url = row.url.as_str(), error = %e, "Failed to fetch post");
                        LabelDecision::new()
                    }
                };
                timings.push(start.elapsed().as_secs_f64());

                if decision == row.expected {
                    correct += 1;
                } else {
                    mismatches.push(BatchMismatch {
                        url: row.url.clone(),
                        produced: decision,
                        expected: row.expected.clone(),
                    });
                }
                bar.inc(1);
            }
            bar.finish_and_clear();

            output::display_batch_summary(
                correct,
                rows.len(),
                &mismatches,
                TimingStats::from_secs(timings).as_ref(),
            );
        }

        Commands::Rules => {
            let config = Config::load()?;
            config.require_input_dir()?;
            let rules = Rules::load(&config.input_dir, config.hamming_threshold)?;
            output::display_rule_summary(&rules);
            println!("\n{}", "Rules loaded cleanly.".green());
        }
    }

    Ok(())
}

/// Load the rule set and build the standard policy lineup.
/// Any missing or malformed rule file is fatal here, before network work.
fn load_policies() -> Result<PolicySet> {
    let config = Config::load()?;
    config.require_input_dir()?;
    let rules = Arc::new(Rules::load(&config.input_dir, config.hamming_threshold)?);
    Ok(PolicySet::standard(rules))
}

/// Build the live content source from configuration.
fn open_source() -> Result<BlueskySource> {
    let config = Config::load()?;
    BlueskySource::new(&config.public_api_url)
}
