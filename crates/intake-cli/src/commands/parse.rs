//! parse command - dispatch a payload and print the typed submission

use super::CommandContext;
use crate::input::read_payload;
use anyhow::{Context, Result};
use colored::Colorize;
use intake_core::config::{PrefixPolicy, StorageConfig};
use intake_dispatch::{Submission, SubmissionDispatcher};
use tracing::debug;

pub fn execute(
    ctx: &CommandContext,
    input: &str,
    prefix: Option<String>,
    prefix_policy: Option<PrefixPolicy>,
) -> Result<()> {
    let storage = storage_config(&ctx.config.storage, prefix, prefix_policy);
    debug!(
        "Parsing {} with prefix {:?} ({})",
        input, storage.prefix, storage.prefix_policy
    );

    let payload = read_payload(input)?;
    let submission = SubmissionDispatcher::new(&storage)
        .dispatch(&payload)
        .context("Failed to parse payload")?;

    if ctx.is_json() {
        println!("{}", serde_json::to_string_pretty(&submission)?);
    } else {
        print_text(&submission);
    }

    Ok(())
}

/// Command-line values take precedence over the loaded configuration
fn storage_config(
    base: &StorageConfig,
    prefix: Option<String>,
    prefix_policy: Option<PrefixPolicy>,
) -> StorageConfig {
    StorageConfig {
        prefix: prefix.unwrap_or_else(|| base.prefix.clone()),
        prefix_policy: prefix_policy.unwrap_or(base.prefix_policy),
    }
}

fn print_text(submission: &Submission) {
    match submission {
        Submission::Url(msg) => {
            println!("{}", "URL submission".blue().bold());
            println!("  {}: {}", "Content-Type".cyan(), msg.content_type);
            println!("  {}: {}", "Content-Id".cyan(), msg.content_id);
            println!("  {}: {}", "URL".cyan(), msg.url);
        }
        Submission::StorageBatch(parsed) => {
            println!(
                "{} ({} of {} records)",
                "Storage batch".blue().bold(),
                parsed.stats.accepted(),
                parsed.stats.total
            );
            for record in &parsed.batch.records {
                println!(
                    "  {}  s3://{}/{}",
                    record.content_id.green(),
                    record.bucket,
                    record.key
                );
            }
            if parsed.stats.skipped_empty > 0 {
                println!("  skipped {} empty objects", parsed.stats.skipped_empty);
            }
            if parsed.stats.skipped_foreign > 0 {
                println!(
                    "  skipped {} keys outside the prefix",
                    parsed.stats.skipped_foreign
                );
            }
        }
    }
}
