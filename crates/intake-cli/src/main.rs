//! Intake - submission message tooling
//!
//! Classifies raw transport payloads, parses them into typed submissions and
//! builds URL submission messages for publication.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use intake_core::config::{IntakeConfig, PrefixPolicy};
use std::process;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod input;

use commands::CommandContext;

#[derive(Parser)]
#[command(name = "intake")]
#[command(version = intake_core::VERSION)]
#[command(about = "Classify, parse and build content submission messages", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, env = "INTAKE_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "INTAKE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Report which message family a payload belongs to
    Classify {
        /// Payload file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,
    },

    /// Parse a payload into its typed submission
    Parse {
        /// Payload file, or `-` for stdin
        #[arg(default_value = "-")]
        input: String,

        /// Storage key prefix stripped to derive content ids
        #[arg(long, env = "INTAKE_STORAGE_PREFIX")]
        prefix: Option<String>,

        /// Handling of keys outside the prefix (reject, skip_record, keep_full_key)
        #[arg(long)]
        prefix_policy: Option<PrefixPolicy>,
    },

    /// Build a URL submission message
    Submit {
        /// Content type name; guessed from the URL when omitted
        #[arg(short = 't', long)]
        content_type: Option<String>,

        /// Caller-assigned content id
        #[arg(short = 'i', long)]
        content_id: String,

        /// Location of the content
        #[arg(short, long)]
        url: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn main() {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => IntakeConfig::from_file(path)?,
        None => IntakeConfig::from_env()?,
    };

    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    init_logging(&config);

    let ctx = CommandContext {
        config,
        output_format: cli.output,
    };

    match cli.command {
        Commands::Classify { input } => commands::classify::execute(&ctx, &input),
        Commands::Parse {
            input,
            prefix,
            prefix_policy,
        } => commands::parse::execute(&ctx, &input, prefix, prefix_policy),
        Commands::Submit {
            content_type,
            content_id,
            url,
        } => commands::submit::execute(&ctx, content_type.as_deref(), &content_id, &url),
    }
}

fn init_logging(config: &IntakeConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // Logs go to stderr so command output stays machine-readable
    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(filter)
            .init();
    }
}
