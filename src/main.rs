//! Repomap CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "repomap")]
#[command(about = "Token-budget-aware repository map builder", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Repository root path (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    root: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and print the repo map within a token budget
    Map {
        /// Maximum number of tokens the rendered map may occupy
        #[arg(short, long, default_value = "1024")]
        tokens: usize,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the raw ranked tag list
    Tags {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },
    /// Show version
    Version,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for commands::Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => commands::Format::Text,
            OutputFormat::Json => commands::Format::Json,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(format!("repomap={log_level}")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("repomap v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("repository root: {}", cli.root.display());

    match cli.command {
        Commands::Map { tokens, format } => commands::map(cli.root, tokens, format.into()),
        Commands::Tags { format } => commands::tags(cli.root, format.into()),
        Commands::Version => {
            println!("repomap v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
