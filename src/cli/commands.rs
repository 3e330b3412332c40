//! CLI commands and argument parsing

use crate::types::{FeedKind, PagingMode};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Browse paginated photo feeds from the command line
#[derive(Parser, Debug)]
#[command(name = "photo-feed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh a feed and keep loading pages
    Browse {
        /// Feed to browse (new, featured)
        #[arg(long)]
        feed: Option<FeedKind>,

        /// Paging mode (sequential, random)
        #[arg(long)]
        mode: Option<PagingMode>,

        /// Server sort key for sequential paging
        #[arg(long)]
        order: Option<String>,

        /// Stop after this many pages
        #[arg(long, default_value = "3")]
        pages: u32,
    },

    /// Print a random page sequence for a feed
    Pages {
        /// Feed to sample (new, featured)
        #[arg(long)]
        feed: Option<FeedKind>,

        /// Seed for a reproducible sequence
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one message per line)
    Json,
    /// Human-readable output
    Pretty,
}
