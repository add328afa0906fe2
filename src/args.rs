use clap::Parser;
use std::path::PathBuf;

use crate::stats::DEFAULT_TOP_N;

#[derive(Parser, Debug)]
#[command(
    name = "serptrack",
    about = "Summarize SEO scores and keyword rankings of tracked sites",
    version,
    long_about = None
)]
pub struct Args {
    /// Path to a JSON file of tracked sites
    #[arg(short, long)]
    pub sites: Option<PathBuf>,

    /// Number of entries in each top list
    #[arg(short, long, default_value_t = DEFAULT_TOP_N)]
    pub top: usize,

    /// Show keyword rankings for a single site
    #[arg(short, long)]
    pub url: Option<String>,

    /// Print the report as JSON instead of text
    #[arg(long)]
    pub json: bool,

    /// Write a JSON report into this directory
    #[arg(short, long)]
    pub report: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Redact site hosts for privacy
    #[arg(long)]
    pub redact: bool,

    /// Initialize sites.json with sample data
    #[arg(long)]
    pub init: bool,
}
