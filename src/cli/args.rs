//! CLI argument types.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relleno: cloze filler plausibility pipeline
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "relleno")]
#[command(version)]
#[command(about = "Cloze filler plausibility data pipeline and classifier fine-tuning harness")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Merge one instances/labels pair into a labeled CSV
    Prepare(PrepareArgs),

    /// Run the full pipeline from a YAML spec
    Train(TrainArgs),

    /// Validate a YAML spec without running
    Validate(ValidateArgs),

    /// Display spec and corpus statistics
    Info(InfoArgs),
}

/// Arguments for the prepare command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PrepareArgs {
    /// Tab-separated instance file
    #[arg(long)]
    pub instances: PathBuf,

    /// Tab-separated label file
    #[arg(long)]
    pub labels: PathBuf,

    /// Output CSV path
    #[arg(short, long)]
    pub output: PathBuf,

    /// Wrap instance texts in document context
    #[arg(long)]
    pub context: bool,

    /// Start and end markers for the filler span
    #[arg(long, num_args = 2, value_names = ["START", "END"])]
    pub markers: Option<Vec<String>>,

    /// Tab-separated per-instance perplexity file
    #[arg(long)]
    pub perplexity: Option<PathBuf>,

    /// Attach perplexity rank instead of the raw value
    #[arg(long)]
    pub rank: bool,
}

/// Arguments for the train command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct TrainArgs {
    /// Path to YAML pipeline spec
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ValidateArgs {
    /// Path to YAML pipeline spec
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Path to YAML pipeline spec
    #[arg(value_name = "SPEC")]
    pub spec: PathBuf,
}
