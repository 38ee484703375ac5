//! Relleno CLI
//!
//! Single-command entry point for the relleno data pipeline.
//!
//! # Usage
//!
//! ```bash
//! # Merge one instances/labels pair into a labeled CSV
//! relleno prepare --instances train_data.tsv --labels train_labels.tsv -o train.csv
//!
//! # Run the full pipeline from a YAML spec
//! relleno train pipeline.yaml
//!
//! # Validate a spec without running
//! relleno validate pipeline.yaml
//!
//! # Show spec and corpus statistics
//! relleno info pipeline.yaml
//! ```

use clap::Parser;
use relleno::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
