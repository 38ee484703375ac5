//! Prepare command implementation (merge one instances/labels pair)

use crate::cli::logging::log;
use crate::cli::{LogLevel, PrepareArgs};
use crate::data::{merge_data, FillerMarkers};
use crate::features::{attach_perplexity, PerplexityTable};

pub fn run_prepare(args: PrepareArgs, level: LogLevel) -> Result<(), String> {
    let markers = match &args.markers {
        Some(pair) => Some(
            FillerMarkers::new(pair[0].clone(), pair[1].clone())
                .map_err(|e| format!("Invalid markers: {e}"))?,
        ),
        None => None,
    };

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Merging {} + {}...",
            args.instances.display(),
            args.labels.display()
        ),
    );

    let mut table = merge_data(&args.instances, &args.labels, args.context, markers.as_ref())
        .map_err(|e| format!("Merge failed: {e}"))?;

    if let Some(perplexity_path) = &args.perplexity {
        let perplexities = PerplexityTable::load(perplexity_path)
            .map_err(|e| format!("Failed to load perplexity file: {e}"))?;
        attach_perplexity(&mut table, &perplexities, args.rank)
            .map_err(|e| format!("Feature attachment failed: {e}"))?;
    }

    if let Some(parent) = args.output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create output dir: {e}"))?;
        }
    }
    table
        .write_csv(&args.output)
        .map_err(|e| format!("Failed to write output: {e}"))?;

    let stats = table.stats();
    log(
        level,
        LogLevel::Normal,
        &format!("✓ {} instances written to {}", stats.instances, args.output.display()),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Labels: {} implausible, {} neutral, {} plausible",
            stats.class_counts[0], stats.class_counts[1], stats.class_counts[2],
        ),
    );
    if let Some(feature) = &table.feature {
        log(
            level,
            LogLevel::Verbose,
            &format!("  Feature column: {}", feature.name),
        );
    }

    Ok(())
}
