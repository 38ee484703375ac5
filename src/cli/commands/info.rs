//! Info command implementation (spec and corpus statistics)

use crate::cli::logging::log;
use crate::cli::{InfoArgs, LogLevel};
use crate::config::{load_spec, PipelineSpec};
use crate::data::{merge_data, MergeStats};

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_spec(&args.spec).map_err(|e| e.to_string())?;

    log(level, LogLevel::Normal, "Data:");
    log(level, LogLevel::Normal, &format_data_info(&spec));
    log(level, LogLevel::Normal, "Training:");
    log(level, LogLevel::Normal, &format_training_info(&spec));

    // Corpus statistics require the data files; skip quietly when absent.
    for (name, instances, labels) in [
        ("train", &spec.data.train_instances, &spec.data.train_labels),
        ("dev", &spec.data.dev_instances, &spec.data.dev_labels),
    ] {
        if !instances.exists() || !labels.exists() {
            continue;
        }
        let markers = spec
            .data
            .markers()
            .map_err(|e| format!("Invalid markers: {e}"))?;
        let table = merge_data(instances, labels, spec.data.use_context, markers.as_ref())
            .map_err(|e| format!("Merge failed for {}: {e}", instances.display()))?;

        log(level, LogLevel::Normal, &format!("Corpus ({name}):"));
        log(level, LogLevel::Normal, &format_stats(&table.stats()));
    }

    Ok(())
}

/// Format data configuration as a string
fn format_data_info(spec: &PipelineSpec) -> String {
    let mut lines = vec![
        format!("  Train instances: {}", spec.data.train_instances.display()),
        format!("  Train labels: {}", spec.data.train_labels.display()),
        format!("  Dev instances: {}", spec.data.dev_instances.display()),
        format!("  Dev labels: {}", spec.data.dev_labels.display()),
        format!("  Use context: {}", spec.data.use_context),
    ];
    if let Some((start, end)) = &spec.data.filler_markers {
        lines.push(format!("  Filler markers: {start} {end}"));
    }
    if let Some(perplexity) = &spec.data.perplexity {
        lines.push(format!(
            "  Perplexity: {} (as {})",
            perplexity.display(),
            if spec.data.use_rank { "rank" } else { "raw value" },
        ));
    }
    lines.join("\n")
}

/// Format training configuration as a string
fn format_training_info(spec: &PipelineSpec) -> String {
    [
        format!("  Epochs: {}", spec.training.epochs),
        format!("  Batch size: {}", spec.training.batch_size),
        format!("  Seed: {}", spec.training.seed),
        format!("  Max sequence length: {}", spec.tokenizer.max_seq_len),
        format!("  Output dir: {}", spec.output_dir.display()),
    ]
    .join("\n")
}

/// Format corpus statistics as a string
fn format_stats(stats: &MergeStats) -> String {
    [
        format!("  Instances: {}", stats.instances),
        format!(
            "  Labels: {} implausible, {} neutral, {} plausible",
            stats.class_counts[0], stats.class_counts[1], stats.class_counts[2],
        ),
        format!("  Avg text length: {} chars", stats.avg_text_len),
    ]
    .join("\n")
}
