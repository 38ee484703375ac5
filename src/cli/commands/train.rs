//! Train command implementation (full pipeline from a YAML spec)

use crate::cli::logging::log;
use crate::cli::{LogLevel, TrainArgs};
use crate::config::{load_spec, validate_spec, PipelineSpec};
use crate::data::{merge_data, MergedTable, NUM_CLASSES};
use crate::encode::{Batch, Collator, Tokenizer, WordTokenizer};
use crate::eval::ConfusionMatrix;
use crate::features::{attach_perplexity, PerplexityTable};
use crate::train::{Classifier, LoopConfig, PriorClassifier, TrainLoop, TrainResult};

pub fn run_train(args: TrainArgs, level: LogLevel) -> Result<(), String> {
    let spec = load_spec(&args.spec).map_err(|e| e.to_string())?;
    validate_spec(&spec).map_err(|e| format!("Invalid spec: {e}"))?;

    log(level, LogLevel::Normal, "✓ Spec loaded and validated");
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  Context: {} | Markers: {} | Epochs: {} | Batch size: {}",
            spec.data.use_context,
            spec.data.filler_markers.is_some(),
            spec.training.epochs,
            spec.training.batch_size,
        ),
    );

    // Merge both splits up front; any data error aborts the run.
    let train_table = merge_split(&spec, &spec.data.train_instances, &spec.data.train_labels)?;
    let dev_table = merge_split(&spec, &spec.data.dev_instances, &spec.data.dev_labels)?;
    log(
        level,
        LogLevel::Normal,
        &format!(
            "✓ Merged {} train / {} dev instances",
            train_table.len(),
            dev_table.len()
        ),
    );

    std::fs::create_dir_all(&spec.output_dir)
        .map_err(|e| format!("Failed to create output dir: {e}"))?;
    let train_csv = spec.output_dir.join("train.csv");
    let dev_csv = spec.output_dir.join("dev.csv");
    train_table
        .write_csv(&train_csv)
        .map_err(|e| format!("Failed to write train CSV: {e}"))?;
    dev_table
        .write_csv(&dev_csv)
        .map_err(|e| format!("Failed to write dev CSV: {e}"))?;
    log(
        level,
        LogLevel::Verbose,
        &format!("  Wrote {} and {}", train_csv.display(), dev_csv.display()),
    );

    // Vocabulary comes from the training split only.
    let tokenizer = WordTokenizer::train(train_table.texts.iter().map(String::as_str));
    let collator = Collator::new(spec.tokenizer.max_seq_len);
    let train_batches = collator.batches(&tokenizer, &train_table, spec.training.batch_size);
    let dev_batches = collator.batches(&tokenizer, &dev_table, spec.training.batch_size);
    log(
        level,
        LogLevel::Normal,
        &format!(
            "✓ {} train / {} dev batches (vocab: {} tokens)",
            train_batches.len(),
            dev_batches.len(),
            tokenizer.vocab_size(),
        ),
    );

    log(level, LogLevel::Normal, "Starting training...");
    let mut classifier = PriorClassifier::new();
    let result = TrainLoop::new(LoopConfig {
        epochs: spec.training.epochs,
        seed: spec.training.seed,
    })
    .run(&mut classifier, &train_batches, &dev_batches, |m| {
        log(
            level,
            LogLevel::Normal,
            &format!(
                "Epoch {}/{}: train_loss={:.4} train_acc={:.1}% | val_loss={:.4} val_acc={:.1}%",
                m.epoch + 1,
                spec.training.epochs,
                m.train_loss,
                m.train_accuracy * 100.0,
                m.val_loss,
                m.val_accuracy * 100.0,
            ),
        );
    });

    let confusion = dev_confusion(&classifier, &dev_batches);
    log(level, LogLevel::Normal, "");
    log(level, LogLevel::Normal, "✓ Training complete");
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  Best epoch: {} (val_loss={:.4})",
            result.best_epoch + 1,
            result.best_val_loss,
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  Dev accuracy: {:.1}% | macro F1: {:.3}",
            confusion.accuracy() * 100.0,
            confusion.macro_f1(),
        ),
    );
    log(level, LogLevel::Verbose, &confusion.to_string());

    write_summary(&spec, &result, &confusion)?;
    Ok(())
}

fn merge_split(
    spec: &PipelineSpec,
    instances: &std::path::Path,
    labels: &std::path::Path,
) -> Result<MergedTable, String> {
    let markers = spec
        .data
        .markers()
        .map_err(|e| format!("Invalid markers: {e}"))?;

    let mut table = merge_data(instances, labels, spec.data.use_context, markers.as_ref())
        .map_err(|e| format!("Merge failed for {}: {e}", instances.display()))?;

    if let Some(perplexity_path) = &spec.data.perplexity {
        let perplexities = PerplexityTable::load(perplexity_path)
            .map_err(|e| format!("Failed to load perplexity file: {e}"))?;
        attach_perplexity(&mut table, &perplexities, spec.data.use_rank)
            .map_err(|e| format!("Feature attachment failed: {e}"))?;
    }

    Ok(table)
}

fn dev_confusion(classifier: &PriorClassifier, dev_batches: &[Batch]) -> ConfusionMatrix {
    let mut confusion = ConfusionMatrix::new(NUM_CLASSES);
    for batch in dev_batches {
        let predictions = classifier.predict_batch(batch);
        for (&predicted, &label) in predictions.iter().zip(batch.labels.iter()) {
            confusion.record(label, predicted);
        }
    }
    confusion
}

fn write_summary(
    spec: &PipelineSpec,
    result: &TrainResult,
    confusion: &ConfusionMatrix,
) -> Result<(), String> {
    let summary = serde_json::json!({
        "epochs_completed": result.epoch_metrics.len(),
        "best_epoch": result.best_epoch,
        "best_val_loss": result.best_val_loss,
        "dev_accuracy": confusion.accuracy(),
        "dev_macro_f1": confusion.macro_f1(),
        "epoch_metrics": result
            .epoch_metrics
            .iter()
            .map(|m| {
                serde_json::json!({
                    "epoch": m.epoch,
                    "train_loss": m.train_loss,
                    "train_accuracy": m.train_accuracy,
                    "val_loss": m.val_loss,
                    "val_accuracy": m.val_accuracy,
                })
            })
            .collect::<Vec<_>>(),
    });

    let path = spec.output_dir.join("run_summary.json");
    let rendered = serde_json::to_string_pretty(&summary)
        .map_err(|e| format!("Failed to render summary: {e}"))?;
    std::fs::write(&path, rendered).map_err(|e| format!("Failed to write summary: {e}"))
}
