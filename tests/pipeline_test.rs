//! End-to-end pipeline tests: TSV files in, labeled CSV and training run out.

use relleno::data::{merge_data, FillerMarkers};
use relleno::encode::{Collator, WordTokenizer};
use relleno::features::{attach_perplexity, PerplexityTable};
use relleno::train::{LoopConfig, PriorClassifier, TrainLoop};
use std::path::PathBuf;
use tempfile::TempDir;

const HEADER: &str = "Id\tSentence\tFiller1\tFiller2\tFiller3\tFiller4\tFiller5\tArticle title\tSection header\tPrevious context\tFollow-up context";

fn write_fixtures(dir: &TempDir) -> (PathBuf, PathBuf) {
    let instances = dir.path().join("train_data.tsv");
    let labels = dir.path().join("train_labels.tsv");

    std::fs::write(
        &instances,
        format!(
            "{HEADER}\n\
             1\tAdd a ______ of salt.\tpinch\tdash\tcup\tspoon\tton\tCooking\tSeasoning\tBring the water to a boil.\tStir well.\n\
             2\tThe hike takes ______ hours.\ttwo\tthree\tfour\tmany\tgreen\tTrails\tPlanning\t(...) start early.\t"
        ),
    )
    .unwrap();

    std::fs::write(
        &labels,
        "1_1\tPLAUSIBLE\n1_2\tPLAUSIBLE\n1_3\tNEUTRAL\n1_4\tNEUTRAL\n1_5\tIMPLAUSIBLE\n\
         2_1\tPLAUSIBLE\n2_2\tPLAUSIBLE\n2_3\tNEUTRAL\n2_4\tNEUTRAL\n2_5\tIMPLAUSIBLE\n",
    )
    .unwrap();

    (instances, labels)
}

#[test]
fn test_merge_plain_substitution_to_csv() {
    let dir = TempDir::new().unwrap();
    let (instances, labels) = write_fixtures(&dir);

    let table = merge_data(&instances, &labels, false, None).unwrap();
    assert_eq!(table.len(), 10);
    assert_eq!(table.ids[0], "1_1");
    assert_eq!(table.texts[0], "Add a pinch of salt.");
    assert_eq!(table.labels[4], 0);

    let out = dir.path().join("train.csv");
    table.write_csv(&out).unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some("ids,text,label"));
    assert_eq!(lines.next(), Some("1_1,Add a pinch of salt.,2"));
    assert_eq!(written.lines().count(), 11);
}

#[test]
fn test_merge_with_markers_and_context() {
    let dir = TempDir::new().unwrap();
    let (instances, labels) = write_fixtures(&dir);

    let markers = FillerMarkers::new("[F]", "[/F]").unwrap();
    let table = merge_data(&instances, &labels, true, Some(&markers)).unwrap();

    // Row 1 has follow-up context, row 2 does not.
    assert_eq!(
        table.texts[0],
        "Cooking\nSeasoning\nBring the water to a boil.\nAdd a [F] pinch [/F] of salt.\nStir well."
    );
    assert_eq!(
        table.texts[5],
        "Trails\nPlanning\n start early.\nThe hike takes [F] two [/F] hours."
    );
    assert!(!table.texts[5].contains("(...)"));
}

#[test]
fn test_merge_with_perplexity_rank() {
    let dir = TempDir::new().unwrap();
    let (instances, labels) = write_fixtures(&dir);

    let perplexity = dir.path().join("perplexity.tsv");
    let values: String = (1..=2)
        .flat_map(|row| (1..=5).map(move |i| format!("{row}_{i}\t{}.0\n", 6 - i)))
        .collect();
    std::fs::write(&perplexity, values).unwrap();

    let mut table = merge_data(&instances, &labels, false, None).unwrap();
    let perplexities = PerplexityTable::load(&perplexity).unwrap();
    attach_perplexity(&mut table, &perplexities, true).unwrap();

    let feature = table.feature.as_ref().unwrap();
    assert_eq!(feature.name, "rank");
    // Perplexities descend with filler index, so ranks are reversed.
    assert_eq!(&feature.values[..5], &[5.0, 4.0, 3.0, 2.0, 1.0]);

    let out = dir.path().join("train.csv");
    table.write_csv(&out).unwrap();
    let written = std::fs::read_to_string(&out).unwrap();
    assert!(written.starts_with("ids,text,label,rank\n"));
}

#[test]
fn test_full_pipeline_through_training_loop() {
    let dir = TempDir::new().unwrap();
    let (instances, labels) = write_fixtures(&dir);

    let train_table = merge_data(&instances, &labels, false, None).unwrap();
    let dev_table = train_table.clone();

    let tokenizer = WordTokenizer::train(train_table.texts.iter().map(String::as_str));
    let collator = Collator::new(16);
    let train_batches = collator.batches(&tokenizer, &train_table, 4);
    let dev_batches = collator.batches(&tokenizer, &dev_table, 4);
    assert_eq!(train_batches.len(), 3);

    let mut classifier = PriorClassifier::new();
    let mut epochs_seen = 0;
    let result = TrainLoop::new(LoopConfig { epochs: 3, seed: 42 }).run(
        &mut classifier,
        &train_batches,
        &dev_batches,
        |_| epochs_seen += 1,
    );

    assert_eq!(epochs_seen, 3);
    assert_eq!(result.epoch_metrics.len(), 3);
    assert!(result.best_val_loss.is_finite());
    // The label distribution is 4/4/2, so the prior predicts a majority class.
    let last = result.epoch_metrics.last().unwrap();
    assert!(last.val_accuracy >= 0.3);
}

#[test]
fn test_merge_fails_on_unlabeled_instance() {
    let dir = TempDir::new().unwrap();
    let (instances, _) = write_fixtures(&dir);

    let labels = dir.path().join("short_labels.tsv");
    std::fs::write(&labels, "1_1\tPLAUSIBLE\n").unwrap();

    let err = merge_data(&instances, &labels, false, None).unwrap_err();
    assert!(err.to_string().contains("No label found for instance 1_2"));
}
