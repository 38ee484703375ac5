//! Training loop for classification fine-tuning.
//!
//! [`TrainLoop`] drives a [`Classifier`] over batched instances: one
//! train pass and one validation pass per epoch, deterministic per-epoch
//! shuffling of the batch order, and best-validation-epoch tracking.
//! Single-threaded and synchronous; any failure aborts the run.

use super::classifier::{BatchMetrics, Classifier};
use crate::encode::Batch;
use rand::prelude::*;

/// Training loop configuration.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Number of training epochs (default: 10)
    pub epochs: usize,
    /// Base random seed for per-epoch shuffling (default: 1234)
    pub seed: u64,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            epochs: 10,
            seed: 1234,
        }
    }
}

/// Metrics for a single training epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochMetrics {
    /// Epoch number (0-indexed)
    pub epoch: usize,
    /// Average training loss
    pub train_loss: f32,
    /// Training accuracy (0.0-1.0)
    pub train_accuracy: f32,
    /// Average validation loss
    pub val_loss: f32,
    /// Validation accuracy (0.0-1.0)
    pub val_accuracy: f32,
}

/// Result of a full training run.
#[derive(Debug, Clone)]
pub struct TrainResult {
    /// Per-epoch metrics
    pub epoch_metrics: Vec<EpochMetrics>,
    /// Epoch with the lowest validation loss
    pub best_epoch: usize,
    /// Lowest validation loss achieved
    pub best_val_loss: f32,
}

/// Epoch-driving training loop.
#[derive(Debug, Clone, Default)]
pub struct TrainLoop {
    config: LoopConfig,
}

impl TrainLoop {
    /// Create a training loop.
    #[must_use]
    pub fn new(config: LoopConfig) -> Self {
        Self { config }
    }

    /// Run the full training loop.
    ///
    /// For each epoch:
    /// 1. Shuffle the training batch order (deterministic, seed varies
    ///    per epoch)
    /// 2. Train on every batch
    /// 3. Validate on every validation batch (forward-only)
    /// 4. Record metrics and invoke `on_epoch`
    pub fn run(
        &self,
        classifier: &mut dyn Classifier,
        train_batches: &[Batch],
        val_batches: &[Batch],
        mut on_epoch: impl FnMut(&EpochMetrics),
    ) -> TrainResult {
        let mut epoch_metrics = Vec::with_capacity(self.config.epochs);
        let mut best_val_loss = f32::INFINITY;
        let mut best_epoch = 0;

        for epoch in 0..self.config.epochs {
            let mut order: Vec<&Batch> = train_batches.iter().collect();
            let mut rng = StdRng::seed_from_u64(self.config.seed.wrapping_add(epoch as u64));
            order.shuffle(&mut rng);

            let (train_loss, train_accuracy) =
                aggregate(order.iter().map(|batch| classifier.train_batch(batch)));
            let (val_loss, val_accuracy) =
                aggregate(val_batches.iter().map(|batch| classifier.eval_batch(batch)));

            let metrics = EpochMetrics {
                epoch,
                train_loss,
                train_accuracy,
                val_loss,
                val_accuracy,
            };

            if val_loss < best_val_loss {
                best_val_loss = val_loss;
                best_epoch = epoch;
            }

            on_epoch(&metrics);
            epoch_metrics.push(metrics);
        }

        TrainResult {
            epoch_metrics,
            best_epoch,
            best_val_loss,
        }
    }
}

/// Combine per-batch metrics into (loss, accuracy), weighting by batch size.
fn aggregate(metrics: impl Iterator<Item = BatchMetrics>) -> (f32, f32) {
    let mut loss_sum = 0.0f64;
    let mut correct = 0usize;
    let mut total = 0usize;

    for m in metrics {
        loss_sum += f64::from(m.loss) * m.total as f64;
        correct += m.correct;
        total += m.total;
    }

    if total == 0 {
        (0.0, 0.0)
    } else {
        ((loss_sum / total as f64) as f32, correct as f32 / total as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::TokenId;
    use ndarray::Array2;

    fn batch(labels: &[u8]) -> Batch {
        Batch {
            ids: (0..labels.len()).map(|i| format!("1_{}", i + 1)).collect(),
            input_ids: Array2::<TokenId>::zeros((labels.len(), 4)),
            labels: labels.to_vec(),
            features: None,
            lengths: vec![4; labels.len()],
        }
    }

    /// Classifier that records the order of batch sizes it saw.
    struct Recording {
        seen: Vec<usize>,
    }

    impl Classifier for Recording {
        fn train_batch(&mut self, batch: &Batch) -> BatchMetrics {
            self.seen.push(batch.batch_size());
            BatchMetrics {
                loss: 1.0,
                correct: batch.batch_size(),
                total: batch.batch_size(),
            }
        }

        fn eval_batch(&self, batch: &Batch) -> BatchMetrics {
            BatchMetrics {
                loss: 0.5,
                correct: 0,
                total: batch.batch_size(),
            }
        }

        fn predict_batch(&self, batch: &Batch) -> Vec<u8> {
            vec![0; batch.batch_size()]
        }
    }

    #[test]
    fn test_loop_runs_all_epochs() {
        let train = vec![batch(&[0, 1]), batch(&[2])];
        let val = vec![batch(&[1, 1])];
        let mut classifier = Recording { seen: Vec::new() };

        let result = TrainLoop::new(LoopConfig {
            epochs: 3,
            seed: 42,
        })
        .run(&mut classifier, &train, &val, |_| {});

        assert_eq!(result.epoch_metrics.len(), 3);
        assert_eq!(classifier.seen.len(), 6);
    }

    #[test]
    fn test_metrics_weighted_by_batch_size() {
        let train = vec![batch(&[0, 1, 2]), batch(&[0])];
        let val = vec![batch(&[1])];
        let mut classifier = Recording { seen: Vec::new() };

        let result = TrainLoop::new(LoopConfig { epochs: 1, seed: 0 }).run(
            &mut classifier,
            &train,
            &val,
            |_| {},
        );

        let m = &result.epoch_metrics[0];
        assert!((m.train_loss - 1.0).abs() < 1e-6);
        assert!((m.train_accuracy - 1.0).abs() < 1e-6);
        assert!((m.val_loss - 0.5).abs() < 1e-6);
        assert!((m.val_accuracy - 0.0).abs() < 1e-6);
    }

    #[test]
    fn test_shuffle_deterministic_across_runs() {
        let train: Vec<Batch> = (1..=5).map(|n| batch(&vec![0u8; n])).collect();
        let val = vec![batch(&[0])];
        let config = LoopConfig { epochs: 2, seed: 7 };

        let mut first = Recording { seen: Vec::new() };
        TrainLoop::new(config.clone()).run(&mut first, &train, &val, |_| {});

        let mut second = Recording { seen: Vec::new() };
        TrainLoop::new(config).run(&mut second, &train, &val, |_| {});

        assert_eq!(first.seen, second.seen);
    }

    #[test]
    fn test_shuffle_varies_per_epoch() {
        let train: Vec<Batch> = (1..=8).map(|n| batch(&vec![0u8; n])).collect();
        let val = vec![batch(&[0])];
        let mut classifier = Recording { seen: Vec::new() };

        TrainLoop::new(LoopConfig { epochs: 4, seed: 7 }).run(
            &mut classifier,
            &train,
            &val,
            |_| {},
        );

        // Each epoch visits all 8 batches, but not always in one fixed order.
        let rounds: Vec<&[usize]> = classifier.seen.chunks(8).collect();
        for round in &rounds {
            let mut sorted = round.to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        }
        assert!(rounds.iter().any(|round| round != &rounds[0]));
    }

    #[test]
    fn test_best_epoch_tracks_lowest_val_loss() {
        /// Validation loss scripted per epoch: 2.0, 1.0, 3.0.
        struct Scripted {
            train_calls: usize,
        }
        impl Classifier for Scripted {
            fn train_batch(&mut self, batch: &Batch) -> BatchMetrics {
                self.train_calls += 1;
                BatchMetrics {
                    loss: 1.0,
                    correct: 0,
                    total: batch.batch_size(),
                }
            }
            fn eval_batch(&self, batch: &Batch) -> BatchMetrics {
                BatchMetrics {
                    loss: [2.0, 1.0, 3.0][self.train_calls - 1],
                    correct: 0,
                    total: batch.batch_size(),
                }
            }
            fn predict_batch(&self, batch: &Batch) -> Vec<u8> {
                vec![0; batch.batch_size()]
            }
        }

        let train = vec![batch(&[0])];
        let val = vec![batch(&[0])];
        let mut classifier = Scripted { train_calls: 0 };

        let result = TrainLoop::new(LoopConfig { epochs: 3, seed: 0 }).run(
            &mut classifier,
            &train,
            &val,
            |_| {},
        );

        assert_eq!(result.best_epoch, 1);
        assert_eq!(result.best_val_loss, 1.0);
        assert_eq!(result.epoch_metrics[2].val_loss, 3.0);
    }

    #[test]
    fn test_empty_validation_set() {
        let train = vec![batch(&[0])];
        let mut classifier = Recording { seen: Vec::new() };

        let result =
            TrainLoop::new(LoopConfig { epochs: 1, seed: 0 }).run(&mut classifier, &train, &[], |_| {});
        assert_eq!(result.epoch_metrics[0].val_accuracy, 0.0);
    }
}
