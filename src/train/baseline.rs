//! Label-frequency baseline classifier.

use super::classifier::{BatchMetrics, Classifier};
use crate::data::NUM_CLASSES;
use crate::encode::Batch;

/// Deterministic prior baseline.
///
/// Learns only the label distribution of the training data: it predicts
/// the most frequent class and scores batches by the negative
/// log-likelihood of the (Laplace-smoothed) empirical label prior. Useful
/// as a floor for real models and for exercising the training loop
/// without one.
#[derive(Debug, Clone, Default)]
pub struct PriorClassifier {
    counts: [usize; NUM_CLASSES],
}

impl PriorClassifier {
    /// Create an untrained baseline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Smoothed probability of a label code under the current prior.
    #[must_use]
    pub fn probability(&self, code: u8) -> f32 {
        let total: usize = self.counts.iter().sum();
        let count = self.counts.get(code as usize).copied().unwrap_or(0);
        (count + 1) as f32 / (total + NUM_CLASSES) as f32
    }

    /// Most frequent label code seen so far; ties pick the lowest code.
    #[must_use]
    pub fn predicted_code(&self) -> u8 {
        let mut best = 0usize;
        for code in 1..NUM_CLASSES {
            if self.counts[code] > self.counts[best] {
                best = code;
            }
        }
        best as u8
    }

    fn score(&self, batch: &Batch) -> BatchMetrics {
        let predicted = self.predicted_code();
        let mut loss = 0.0f32;
        let mut correct = 0usize;

        for &label in &batch.labels {
            loss += -self.probability(label).ln();
            if label == predicted {
                correct += 1;
            }
        }

        BatchMetrics {
            loss: if batch.labels.is_empty() {
                0.0
            } else {
                loss / batch.labels.len() as f32
            },
            correct,
            total: batch.labels.len(),
        }
    }
}

impl Classifier for PriorClassifier {
    fn train_batch(&mut self, batch: &Batch) -> BatchMetrics {
        for &label in &batch.labels {
            if usize::from(label) < NUM_CLASSES {
                self.counts[label as usize] += 1;
            }
        }
        self.score(batch)
    }

    fn eval_batch(&self, batch: &Batch) -> BatchMetrics {
        self.score(batch)
    }

    fn predict_batch(&self, batch: &Batch) -> Vec<u8> {
        vec![self.predicted_code(); batch.batch_size()]
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

    #[test]
    fn test_untrained_prior_is_uniform() {
        let classifier = PriorClassifier::new();
        for code in 0..NUM_CLASSES as u8 {
            assert!((classifier.probability(code) - 1.0 / 3.0).abs() < 1e-6);
        }
        assert_eq!(classifier.predicted_code(), 0);
    }

    #[test]
    fn test_counts_drive_prediction() {
        let mut classifier = PriorClassifier::new();
        classifier.train_batch(&batch(&[2, 2, 2, 1, 0]));
        assert_eq!(classifier.predicted_code(), 2);
        assert!(classifier.probability(2) > classifier.probability(0));
    }

    #[test]
    fn test_eval_counts_correct_predictions() {
        let mut classifier = PriorClassifier::new();
        classifier.train_batch(&batch(&[1, 1, 1]));

        let metrics = classifier.eval_batch(&batch(&[1, 1, 0, 2]));
        assert_eq!(metrics.correct, 2);
        assert_eq!(metrics.total, 4);
        assert!(metrics.loss > 0.0);
    }

    #[test]
    fn test_eval_does_not_update() {
        let mut classifier = PriorClassifier::new();
        classifier.train_batch(&batch(&[0]));

        let before = classifier.probability(2);
        classifier.eval_batch(&batch(&[2, 2, 2, 2]));
        assert_eq!(classifier.probability(2), before);
    }

    #[test]
    fn test_loss_decreases_as_prior_sharpens() {
        let mut skewed = PriorClassifier::new();
        skewed.train_batch(&batch(&[2; 30]));

        let uniform = PriorClassifier::new();
        let probe = batch(&[2, 2, 2]);
        assert!(skewed.eval_batch(&probe).loss < uniform.eval_batch(&probe).loss);
    }

    #[test]
    fn test_predict_batch_len() {
        let classifier = PriorClassifier::new();
        assert_eq!(classifier.predict_batch(&batch(&[0, 1, 2])).len(), 3);
    }
}
