//! Classifier seam.
//!
//! The transformer model lives behind [`Classifier`]: the loop hands it
//! batches and reads back loss and correctness signals. Anything that
//! can consume a [`Batch`] this way can be trained by [`super::TrainLoop`].

use crate::encode::Batch;

/// Loss and correctness signals for one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchMetrics {
    /// Mean loss over the batch
    pub loss: f32,
    /// Correctly classified instances
    pub correct: usize,
    /// Instances in the batch
    pub total: usize,
}

impl BatchMetrics {
    /// Fraction of correctly classified instances.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }
}

/// A trainable sequence classifier.
pub trait Classifier {
    /// Forward/backward pass with parameter updates.
    fn train_batch(&mut self, batch: &Batch) -> BatchMetrics;

    /// Forward-only pass.
    fn eval_batch(&self, batch: &Batch) -> BatchMetrics;

    /// Predicted label codes for a batch, in batch order.
    fn predict_batch(&self, batch: &Batch) -> Vec<u8>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy() {
        let m = BatchMetrics {
            loss: 0.3,
            correct: 3,
            total: 4,
        };
        assert!((m.accuracy() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_empty_batch() {
        let m = BatchMetrics {
            loss: 0.0,
            correct: 0,
            total: 0,
        };
        assert_eq!(m.accuracy(), 0.0);
    }
}
