//! Classification metrics: confusion matrix, accuracy, per-class F1.

use std::fmt;

/// Confusion matrix for multi-class classification.
///
/// Element `[i][j]` counts samples with true label `i` predicted as `j`.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    matrix: Vec<Vec<usize>>,
    n_classes: usize,
}

impl ConfusionMatrix {
    /// Create an empty matrix with a fixed number of classes.
    #[must_use]
    pub fn new(n_classes: usize) -> Self {
        Self {
            matrix: vec![vec![0; n_classes]; n_classes],
            n_classes,
        }
    }

    /// Build from parallel prediction and ground-truth sequences.
    ///
    /// Pairs with a label outside `0..n_classes` are ignored.
    #[must_use]
    pub fn from_predictions(y_pred: &[u8], y_true: &[u8], n_classes: usize) -> Self {
        assert_eq!(
            y_pred.len(),
            y_true.len(),
            "Predictions and targets must have same length"
        );

        let mut cm = Self::new(n_classes);
        for (&pred, &true_label) in y_pred.iter().zip(y_true.iter()) {
            cm.record(true_label, pred);
        }
        cm
    }

    /// Record one (true, predicted) observation.
    pub fn record(&mut self, true_label: u8, predicted: u8) {
        let (t, p) = (true_label as usize, predicted as usize);
        if t < self.n_classes && p < self.n_classes {
            self.matrix[t][p] += 1;
        }
    }

    /// Number of classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Count at `[true_label][predicted_label]`.
    #[must_use]
    pub fn get(&self, true_label: usize, predicted: usize) -> usize {
        self.matrix[true_label][predicted]
    }

    /// Total number of samples.
    #[must_use]
    pub fn total(&self) -> usize {
        self.matrix.iter().flatten().sum()
    }

    /// True instances of a class.
    #[must_use]
    pub fn support(&self, class: usize) -> usize {
        self.matrix[class].iter().sum()
    }

    /// Overall accuracy.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: usize = (0..self.n_classes).map(|i| self.matrix[i][i]).sum();
        correct as f64 / total as f64
    }

    /// Per-class precision, recall, and F1.
    #[must_use]
    pub fn class_metrics(&self, class: usize) -> ClassMetrics {
        let tp = self.matrix[class][class] as f64;
        let fp: usize = (0..self.n_classes)
            .filter(|&i| i != class)
            .map(|i| self.matrix[i][class])
            .sum();
        let fn_: usize = (0..self.n_classes)
            .filter(|&j| j != class)
            .map(|j| self.matrix[class][j])
            .sum();

        let precision = if tp + fp as f64 > 0.0 {
            tp / (tp + fp as f64)
        } else {
            0.0
        };
        let recall = if tp + fn_ as f64 > 0.0 {
            tp / (tp + fn_ as f64)
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        ClassMetrics {
            precision,
            recall,
            f1,
            support: self.support(class),
        }
    }

    /// Unweighted mean F1 over all classes.
    #[must_use]
    pub fn macro_f1(&self) -> f64 {
        if self.n_classes == 0 {
            return 0.0;
        }
        let sum: f64 = (0..self.n_classes)
            .map(|class| self.class_metrics(class).f1)
            .sum();
        sum / self.n_classes as f64
    }
}

impl fmt::Display for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Confusion Matrix:")?;

        write!(f, "      ")?;
        for j in 0..self.n_classes {
            write!(f, "Pred {j} ")?;
        }
        writeln!(f)?;

        for i in 0..self.n_classes {
            write!(f, "True {i}")?;
            for j in 0..self.n_classes {
                write!(f, "{:>6} ", self.matrix[i][j])?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// Precision, recall, F1, and support for one class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassMetrics {
    /// Fraction of predicted-as-class that were the class
    pub precision: f64,
    /// Fraction of true-class instances that were found
    pub recall: f64,
    /// Harmonic mean of precision and recall
    pub f1: f64,
    /// True instances of the class
    pub support: usize,
}
