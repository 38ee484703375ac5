//! Training loop and classifier seam.

mod baseline;
mod classifier;
mod trainer;

pub use baseline::PriorClassifier;
pub use classifier::{BatchMetrics, Classifier};
pub use trainer::{EpochMetrics, LoopConfig, TrainLoop, TrainResult};
