//! YAML pipeline specification.
//!
//! All paths and hyperparameters live in one explicit spec struct that is
//! passed into each stage; nothing is read from global state.

mod validate;

pub use validate::{validate_spec, ValidationError};

use crate::data::FillerMarkers;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Complete pipeline specification.
///
/// # Example
///
/// ```yaml
/// data:
///   train_instances: data/train_data.tsv
///   train_labels: data/train_labels.tsv
///   dev_instances: data/dev_data.tsv
///   dev_labels: data/dev_labels.tsv
///   use_context: true
///   filler_markers: ["[F]", "[/F]"]
/// tokenizer:
///   max_seq_len: 100
/// training:
///   epochs: 10
///   batch_size: 16
///   seed: 1234
/// output_dir: out
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSpec {
    /// Data file paths and instance construction options
    pub data: DataSpec,

    /// Tokenization options
    #[serde(default)]
    pub tokenizer: TokenizerSpec,

    /// Training hyperparameters
    #[serde(default)]
    pub training: TrainingSpec,

    /// Directory for merged CSVs and the run summary
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// Data file paths and instance construction options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSpec {
    /// Training instance file (tab-separated)
    pub train_instances: PathBuf,
    /// Training label file (tab-separated)
    pub train_labels: PathBuf,
    /// Development instance file (tab-separated)
    pub dev_instances: PathBuf,
    /// Development label file (tab-separated)
    pub dev_labels: PathBuf,

    /// Wrap instance texts in document context
    #[serde(default)]
    pub use_context: bool,

    /// Optional (start, end) markers for the filler span
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filler_markers: Option<(String, String)>,

    /// Optional per-instance perplexity file (tab-separated)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perplexity: Option<PathBuf>,

    /// Attach perplexity rank instead of the raw value
    #[serde(default = "default_true")]
    pub use_rank: bool,
}

impl DataSpec {
    /// Build the validated marker pair, if configured.
    ///
    /// # Errors
    ///
    /// Returns an error if either configured marker is empty.
    pub fn markers(&self) -> crate::data::Result<Option<FillerMarkers>> {
        self.filler_markers
            .as_ref()
            .map(|(start, end)| FillerMarkers::new(start.clone(), end.clone()))
            .transpose()
    }
}

/// Tokenization options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerSpec {
    /// Fixed sequence length after truncation/padding
    #[serde(default = "default_max_seq_len")]
    pub max_seq_len: usize,
}

impl Default for TokenizerSpec {
    fn default() -> Self {
        Self {
            max_seq_len: default_max_seq_len(),
        }
    }
}

/// Training hyperparameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingSpec {
    /// Number of training epochs
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    /// Instances per batch
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Random seed for per-epoch shuffling
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for TrainingSpec {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            seed: default_seed(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("out")
}

fn default_max_seq_len() -> usize {
    100
}

fn default_epochs() -> usize {
    10
}

fn default_batch_size() -> usize {
    16
}

fn default_seed() -> u64 {
    1234
}

const fn default_true() -> bool {
    true
}

/// Load a pipeline spec from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_spec<P: AsRef<Path>>(path: P) -> Result<PipelineSpec> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        Error::ConfigError(format!(
            "Failed to read spec file {}: {}",
            path.as_ref().display(),
            e
        ))
    })?;

    serde_yaml::from_str(&content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse YAML spec: {e}")))
}
