//! Pipeline spec validation.

use super::PipelineSpec;

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Training instance file does not exist: {0}")]
    TrainInstancesNotFound(String),

    #[error("Training label file does not exist: {0}")]
    TrainLabelsNotFound(String),

    #[error("Development instance file does not exist: {0}")]
    DevInstancesNotFound(String),

    #[error("Development label file does not exist: {0}")]
    DevLabelsNotFound(String),

    #[error("Perplexity file does not exist: {0}")]
    PerplexityNotFound(String),

    #[error("Filler markers must both be non-empty strings")]
    EmptyMarker,

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid max sequence length: {0} (must be > 0)")]
    InvalidSeqLen(usize),
}

/// Validate a pipeline spec: all referenced files must exist and all
/// hyperparameters must be positive.
///
/// # Errors
///
/// Returns the first violation found.
pub fn validate_spec(spec: &PipelineSpec) -> Result<(), ValidationError> {
    let exists = |path: &std::path::Path| path.exists();

    if !exists(&spec.data.train_instances) {
        return Err(ValidationError::TrainInstancesNotFound(
            spec.data.train_instances.display().to_string(),
        ));
    }
    if !exists(&spec.data.train_labels) {
        return Err(ValidationError::TrainLabelsNotFound(
            spec.data.train_labels.display().to_string(),
        ));
    }
    if !exists(&spec.data.dev_instances) {
        return Err(ValidationError::DevInstancesNotFound(
            spec.data.dev_instances.display().to_string(),
        ));
    }
    if !exists(&spec.data.dev_labels) {
        return Err(ValidationError::DevLabelsNotFound(
            spec.data.dev_labels.display().to_string(),
        ));
    }
    if let Some(perplexity) = &spec.data.perplexity {
        if !exists(perplexity) {
            return Err(ValidationError::PerplexityNotFound(
                perplexity.display().to_string(),
            ));
        }
    }

    if let Some((start, end)) = &spec.data.filler_markers {
        if start.is_empty() || end.is_empty() {
            return Err(ValidationError::EmptyMarker);
        }
    }

    if spec.training.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(spec.training.epochs));
    }
    if spec.training.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(spec.training.batch_size));
    }
    if spec.tokenizer.max_seq_len == 0 {
        return Err(ValidationError::InvalidSeqLen(spec.tokenizer.max_seq_len));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn spec_with_files(dir: &TempDir) -> PipelineSpec {
        for name in ["train.tsv", "train_labels.tsv", "dev.tsv", "dev_labels.tsv"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        let yaml = format!(
            r"
data:
  train_instances: {0}/train.tsv
  train_labels: {0}/train_labels.tsv
  dev_instances: {0}/dev.tsv
  dev_labels: {0}/dev_labels.tsv
",
            dir.path().display()
        );
        serde_yaml::from_str(&yaml).unwrap()
    }

    #[test]
    fn test_valid_spec() {
        let dir = TempDir::new().unwrap();
        let spec = spec_with_files(&dir);
        assert!(validate_spec(&spec).is_ok());
    }

    #[test]
    fn test_missing_train_instances() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.data.train_instances = dir.path().join("missing.tsv");

        let err = validate_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::TrainInstancesNotFound(_)));
    }

    #[test]
    fn test_missing_dev_labels() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.data.dev_labels = dir.path().join("missing.tsv");

        let err = validate_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::DevLabelsNotFound(_)));
    }

    #[test]
    fn test_missing_perplexity_file() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.data.perplexity = Some(dir.path().join("missing.tsv"));

        let err = validate_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::PerplexityNotFound(_)));
    }

    #[test]
    fn test_empty_marker() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.data.filler_markers = Some(("[F]".to_string(), String::new()));

        let err = validate_spec(&spec).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyMarker));
    }

    #[test]
    fn test_zero_epochs() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.training.epochs = 0;

        assert!(matches!(
            validate_spec(&spec).unwrap_err(),
            ValidationError::InvalidEpochs(0)
        ));
    }

    #[test]
    fn test_zero_batch_size() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.training.batch_size = 0;

        assert!(matches!(
            validate_spec(&spec).unwrap_err(),
            ValidationError::InvalidBatchSize(0)
        ));
    }

    #[test]
    fn test_zero_seq_len() {
        let dir = TempDir::new().unwrap();
        let mut spec = spec_with_files(&dir);
        spec.tokenizer.max_seq_len = 0;

        assert!(matches!(
            validate_spec(&spec).unwrap_err(),
            ValidationError::InvalidSeqLen(0)
        ));
    }
}
