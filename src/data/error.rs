//! Dataset error types.

use thiserror::Error;

/// Errors raised while constructing or merging dataset instances
#[derive(Debug, Error)]
pub enum DataError {
    /// The sentence template has no blank token to fill
    #[error("Sentence does not contain blank: {sentence}")]
    MissingBlank { sentence: String },

    /// Marker pair is not usable for span marking
    #[error("Filler markers ({start:?}, {end:?}) not valid. Must be a pair of non-empty start and end marker strings.")]
    InvalidMarkers { start: String, end: String },

    /// Label string outside the three-class plausibility vocabulary
    #[error("Label {label} is not a valid plausibility class")]
    InvalidLabel { label: String },

    /// Instance id absent from the label table
    #[error("No label found for instance {id}")]
    MissingLabel { id: String },

    /// Required column absent from a table header
    #[error("Column {column:?} not found in {path}")]
    MissingColumn { column: &'static str, path: String },

    /// Instance id absent from the perplexity table
    #[error("No perplexity value for instance {id}")]
    MissingFeature { id: String },

    /// Malformed table content
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for dataset operations
pub type Result<T> = std::result::Result<T, DataError>;
