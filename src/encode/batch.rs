//! Fixed-length collation of merged instances into training batches.

use super::tokenizer::{TokenId, Tokenizer};
use crate::data::MergedTable;
use ndarray::Array2;

/// A batch of encoded instances.
#[derive(Debug, Clone)]
pub struct Batch {
    /// Instance ids, in batch order
    pub ids: Vec<String>,
    /// Token IDs [batch_size, seq_len], truncated/padded to fixed length
    pub input_ids: Array2<TokenId>,
    /// Ordinal label codes
    pub labels: Vec<u8>,
    /// Optional auxiliary feature values
    pub features: Option<Vec<f32>>,
    /// Token counts before padding (capped at seq_len)
    pub lengths: Vec<usize>,
}

impl Batch {
    /// Get batch size
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.input_ids.nrows()
    }

    /// Get the fixed sequence length
    #[must_use]
    pub fn seq_len(&self) -> usize {
        self.input_ids.ncols()
    }
}

/// Collator producing fixed-length batches.
///
/// Every sequence is truncated to `max_seq_len` and right-padded with the
/// tokenizer's padding id up to exactly that length.
#[derive(Debug, Clone, Copy)]
pub struct Collator {
    /// Fixed sequence length
    pub max_seq_len: usize,
}

impl Default for Collator {
    fn default() -> Self {
        Self { max_seq_len: 100 }
    }
}

impl Collator {
    /// Create a collator with the given fixed sequence length.
    #[must_use]
    pub fn new(max_seq_len: usize) -> Self {
        Self { max_seq_len }
    }

    /// Encode one text to exactly `max_seq_len` token ids.
    ///
    /// Returns the padded ids and the pre-padding token count.
    pub fn encode(&self, tokenizer: &dyn Tokenizer, text: &str) -> (Vec<TokenId>, usize) {
        let mut ids = tokenizer.encode(text);
        ids.truncate(self.max_seq_len);
        let length = ids.len();
        ids.resize(self.max_seq_len, tokenizer.pad_id());
        (ids, length)
    }

    /// Collate a contiguous slice of a merged table into one batch.
    fn collate(&self, tokenizer: &dyn Tokenizer, table: &MergedTable, start: usize, end: usize) -> Batch {
        let batch_size = end - start;
        let mut input_ids = Array2::from_elem((batch_size, self.max_seq_len), tokenizer.pad_id());
        let mut lengths = Vec::with_capacity(batch_size);

        for (row, i) in (start..end).enumerate() {
            let (ids, length) = self.encode(tokenizer, &table.texts[i]);
            for (col, id) in ids.into_iter().enumerate() {
                input_ids[[row, col]] = id;
            }
            lengths.push(length);
        }

        Batch {
            ids: table.ids[start..end].to_vec(),
            input_ids,
            labels: table.labels[start..end].to_vec(),
            features: table
                .feature
                .as_ref()
                .map(|f| f.values[start..end].to_vec()),
            lengths,
        }
    }

    /// Split a merged table into batches of at most `batch_size` instances.
    ///
    /// The final batch may be partial. Table order is preserved; shuffling
    /// is the training loop's concern.
    pub fn batches(
        &self,
        tokenizer: &dyn Tokenizer,
        table: &MergedTable,
        batch_size: usize,
    ) -> Vec<Batch> {
        assert!(batch_size > 0, "batch_size must be > 0");

        let mut out = Vec::with_capacity(table.len().div_ceil(batch_size));
        let mut start = 0;
        while start < table.len() {
            let end = (start + batch_size).min(table.len());
            out.push(self.collate(tokenizer, table, start, end));
            start = end;
        }
        out
    }
}
