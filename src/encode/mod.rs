//! Tokenization and batching for the classifier.

mod batch;
mod tokenizer;

pub use batch::{Batch, Collator};
pub use tokenizer::{TokenId, Tokenizer, WordTokenizer};
