//! Tokenizer seam.
//!
//! The real classifier consumes subword token ids from an external
//! tokenizer. [`Tokenizer`] is the boundary; [`WordTokenizer`] is a
//! whitespace-vocabulary implementation that stands in for it so the
//! pipeline runs end to end without the external model.

use std::collections::HashMap;

/// Token ID type
pub type TokenId = u32;

/// Text-to-token-id encoder
pub trait Tokenizer: Send + Sync {
    /// Encode text to token IDs
    fn encode(&self, text: &str) -> Vec<TokenId>;

    /// Get vocabulary size
    fn vocab_size(&self) -> usize;

    /// Padding token ID
    fn pad_id(&self) -> TokenId;

    /// Unknown token ID
    fn unk_id(&self) -> TokenId;
}

/// Whitespace-token vocabulary tokenizer.
///
/// Ids 0 and 1 are reserved for padding and unknown tokens; corpus tokens
/// are assigned ids in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct WordTokenizer {
    vocab: HashMap<String, TokenId>,
}

impl WordTokenizer {
    /// Reserved padding token ID
    pub const PAD_ID: TokenId = 0;
    /// Reserved unknown token ID
    pub const UNK_ID: TokenId = 1;

    /// Build a vocabulary from a corpus of texts.
    pub fn train<'a>(corpus: impl IntoIterator<Item = &'a str>) -> Self {
        let mut vocab = HashMap::new();
        let mut next_id = Self::UNK_ID + 1;

        for text in corpus {
            for token in text.split_whitespace() {
                vocab.entry(token.to_string()).or_insert_with(|| {
                    let id = next_id;
                    next_id += 1;
                    id
                });
            }
        }

        Self { vocab }
    }

    /// Get ID for a token, if in vocabulary.
    #[must_use]
    pub fn token_to_id(&self, token: &str) -> Option<TokenId> {
        self.vocab.get(token).copied()
    }
}

impl Tokenizer for WordTokenizer {
    fn encode(&self, text: &str) -> Vec<TokenId> {
        text.split_whitespace()
            .map(|token| self.token_to_id(token).unwrap_or(Self::UNK_ID))
            .collect()
    }

    fn vocab_size(&self) -> usize {
        // Reserved ids are part of the vocabulary.
        self.vocab.len() + 2
    }

    fn pad_id(&self) -> TokenId {
        Self::PAD_ID
    }

    fn unk_id(&self) -> TokenId {
        Self::UNK_ID
    }
}
