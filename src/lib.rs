//! Relleno: cloze filler plausibility pipeline
//!
//! Turns tab-separated cloze datasets (one sentence template plus five
//! candidate fillers per row) into flat labeled text instances, joins them
//! with plausibility labels, and drives a fine-tuning loop for a
//! sequence classifier over the result.
//!
//! # Pipeline
//!
//! ```text
//! instances.tsv ─┐
//!                ├─ expand rows ─ merge labels ─ [attach features] ─ CSV
//! labels.tsv   ──┘                                    │
//!                                                     ▼
//!                                  tokenize ─ collate ─ train loop
//! ```
//!
//! # Example
//!
//! ```no_run
//! use relleno::data::merge_data;
//!
//! let table = merge_data(
//!     std::path::Path::new("train_data.tsv"),
//!     std::path::Path::new("train_labels.tsv"),
//!     true,
//!     None,
//! )?;
//! table.write_csv(std::path::Path::new("train.csv"))?;
//! # Ok::<(), relleno::data::DataError>(())
//! ```

pub mod cli;
pub mod config;
pub mod data;
pub mod encode;
pub mod eval;
pub mod features;
pub mod train;

mod error;

pub use error::{Error, Result};
