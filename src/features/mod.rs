//! Auxiliary numeric features for merged instances.
//!
//! Perplexity values come from an external language model and arrive as a
//! tab-separated file of `instance_id<TAB>perplexity`. This module joins
//! them to a merged table, either as the raw value or as the filler's
//! perplexity rank within its row's candidate group.

use crate::data::{DataError, FeatureColumn, MergedTable, Result};
use std::collections::HashMap;
use std::path::Path;

/// Per-instance perplexity values keyed by instance id.
#[derive(Debug, Clone, Default)]
pub struct PerplexityTable {
    map: HashMap<String, f64>,
}

impl PerplexityTable {
    /// Load a perplexity table from a tab-separated file with two unnamed
    /// columns: instance id and perplexity.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line does not
    /// parse as `id<TAB>float`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a perplexity table from tab-separated content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for (offset, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (id, value) = line.split_once('\t').ok_or(DataError::Parse {
                line: offset + 1,
                message: "expected two tab-separated fields: id, perplexity".to_string(),
            })?;
            let value: f64 = value.trim().parse().map_err(|e| DataError::Parse {
                line: offset + 1,
                message: format!("invalid perplexity value {value:?}: {e}"),
            })?;
            map.insert(id.trim().to_string(), value);
        }
        Ok(Self { map })
    }

    /// Look up the perplexity for an instance id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<f64> {
        self.map.get(id).copied()
    }

    /// Number of instance ids with a perplexity value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Attach a perplexity-derived feature column to a merged table.
///
/// With `use_rank` set, each instance gets the rank (1 = lowest) of its
/// perplexity among the candidates of the same source row; ties keep
/// filler-index order. Otherwise the raw perplexity is attached.
///
/// # Errors
///
/// Returns [`DataError::MissingFeature`] if any merged instance id has no
/// perplexity value.
pub fn attach_perplexity(
    table: &mut MergedTable,
    perplexities: &PerplexityTable,
    use_rank: bool,
) -> Result<()> {
    let values: Vec<f64> = table
        .ids
        .iter()
        .map(|id| {
            perplexities
                .get(id)
                .ok_or_else(|| DataError::MissingFeature { id: id.clone() })
        })
        .collect::<Result<_>>()?;

    let (name, values) = if use_rank {
        ("rank", ranks_within_rows(&table.ids, &values))
    } else {
        ("perplexity", values.iter().map(|&v| v as f32).collect())
    };

    table.feature = Some(FeatureColumn {
        name: name.to_string(),
        values,
    });
    Ok(())
}

/// Rank perplexities within each row's candidate group.
///
/// Instances of one row are consecutive in merge order; groups are cut
/// where the id prefix before the final `_` changes.
fn ranks_within_rows(ids: &[String], values: &[f64]) -> Vec<f32> {
    let mut ranks = vec![0.0f32; values.len()];

    let base = |id: &str| -> String {
        id.rfind('_').map_or_else(|| id.to_string(), |i| id[..i].to_string())
    };

    let mut start = 0;
    while start < ids.len() {
        let group_base = base(&ids[start]);
        let mut end = start + 1;
        while end < ids.len() && base(&ids[end]) == group_base {
            end += 1;
        }

        let mut order: Vec<usize> = (start..end).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]).then(a.cmp(&b)));
        for (rank, &idx) in order.iter().enumerate() {
            ranks[idx] = (rank + 1) as f32;
        }

        start = end;
    }

    ranks
}
