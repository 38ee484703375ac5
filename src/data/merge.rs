//! Label merging: joining expanded instances with their plausibility labels.

use super::error::{DataError, Result};
use super::instance::{expand_rows, FillerMarkers};
use super::label::{PlausibilityLabel, NUM_CLASSES};
use super::table::{LabelTable, RowTable};
use std::path::Path;

/// An auxiliary numeric column attached to a merged table.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureColumn {
    /// Column name in CSV output (e.g. `rank`, `perplexity`)
    pub name: String,
    /// One value per merged instance, in table order
    pub values: Vec<f32>,
}

/// Merged output table: parallel id, text, and label-code columns,
/// optionally with one auxiliary feature column.
#[derive(Debug, Clone, Default)]
pub struct MergedTable {
    /// Instance ids `{row_id}_{filler_index}`
    pub ids: Vec<String>,
    /// Constructed instance texts
    pub texts: Vec<String>,
    /// Ordinal label codes (0 = implausible, 1 = neutral, 2 = plausible)
    pub labels: Vec<u8>,
    /// Optional auxiliary feature column
    pub feature: Option<FeatureColumn>,
}

/// Summary statistics over a merged table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeStats {
    /// Total merged instances
    pub instances: usize,
    /// Instances per label class, indexed by ordinal code
    pub class_counts: [usize; NUM_CLASSES],
    /// Average instance text length in chars
    pub avg_text_len: usize,
}

impl MergedTable {
    /// Number of merged instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Compute summary statistics.
    #[must_use]
    pub fn stats(&self) -> MergeStats {
        let mut class_counts = [0usize; NUM_CLASSES];
        for &code in &self.labels {
            if let Some(slot) = class_counts.get_mut(code as usize) {
                *slot += 1;
            }
        }

        let total_len: usize = self.texts.iter().map(String::len).sum();
        MergeStats {
            instances: self.len(),
            class_counts,
            avg_text_len: if self.is_empty() {
                0
            } else {
                total_len / self.len()
            },
        }
    }

    /// Render the table as CSV with header `ids,text,label` (plus the
    /// feature column name when attached).
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from("ids,text,label");
        if let Some(feature) = &self.feature {
            out.push(',');
            out.push_str(&feature.name);
        }
        out.push('\n');

        for i in 0..self.len() {
            out.push_str(&csv_field(&self.ids[i]));
            out.push(',');
            out.push_str(&csv_field(&self.texts[i]));
            out.push(',');
            out.push_str(&self.labels[i].to_string());
            if let Some(feature) = &self.feature {
                out.push(',');
                out.push_str(&feature.values[i].to_string());
            }
            out.push('\n');
        }

        out
    }

    /// Write the table as CSV.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_csv(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_csv()).map_err(DataError::Io)
    }
}

/// Quote a CSV field when it contains a comma, quote, or newline.
fn csv_field(value: &str) -> String {
    if value.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Merge expanded instances with their labels into one table.
///
/// Pure counterpart of [`merge_data`]: operates on already-parsed tables.
///
/// # Errors
///
/// Returns [`DataError::MissingLabel`] if an instance id is absent from
/// the label table, [`DataError::InvalidLabel`] if a label string is
/// outside the three-class vocabulary, and propagates instance
/// construction errors.
pub fn merge_tables(
    rows: &RowTable,
    label_table: &LabelTable,
    use_context: bool,
    markers: Option<&FillerMarkers>,
) -> Result<MergedTable> {
    let instances = expand_rows(rows.rows(), use_context, markers)?;

    let mut ids = Vec::with_capacity(instances.len());
    let mut texts = Vec::with_capacity(instances.len());
    let mut labels = Vec::with_capacity(instances.len());

    for instance in instances {
        let label_str = label_table
            .get(&instance.id)
            .ok_or_else(|| DataError::MissingLabel {
                id: instance.id.clone(),
            })?;
        let label: PlausibilityLabel = label_str.parse()?;

        ids.push(instance.id);
        texts.push(instance.text);
        labels.push(label.code());
    }

    Ok(MergedTable {
        ids,
        texts,
        labels,
        feature: None,
    })
}

/// Merge an instances file and a labels file into one table.
///
/// Loads the tab-separated instance and label tables, expands each row
/// into its five instances, and joins every instance id to its label
/// code.
///
/// # Errors
///
/// Returns an error if either file cannot be read or parsed, or if
/// merging fails (missing blank, missing label, invalid label).
pub fn merge_data(
    instances_path: &Path,
    labels_path: &Path,
    use_context: bool,
    markers: Option<&FillerMarkers>,
) -> Result<MergedTable> {
    let rows = RowTable::load(instances_path)?;
    let label_table = LabelTable::load(labels_path)?;
    merge_tables(&rows, &label_table, use_context, markers)
}
