//! Tab-separated table readers for instance and label files.
//!
//! Instance files carry a header row naming `Id`, `Sentence`,
//! `Filler1`..`Filler5`, and the optional context columns. Label files
//! carry no header, just `id<TAB>label` per line.

use super::error::{DataError, Result};
use std::collections::HashMap;
use std::path::Path;

/// Number of filler candidates per row
pub const FILLERS_PER_ROW: usize = 5;

/// One source record: a sentence template with its filler candidates and
/// surrounding document context.
///
/// Fields absent from the file are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    /// Source record id
    pub id: String,
    /// Sentence template containing the blank token
    pub sentence: String,
    /// Candidate fillers, in column order `Filler1`..`Filler5`
    pub fillers: [String; FILLERS_PER_ROW],
    /// Article title of the source document
    pub article_title: String,
    /// Section header the sentence appears under
    pub section_header: String,
    /// Document text preceding the sentence
    pub previous_context: String,
    /// Document text following the sentence
    pub follow_up_context: String,
}

/// A parsed instance table.
#[derive(Debug, Clone, Default)]
pub struct RowTable {
    rows: Vec<Row>,
}

impl RowTable {
    /// Load an instance table from a tab-separated file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the header is missing
    /// a required column, or a line cannot be parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Parse an instance table from tab-separated content.
    ///
    /// The first line must be a header naming at least `Id`, `Sentence`,
    /// and `Filler1`..`Filler5`. Context columns may be absent, in which
    /// case the corresponding fields are empty.
    pub fn parse(content: &str, source: &str) -> Result<Self> {
        let mut lines = content.lines();
        let header_line = lines.next().unwrap_or("");
        let header = Header::parse(header_line, source)?;

        let mut rows = Vec::new();
        for (offset, line) in lines.enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            rows.push(header.parse_row(line, offset + 2)?);
        }

        Ok(Self { rows })
    }

    /// All rows in file order.
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Column layout of an instance file, resolved from its header row.
struct Header {
    id: usize,
    sentence: usize,
    fillers: [usize; FILLERS_PER_ROW],
    article_title: Option<usize>,
    section_header: Option<usize>,
    previous_context: Option<usize>,
    follow_up_context: Option<usize>,
}

impl Header {
    fn parse(line: &str, source: &str) -> Result<Self> {
        let names: Vec<&str> = line
            .trim_end_matches('\r')
            .split('\t')
            .map(str::trim)
            .collect();

        let find = |name: &'static str| -> Result<usize> {
            names
                .iter()
                .position(|&n| n == name)
                .ok_or_else(|| DataError::MissingColumn {
                    column: name,
                    path: source.to_string(),
                })
        };
        let find_opt = |name: &str| names.iter().position(|&n| n == name);

        Ok(Self {
            id: find("Id")?,
            sentence: find("Sentence")?,
            fillers: [
                find("Filler1")?,
                find("Filler2")?,
                find("Filler3")?,
                find("Filler4")?,
                find("Filler5")?,
            ],
            article_title: find_opt("Article title"),
            section_header: find_opt("Section header"),
            previous_context: find_opt("Previous context"),
            follow_up_context: find_opt("Follow-up context"),
        })
    }

    fn parse_row(&self, line: &str, line_num: usize) -> Result<Row> {
        let fields: Vec<&str> = line.split('\t').collect();

        // Missing trailing fields are treated as empty strings.
        let field = |idx: usize| fields.get(idx).copied().unwrap_or("").to_string();
        let opt_field = |idx: Option<usize>| {
            idx.and_then(|i| fields.get(i).copied())
                .unwrap_or("")
                .to_string()
        };

        let id = field(self.id);
        if id.is_empty() {
            return Err(DataError::Parse {
                line: line_num,
                message: "empty Id field".to_string(),
            });
        }

        Ok(Row {
            id,
            sentence: field(self.sentence),
            fillers: self.fillers.map(field),
            article_title: opt_field(self.article_title),
            section_header: opt_field(self.section_header),
            previous_context: opt_field(self.previous_context),
            follow_up_context: opt_field(self.follow_up_context),
        })
    }
}

/// Label table: instance id to label string.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    map: HashMap<String, String>,
}

impl LabelTable {
    /// Load a label table from a tab-separated file with two unnamed
    /// columns: instance id and label string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line does not
    /// have two tab-separated fields.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a label table from tab-separated content.
    pub fn parse(content: &str) -> Result<Self> {
        let mut map = HashMap::new();
        for (offset, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() {
                continue;
            }
            let (id, label) = line.split_once('\t').ok_or(DataError::Parse {
                line: offset + 1,
                message: "expected two tab-separated fields: id, label".to_string(),
            })?;
            map.insert(id.trim().to_string(), label.trim().to_string());
        }
        Ok(Self { map })
    }

    /// Look up the label string for an instance id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.map.get(id).map(String::as_str)
    }

    /// Number of labeled instance ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table has no labels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
