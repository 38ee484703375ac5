//! Instance construction: expanding rows into flat labeled text instances.
//!
//! Each row expands into one instance per filler candidate. The filler is
//! either substituted into the blank directly or spliced in between a
//! start/end marker pair, and the result is optionally wrapped in the
//! row's document context.

use super::error::{DataError, Result};
use super::table::{Row, FILLERS_PER_ROW};

/// Blank token marking the filler position in a sentence template
pub const BLANK: &str = "______";

/// Placeholder for truncated document context, stripped during assembly
const ELLIPSIS: &str = "(...)";

/// An ordered pair of start/end marker strings for the filler span.
///
/// Construction validates that both markers are non-empty, so a value of
/// this type is always usable for span marking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillerMarkers {
    start: String,
    end: String,
}

impl FillerMarkers {
    /// Create a marker pair.
    ///
    /// # Errors
    ///
    /// Returns [`DataError::InvalidMarkers`] if either marker is empty.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self> {
        let start = start.into();
        let end = end.into();
        if start.is_empty() || end.is_empty() {
            return Err(DataError::InvalidMarkers { start, end });
        }
        Ok(Self { start, end })
    }

    /// Start marker, placed before the filler span.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// End marker, placed after the filler span.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }
}

/// One (row, filler-index) pair: a derived id and its constructed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    /// Derived id `{row_id}_{filler_index}`
    pub id: String,
    /// Constructed instance text
    pub text: String,
}

/// Insert marker tokens at the start and end of the filler span.
///
/// The sentence is tokenized by whitespace, the blank token is replaced
/// by the end marker, and the filler plus start marker are inserted
/// immediately before it. The result is rejoined with single spaces:
///
/// ```
/// use relleno::data::{insert_filler_markers, FillerMarkers};
///
/// let markers = FillerMarkers::new("[F]", "[/F]").unwrap();
/// let marked = insert_filler_markers("This is a ______ example.", "really simple", &markers).unwrap();
/// assert_eq!(marked, "This is a [F] really simple [/F] example.");
/// ```
///
/// # Errors
///
/// Returns [`DataError::MissingBlank`] if the sentence contains no blank
/// token.
pub fn insert_filler_markers(
    sentence: &str,
    filler: &str,
    markers: &FillerMarkers,
) -> Result<String> {
    let mut tokens: Vec<&str> = sentence.split_whitespace().collect();

    let blank_index =
        tokens
            .iter()
            .position(|&t| t == BLANK)
            .ok_or_else(|| DataError::MissingBlank {
                sentence: sentence.to_string(),
            })?;

    tokens[blank_index] = markers.end();
    tokens.insert(blank_index, filler);
    tokens.insert(blank_index, markers.start());

    Ok(tokens.join(" "))
}

/// Expand each row into one instance per filler candidate.
///
/// For every row, filler indices 1..=5 yield ids `{row_id}_1`..`{row_id}_5`
/// in that order. With `markers` set, the filler span is marked via
/// [`insert_filler_markers`]; otherwise the blank token is replaced by the
/// filler directly. With `use_context` set, the text is wrapped in the
/// row's document context.
///
/// Pure data transformation: no file I/O, no hidden state.
///
/// # Errors
///
/// Returns [`DataError::MissingBlank`] if span marking is requested and a
/// sentence contains no blank token.
pub fn expand_rows(
    rows: &[Row],
    use_context: bool,
    markers: Option<&FillerMarkers>,
) -> Result<Vec<Instance>> {
    let mut instances = Vec::with_capacity(rows.len() * FILLERS_PER_ROW);

    for row in rows {
        for (index, filler) in row.fillers.iter().enumerate() {
            let id = format!("{}_{}", row.id, index + 1);

            let sent_with_filler = match markers {
                Some(markers) => insert_filler_markers(&row.sentence, filler, markers)?,
                None => row.sentence.replace(BLANK, filler),
            };

            let text = if use_context {
                assemble_context(row, &sent_with_filler)
            } else {
                sent_with_filler
            };

            instances.push(Instance { id, text });
        }
    }

    Ok(instances)
}

/// Wrap a filled sentence in the row's document context.
///
/// Prepends the article title, section header, and previous context, and
/// appends the follow-up context as a final line only when it is
/// non-empty. Lines are joined with newlines and every `(...)` truncation
/// placeholder is stripped from the result.
fn assemble_context(row: &Row, sent_with_filler: &str) -> String {
    let mut lines = vec![
        row.article_title.as_str(),
        row.section_header.as_str(),
        row.previous_context.as_str(),
        sent_with_filler,
    ];
    if !row.follow_up_context.is_empty() {
        lines.push(row.follow_up_context.as_str());
    }

    lines.join("\n").replace(ELLIPSIS, "")
}
