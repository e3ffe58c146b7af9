//! Immutable runs.
//!
//! A run is the atomic unit of paragraph content: a span of characters that share one
//! [`RunProperty`]. Runs are never edited in place. Splitting a run produces two new runs,
//! and a run moved from one paragraph to another is simply a new value in that paragraph's list.
//!
//! # Characters
//!
//! A "character" is whatever a run reports through [`Run::count`] and [`Run::char_at`]:
//!
//! - [`TextRun`]: one extended grapheme cluster (so `"👨‍👩‍👧"` or `"e\u{301}"` count as one).
//! - [`LineBreakRun`]: the two characters `"\r"` and `"\n"`.
//! - [`ObjectRun`]: a single object replacement character.

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{DocumentError, Result};
use crate::property::RunProperty;
use crate::DELIMITER_LENGTH;

/// Text used for the paragraph delimiter when rendering document text.
pub const NEW_LINE: &str = "\r\n";

/// Text reported for an embedded object.
pub const OBJECT_REPLACEMENT: &str = "\u{FFFC}";

/// A run of plain text with a single formatting property.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    text: Arc<str>,
    count: usize,
    property: RunProperty,
}

impl TextRun {
    /// Create a text run.
    pub fn new(text: &str, property: RunProperty) -> Self {
        Self {
            text: Arc::from(text),
            count: text.graphemes(true).count(),
            property,
        }
    }

    /// Create a text run with the default property.
    pub fn plain(text: &str) -> Self {
        Self::new(text, RunProperty::default())
    }

    /// Raw text of the run.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Formatting of the run.
    pub fn property(&self) -> &RunProperty {
        &self.property
    }

    /// Number of grapheme clusters.
    pub fn count(&self) -> usize {
        self.count
    }

    fn char_at(&self, index: usize) -> Option<&str> {
        self.text.graphemes(true).nth(index)
    }

    fn split_at(&self, index: usize) -> Result<(TextRun, TextRun)> {
        if index == 0 || index >= self.count {
            return Err(DocumentError::InvalidSplit {
                index,
                count: self.count,
            });
        }

        let byte_offset = self
            .text
            .grapheme_indices(true)
            .nth(index)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len());

        let left = TextRun {
            text: Arc::from(&self.text[..byte_offset]),
            count: index,
            property: self.property.clone(),
        };
        let right = TextRun {
            text: Arc::from(&self.text[byte_offset..]),
            count: self.count - index,
            property: self.property.clone(),
        };
        Ok((left, right))
    }
}

/// Marker produced by a splitter between two logical lines.
///
/// It is consumed by insertion (it becomes a paragraph boundary) and never stored in a
/// paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineBreakRun;

/// An atomic embedded object (image, formula, ...), one character wide.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRun {
    kind: Arc<str>,
    property: RunProperty,
}

impl ObjectRun {
    /// Create an object run. `kind` is an opaque tag owned by the embedding application.
    pub fn new(kind: &str, property: RunProperty) -> Self {
        Self {
            kind: Arc::from(kind),
            property,
        }
    }

    /// Application-defined tag of the object.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Formatting of the object.
    pub fn property(&self) -> &RunProperty {
        &self.property
    }
}

/// Immutable unit of paragraph content.
#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    /// Plain text.
    Text(TextRun),
    /// Paragraph separator marker.
    LineBreak(LineBreakRun),
    /// Embedded object.
    Object(ObjectRun),
}

impl Run {
    /// Convenience constructor for a plain text run with the default property.
    pub fn text(text: &str) -> Self {
        Run::Text(TextRun::plain(text))
    }

    /// Convenience constructor for a line break marker.
    pub fn line_break() -> Self {
        Run::LineBreak(LineBreakRun)
    }

    /// Number of logical characters in the run.
    pub fn count(&self) -> usize {
        match self {
            Run::Text(run) => run.count(),
            Run::LineBreak(_) => DELIMITER_LENGTH,
            Run::Object(_) => 1,
        }
    }

    /// Whether the run has no characters. Such runs are never stored in a paragraph.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Whether this is a line break marker.
    pub fn is_line_break(&self) -> bool {
        matches!(self, Run::LineBreak(_))
    }

    /// Formatting of the run, if it carries one.
    pub fn property(&self) -> Option<&RunProperty> {
        match self {
            Run::Text(run) => Some(run.property()),
            Run::LineBreak(_) => None,
            Run::Object(run) => Some(run.property()),
        }
    }

    /// Text of the character at `index`, or `None` when out of range.
    pub fn char_at(&self, index: usize) -> Option<&str> {
        match self {
            Run::Text(run) => run.char_at(index),
            Run::LineBreak(_) => match index {
                0 => Some("\r"),
                1 => Some("\n"),
                _ => None,
            },
            Run::Object(_) => (index == 0).then_some(OBJECT_REPLACEMENT),
        }
    }

    /// Split the run into `(left, right)` with `left.count() == index`.
    ///
    /// Only text runs can be split, and only at `0 < index < count`.
    pub fn split_at(&self, index: usize) -> Result<(Run, Run)> {
        match self {
            Run::Text(run) => {
                let (left, right) = run.split_at(index)?;
                Ok((Run::Text(left), Run::Text(right)))
            }
            Run::LineBreak(_) | Run::Object(_) => Err(DocumentError::InvalidSplit {
                index,
                count: self.count(),
            }),
        }
    }

    /// Append the text of this run to `out`.
    pub fn push_text(&self, out: &mut String) {
        match self {
            Run::Text(run) => out.push_str(run.text()),
            Run::LineBreak(_) => out.push_str(NEW_LINE),
            Run::Object(_) => out.push_str(OBJECT_REPLACEMENT),
        }
    }

    /// Text of the run.
    pub fn get_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }
}

impl From<TextRun> for Run {
    fn from(run: TextRun) -> Self {
        Run::Text(run)
    }
}

impl From<ObjectRun> for Run {
    fn from(run: ObjectRun) -> Self {
        Run::Object(run)
    }
}

/// Split a run list at character `index`, cutting a run in two when needed.
///
/// Returns `(left, right)` where `left` holds exactly `index` characters.
pub(crate) fn split_run_list(runs: &[Run], index: usize) -> Result<(Vec<Run>, Vec<Run>)> {
    let mut consumed = 0usize;
    for (i, run) in runs.iter().enumerate() {
        let count = run.count();
        if index == consumed {
            return Ok((runs[..i].to_vec(), runs[i..].to_vec()));
        }
        if index < consumed + count {
            let (first, second) = run.split_at(index - consumed)?;
            let mut left = runs[..i].to_vec();
            left.push(first);
            let mut right = Vec::with_capacity(runs.len() - i);
            right.push(second);
            right.extend_from_slice(&runs[i + 1..]);
            return Ok((left, right));
        }
        consumed += count;
    }

    if index == consumed {
        Ok((runs.to_vec(), Vec::new()))
    } else {
        Err(DocumentError::InvalidSplit {
            index,
            count: consumed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_run_counts_graphemes() {
        let run = Run::text("a👨‍👩‍👧e\u{301}");
        assert_eq!(run.count(), 3);
        assert_eq!(run.char_at(1), Some("👨‍👩‍👧"));
        assert_eq!(run.char_at(2), Some("e\u{301}"));
        assert_eq!(run.char_at(3), None);
    }

    #[test]
    fn test_split_text_run() {
        let run = Run::text("World");
        let (left, right) = run.split_at(2).unwrap();
        assert_eq!(left.get_text(), "Wo");
        assert_eq!(right.get_text(), "rld");
        assert_eq!(left.count() + right.count(), run.count());
        assert_eq!(left.property(), run.property());
    }

    #[test]
    fn test_split_keeps_grapheme_intact() {
        let run = Run::text("你好👋!");
        let (left, right) = run.split_at(3).unwrap();
        assert_eq!(left.get_text(), "你好👋");
        assert_eq!(right.get_text(), "!");
    }

    #[test]
    fn test_split_at_edges_is_rejected() {
        let run = Run::text("abc");
        assert_eq!(
            run.split_at(0),
            Err(DocumentError::InvalidSplit { index: 0, count: 3 })
        );
        assert!(run.split_at(3).is_err());
    }

    #[test]
    fn test_atomic_runs_cannot_split() {
        assert!(Run::line_break().split_at(1).is_err());
        let object = Run::Object(ObjectRun::new("image", RunProperty::default()));
        assert_eq!(object.count(), 1);
        assert_eq!(object.char_at(0), Some(OBJECT_REPLACEMENT));
        assert!(object.split_at(0).is_err());
    }

    #[test]
    fn test_line_break_chars() {
        let run = Run::line_break();
        assert_eq!(run.count(), DELIMITER_LENGTH);
        assert_eq!(run.char_at(0), Some("\r"));
        assert_eq!(run.char_at(1), Some("\n"));
        assert_eq!(run.get_text(), NEW_LINE);
    }

    #[test]
    fn test_split_run_list_mid_run() {
        let runs = vec![Run::text("Hello"), Run::text("World")];
        let (left, right) = split_run_list(&runs, 7).unwrap();
        let left: Vec<String> = left.iter().map(Run::get_text).collect();
        let right: Vec<String> = right.iter().map(Run::get_text).collect();
        assert_eq!(left, vec!["Hello", "Wo"]);
        assert_eq!(right, vec!["rld"]);
    }

    #[test]
    fn test_split_run_list_on_boundary_and_end() {
        let runs = vec![Run::text("ab"), Run::text("cd")];
        let (left, right) = split_run_list(&runs, 2).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(right.len(), 1);

        let (left, right) = split_run_list(&runs, 4).unwrap();
        assert_eq!(left.len(), 2);
        assert!(right.is_empty());

        assert!(split_run_list(&runs, 5).is_err());
    }
}
