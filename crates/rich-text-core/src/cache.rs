//! Layout cache entries.
//!
//! Layout results live outside the document. Each entry names the paragraph it belongs to by
//! [`ParagraphId`] and stores the paragraph version it was computed against. An entry is valid
//! exactly when that stored version equals the paragraph's current version; the paragraph never
//! notifies entries, consumers compare on read.
//!
//! The geometry fields are slots for the layout collaborator. This crate does not measure text.

use std::collections::HashMap;

use crate::error::{DocumentError, Result};
use crate::offset::ParagraphOffset;
use crate::paragraph::{ParagraphData, ParagraphId, UNINITIALIZED_VERSION};
use crate::paragraph_manager::ParagraphManager;
use crate::run::Run;

/// A cache entry tied to one paragraph version.
pub trait ParagraphCache {
    /// Paragraph the entry belongs to.
    fn paragraph_id(&self) -> ParagraphId;
    /// Version recorded by the last `init_version`/`update_version` (0 before initialization).
    fn current_paragraph_version(&self) -> u32;
    /// Store a version. Only [`ParagraphData`] calls this.
    fn set_current_paragraph_version(&mut self, version: u32);

    /// Whether the entry must be recomputed.
    ///
    /// Fails with [`DocumentError::ParagraphNotFound`] when the paragraph was removed.
    fn is_dirty(&self, manager: &ParagraphManager) -> Result<bool>
    where
        Self: Sized,
    {
        let paragraph = manager.paragraph(self.paragraph_id())?;
        Ok(paragraph.is_invalid_version(self))
    }
}

/// Top-left corner in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position
    pub x: f64,
    /// Vertical position
    pub y: f64,
}

/// Extent in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent
    pub width: f64,
    /// Vertical extent
    pub height: f64,
}

/// One laid-out line: a contiguous range of runs of a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub struct LineVisualData {
    paragraph: ParagraphId,
    /// First run of the line.
    pub start_run_index: usize,
    /// One past the last run of the line.
    pub end_run_index: usize,
    /// Position relative to the text box.
    pub left_top: Point,
    /// Measured size, set by layout.
    pub size: Option<Size>,
    current_paragraph_version: u32,
}

impl LineVisualData {
    /// Create an uninitialized line entry for runs `start_run_index..end_run_index`.
    pub fn new(paragraph: ParagraphId, start_run_index: usize, end_run_index: usize) -> Self {
        Self {
            paragraph,
            start_run_index,
            end_run_index,
            left_top: Point::default(),
            size: None,
            current_paragraph_version: UNINITIALIZED_VERSION,
        }
    }

    /// Create a line entry and record the paragraph's current version.
    pub fn attach(
        paragraph: &ParagraphData,
        start_run_index: usize,
        end_run_index: usize,
    ) -> Result<Self> {
        let mut line = Self::new(paragraph.id(), start_run_index, end_run_index);
        line.runs(paragraph)?;
        paragraph.init_version(&mut line)?;
        Ok(line)
    }

    /// Number of runs in the line.
    pub fn run_count(&self) -> usize {
        self.end_run_index.saturating_sub(self.start_run_index)
    }

    /// The runs covered by this line.
    pub fn runs<'a>(&self, paragraph: &'a ParagraphData) -> Result<&'a [Run]> {
        if paragraph.id() != self.paragraph {
            return Err(DocumentError::ParagraphMismatch {
                expected: self.paragraph,
                actual: paragraph.id(),
            });
        }
        paragraph
            .runs()
            .get(self.start_run_index..self.end_run_index)
            .ok_or(DocumentError::RunIndexOutOfRange {
                index: self.end_run_index,
                run_count: paragraph.run_count(),
            })
    }

    /// Number of characters in the line.
    pub fn char_count(&self, paragraph: &ParagraphData) -> Result<usize> {
        Ok(self.runs(paragraph)?.iter().map(Run::count).sum())
    }

    /// Text of the line.
    pub fn get_text(&self, paragraph: &ParagraphData) -> Result<String> {
        let mut out = String::new();
        for run in self.runs(paragraph)? {
            run.push_text(&mut out);
        }
        Ok(out)
    }
}

impl ParagraphCache for LineVisualData {
    fn paragraph_id(&self) -> ParagraphId {
        self.paragraph
    }

    fn current_paragraph_version(&self) -> u32 {
        self.current_paragraph_version
    }

    fn set_current_paragraph_version(&mut self, version: u32) {
        self.current_paragraph_version = version;
    }
}

/// Render record of one character.
#[derive(Debug, Clone, PartialEq)]
pub struct CharRenderData {
    paragraph: ParagraphId,
    char_index: ParagraphOffset,
    text: String,
    /// Position relative to the text box.
    pub left_top: Point,
    /// Measured size, reused while the paragraph is unchanged.
    pub size: Option<Size>,
    current_paragraph_version: u32,
}

impl CharRenderData {
    /// Capture the character at `char_index` and record the paragraph's current version.
    pub fn attach(paragraph: &ParagraphData, char_index: ParagraphOffset) -> Result<Self> {
        let hit = paragraph.get_run_index(char_index)?;
        let text = hit.run.char_at(hit.hit_offset).unwrap_or_default().to_string();

        let mut data = Self {
            paragraph: paragraph.id(),
            char_index,
            text,
            left_top: Point::default(),
            size: None,
            current_paragraph_version: UNINITIALIZED_VERSION,
        };
        paragraph.init_version(&mut data)?;
        Ok(data)
    }

    /// Offset of the character inside its paragraph.
    pub fn char_index(&self) -> ParagraphOffset {
        self.char_index
    }

    /// The character as captured at attach time.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl ParagraphCache for CharRenderData {
    fn paragraph_id(&self) -> ParagraphId {
        self.paragraph
    }

    fn current_paragraph_version(&self) -> u32 {
        self.current_paragraph_version
    }

    fn set_current_paragraph_version(&mut self, version: u32) {
        self.current_paragraph_version = version;
    }
}

/// Laid-out lines of every paragraph, as kept by a layout consumer.
#[derive(Debug, Default)]
pub struct ParagraphLineCache {
    lines: HashMap<ParagraphId, Vec<LineVisualData>>,
}

impl ParagraphLineCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the lines computed for a paragraph, replacing older ones.
    pub fn set_lines(&mut self, paragraph: ParagraphId, lines: Vec<LineVisualData>) {
        self.lines.insert(paragraph, lines);
    }

    /// Lines stored for a paragraph.
    pub fn lines(&self, paragraph: ParagraphId) -> Option<&[LineVisualData]> {
        self.lines.get(&paragraph).map(Vec::as_slice)
    }

    /// Paragraphs (in document order) with no lines or with at least one stale line.
    pub fn stale_paragraphs(&self, manager: &ParagraphManager) -> Vec<ParagraphId> {
        let stale: Vec<ParagraphId> = manager
            .paragraphs()
            .iter()
            .filter(|paragraph| match self.lines.get(&paragraph.id()) {
                Some(lines) => lines.iter().any(|line| paragraph.is_invalid_version(line)),
                None => true,
            })
            .map(ParagraphData::id)
            .collect();
        tracing::trace!(
            stale = stale.len(),
            paragraphs = manager.paragraph_count(),
            "validated line cache"
        );
        stale
    }

    /// Drop lines of paragraphs no longer in the document. Returns how many were dropped.
    pub fn evict_removed(&mut self, manager: &ParagraphManager) -> usize {
        let before = self.lines.len();
        self.lines.retain(|id, _| manager.contains(*id));
        let evicted = before - self.lines.len();
        if evicted > 0 {
            tracing::trace!(evicted, "evicted line cache of removed paragraphs");
        }
        evicted
    }

    /// Number of paragraphs with stored lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
