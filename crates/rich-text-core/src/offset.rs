//! Coordinate spaces.
//!
//! Three offset spaces exist in the document model and they are never interchangeable:
//!
//! - [`DocumentOffset`]: characters from the start of the whole document, counting every
//!   paragraph delimiter as [`DELIMITER_LENGTH`](crate::DELIMITER_LENGTH) characters.
//! - [`ParagraphOffset`]: characters from the start of one paragraph.
//! - [`RunHit`]: a run index plus an offset inside that run, tagged with the paragraph version
//!   it was computed against.
//!
//! There are deliberately no `From` conversions between the first two; going from one space
//! to the other always goes through the [`ParagraphManager`](crate::ParagraphManager).

use std::fmt;

use crate::paragraph::ParagraphData;
use crate::run::Run;

/// Character offset from the start of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct DocumentOffset(pub usize);

impl DocumentOffset {
    /// The start of the document.
    pub const ZERO: Self = Self(0);

    /// Create a document offset.
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Raw character offset.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for DocumentOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Character offset from the start of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ParagraphOffset(pub usize);

impl ParagraphOffset {
    /// The start of a paragraph.
    pub const ZERO: Self = Self(0);

    /// Create a paragraph offset.
    pub const fn new(offset: usize) -> Self {
        Self(offset)
    }

    /// Raw character offset.
    pub const fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ParagraphOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location of a paragraph offset inside the run list.
///
/// A hit is only meaningful while the paragraph's version is unchanged; check
/// [`RunHit::is_stale`] before using a hit that was computed earlier.
#[derive(Debug, Clone, PartialEq)]
pub struct RunHit {
    /// Index of the run in the paragraph's run list.
    pub run_index: usize,
    /// Offset inside the run (`0..run.count()`).
    pub hit_offset: usize,
    /// The run that was hit.
    pub run: Run,
    /// Paragraph version at lookup time.
    pub paragraph_version: u32,
}

impl RunHit {
    /// Whether the paragraph changed since this hit was computed.
    pub fn is_stale(&self, paragraph: &ParagraphData) -> bool {
        paragraph.version() != self.paragraph_version
    }
}

/// A range of the document to replace: `length` characters starting at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// First selected character.
    pub start: DocumentOffset,
    /// Number of selected characters (0 for a caret).
    pub length: usize,
}

impl Selection {
    /// Create a selection from a start offset and a length.
    pub fn new(start: DocumentOffset, length: usize) -> Self {
        Self { start, length }
    }

    /// An empty selection at `offset`.
    pub fn caret(offset: DocumentOffset) -> Self {
        Self::new(offset, 0)
    }

    /// Build a selection from anchor/active offsets in either order.
    pub fn from_offsets(anchor: DocumentOffset, active: DocumentOffset) -> Self {
        let (start, end) = if anchor <= active {
            (anchor, active)
        } else {
            (active, anchor)
        };
        Self::new(start, end.0 - start.0)
    }

    /// Exclusive end offset. Saturates at `usize::MAX`, which no document reaches.
    pub fn end(&self) -> DocumentOffset {
        DocumentOffset(self.start.0.saturating_add(self.length))
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
