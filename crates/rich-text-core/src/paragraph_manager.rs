//! Paragraph list and document offset resolution.
//!
//! The [`ParagraphManager`] owns every paragraph of one document in reading order. A paragraph's
//! document start offset is the sum of `char_count + DELIMITER_LENGTH` over the paragraphs before
//! it, where [`DELIMITER_LENGTH`] is 2 on every platform.
//!
//! ```text
//! "123" \r\n "45"
//!  0..3  3..5  5..7      start of paragraph 2 = 3 + 2 = 5
//! ```

use crate::error::{DocumentError, Result};
use crate::offset::{DocumentOffset, ParagraphOffset};
use crate::paragraph::{ParagraphData, ParagraphId};
use crate::property::{ParagraphProperty, ParagraphPropertyProvider};
use crate::run::NEW_LINE;
use crate::DELIMITER_LENGTH;

/// Result of resolving a document offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitParagraphData {
    /// The offset that was resolved.
    pub offset: DocumentOffset,
    /// Paragraph containing the offset.
    pub paragraph: ParagraphId,
    /// Position of the paragraph in the document.
    pub paragraph_index: usize,
    /// Offset inside the paragraph.
    pub hit_offset: ParagraphOffset,
}

/// Ordered paragraphs of one document.
#[derive(Debug)]
pub struct ParagraphManager {
    paragraphs: Vec<ParagraphData>,
    next_id: u64,
}

impl Default for ParagraphManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ParagraphManager {
    /// Create a document without paragraphs. The first lookup creates one.
    pub fn new() -> Self {
        Self {
            paragraphs: Vec::new(),
            next_id: 1,
        }
    }

    /// Resolve a document offset, creating the first paragraph if the document has none.
    ///
    /// Offset 0 always resolves to the first paragraph. Offsets past the end of the document
    /// fail with [`DocumentError::OffsetOutOfRange`]; offsets between the two characters of a
    /// delimiter fail with [`DocumentError::OffsetInsideDelimiter`].
    pub fn get_hit_paragraph_data(
        &mut self,
        offset: DocumentOffset,
        provider: &impl ParagraphPropertyProvider,
    ) -> Result<HitParagraphData> {
        if self.paragraphs.is_empty() {
            let paragraph = self.create_paragraph_data(None, provider);
            tracing::debug!(paragraph = %paragraph.id(), "created first paragraph");
            self.paragraphs.push(paragraph);
        }
        self.hit_test(offset)
    }

    /// Resolve a document offset without creating paragraphs.
    pub fn hit_test(&self, offset: DocumentOffset) -> Result<HitParagraphData> {
        if offset.0 == 0
            && let Some(first) = self.paragraphs.first()
        {
            return Ok(HitParagraphData {
                offset,
                paragraph: first.id(),
                paragraph_index: 0,
                hit_offset: ParagraphOffset::ZERO,
            });
        }

        let last_index = self.paragraphs.len().saturating_sub(1);
        let mut start = 0usize;
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            let char_count = paragraph.char_count();
            let end = start + char_count + DELIMITER_LENGTH;
            if offset.0 < end {
                let local = offset.0 - start;
                if local > char_count {
                    if index == last_index {
                        break;
                    }
                    return Err(DocumentError::OffsetInsideDelimiter {
                        offset,
                        paragraph: paragraph.id(),
                    });
                }
                return Ok(HitParagraphData {
                    offset,
                    paragraph: paragraph.id(),
                    paragraph_index: index,
                    hit_offset: ParagraphOffset(local),
                });
            }
            start = end;
        }

        Err(DocumentError::OffsetOutOfRange {
            offset,
            document_length: self.document_length(),
        })
    }

    /// Create a detached paragraph. Without an explicit property, the provider's current
    /// paragraph property is used.
    pub fn create_paragraph_data(
        &mut self,
        property: Option<ParagraphProperty>,
        provider: &impl ParagraphPropertyProvider,
    ) -> ParagraphData {
        let property = property.unwrap_or_else(|| provider.current_paragraph_property());
        let id = ParagraphId(self.next_id);
        self.next_id += 1;
        ParagraphData::new(id, property)
    }

    /// Append a paragraph at the end of the document.
    pub fn push_paragraph(&mut self, paragraph: ParagraphData) {
        self.paragraphs.push(paragraph);
    }

    /// Insert `paragraph` right after `existing`.
    pub fn insert_paragraph_after(
        &mut self,
        existing: ParagraphId,
        paragraph: ParagraphData,
    ) -> Result<()> {
        let index = self
            .index_of(existing)
            .ok_or(DocumentError::ParagraphNotFound(existing))?;
        tracing::debug!(after = %existing, paragraph = %paragraph.id(), "inserted paragraph");
        self.paragraphs.insert(index + 1, paragraph);
        Ok(())
    }

    /// Remove the paragraphs after `after`, up to and including `through`.
    ///
    /// Removed paragraphs are returned; their ids no longer resolve.
    pub fn remove_paragraphs_after(
        &mut self,
        after: ParagraphId,
        through: ParagraphId,
    ) -> Result<Vec<ParagraphData>> {
        let first = self
            .index_of(after)
            .ok_or(DocumentError::ParagraphNotFound(after))?;
        let last = self
            .index_of(through)
            .ok_or(DocumentError::ParagraphNotFound(through))?;
        if last <= first {
            return Ok(Vec::new());
        }

        let removed: Vec<ParagraphData> = self.paragraphs.drain(first + 1..=last).collect();
        tracing::debug!(after = %after, removed = removed.len(), "removed paragraphs");
        Ok(removed)
    }

    /// Document offset of the first character of a paragraph.
    ///
    /// Fails with [`DocumentError::ParagraphNotFound`] once the paragraph was removed.
    pub fn get_paragraph_start_offset(&self, id: ParagraphId) -> Result<DocumentOffset> {
        let mut offset = 0usize;
        for paragraph in &self.paragraphs {
            if paragraph.id() == id {
                return Ok(DocumentOffset(offset));
            }
            offset += paragraph.char_count() + DELIMITER_LENGTH;
        }
        Err(DocumentError::ParagraphNotFound(id))
    }

    /// Look up a paragraph.
    pub fn paragraph(&self, id: ParagraphId) -> Result<&ParagraphData> {
        self.paragraphs
            .iter()
            .find(|p| p.id() == id)
            .ok_or(DocumentError::ParagraphNotFound(id))
    }

    /// Look up a paragraph for mutation.
    pub fn paragraph_mut(&mut self, id: ParagraphId) -> Result<&mut ParagraphData> {
        self.paragraphs
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or(DocumentError::ParagraphNotFound(id))
    }

    /// Whether the paragraph is still part of the document.
    pub fn contains(&self, id: ParagraphId) -> bool {
        self.index_of(id).is_some()
    }

    /// Position of a paragraph in reading order.
    pub fn index_of(&self, id: ParagraphId) -> Option<usize> {
        self.paragraphs.iter().position(|p| p.id() == id)
    }

    /// All paragraphs in reading order.
    pub fn paragraphs(&self) -> &[ParagraphData] {
        &self.paragraphs
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Total length in document offsets (delimiters included).
    pub fn document_length(&self) -> usize {
        let chars: usize = self.paragraphs.iter().map(ParagraphData::char_count).sum();
        chars + self.paragraphs.len().saturating_sub(1) * DELIMITER_LENGTH
    }

    /// Document text, paragraphs joined by `"\r\n"`.
    pub fn get_text(&self) -> String {
        let mut out = String::new();
        for (index, paragraph) in self.paragraphs.iter().enumerate() {
            if index > 0 {
                out.push_str(NEW_LINE);
            }
            paragraph.push_text(&mut out);
        }
        out
    }
}
