//! Paragraph storage and the paragraph version protocol.
//!
//! A [`ParagraphData`] owns an ordered list of immutable [`Run`]s. Every structural change to the
//! list bumps the paragraph's version. Cached layout data ([`ParagraphCache`] implementors)
//! remember the version they were computed against and compare it on their next read; nothing
//! is pushed to them when the paragraph changes.
//!
//! # Example
//!
//! ```rust
//! use rich_text_core::{DocumentContext, ParagraphManager, ParagraphOffset, Run};
//!
//! let mut manager = ParagraphManager::new();
//! let mut paragraph = manager.create_paragraph_data(None, &DocumentContext::default());
//! paragraph.append_runs(vec![Run::text("Hello"), Run::text("World")]).unwrap();
//!
//! let tail = paragraph
//!     .split_remove_by_document_offset(ParagraphOffset(7))
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(paragraph.get_text(), "HelloWo");
//! assert_eq!(tail[0].get_text(), "rld");
//! ```

use std::fmt;

use crate::cache::ParagraphCache;
use crate::error::{DocumentError, Result};
use crate::offset::{ParagraphOffset, RunHit};
use crate::property::ParagraphProperty;
use crate::run::{Run, split_run_list};

/// Version value a cache holds before [`ParagraphData::init_version`] is called.
pub const UNINITIALIZED_VERSION: u32 = 0;

/// Stable handle of a paragraph inside one [`ParagraphManager`](crate::ParagraphManager).
///
/// Handles are never reused, so a handle to a removed paragraph simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParagraphId(pub(crate) u64);

impl fmt::Display for ParagraphId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One paragraph: runs, formatting and change version.
#[derive(Debug)]
pub struct ParagraphData {
    id: ParagraphId,
    property: ParagraphProperty,
    runs: Vec<Run>,
    char_count: usize,
    version: u32,
}

impl ParagraphData {
    pub(crate) fn new(id: ParagraphId, property: ParagraphProperty) -> Self {
        Self {
            id,
            property,
            runs: Vec::new(),
            char_count: 0,
            version: 1,
        }
    }

    /// Handle of this paragraph.
    pub fn id(&self) -> ParagraphId {
        self.id
    }

    /// Paragraph formatting.
    pub fn property(&self) -> &ParagraphProperty {
        &self.property
    }

    /// Replace the paragraph formatting. Layout depends on it, so the version is bumped.
    pub fn set_property(&mut self, property: ParagraphProperty) {
        if self.property != property {
            self.property = property;
            self.bump_version();
        }
    }

    /// Read-only view of the runs.
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs.
    pub fn run_count(&self) -> usize {
        self.runs.len()
    }

    /// Number of characters (sum of run counts).
    pub fn char_count(&self) -> usize {
        self.char_count
    }

    /// Whether the paragraph has no characters.
    pub fn is_empty(&self) -> bool {
        self.char_count == 0
    }

    /// Current change version. Never 0.
    pub fn version(&self) -> u32 {
        self.version
    }

    /// Paragraph text.
    pub fn get_text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    /// Append the paragraph text to `out`.
    pub fn push_text(&self, out: &mut String) {
        for run in &self.runs {
            run.push_text(out);
        }
    }

    /// Locate the run containing `offset`.
    ///
    /// `offset` must be strictly inside the paragraph (`offset < char_count`).
    pub fn get_run_index(&self, offset: ParagraphOffset) -> Result<RunHit> {
        let mut start = 0usize;
        for (run_index, run) in self.runs.iter().enumerate() {
            let end = start + run.count();
            if offset.0 < end {
                return Ok(RunHit {
                    run_index,
                    hit_offset: offset.0 - start,
                    run: run.clone(),
                    paragraph_version: self.version,
                });
            }
            start = end;
        }

        Err(DocumentError::ParagraphOffsetOutOfRange {
            offset,
            char_count: self.char_count,
        })
    }

    /// Offset of the first character of the run at `run_index`.
    pub fn get_paragraph_offset(&self, run_index: usize) -> Result<ParagraphOffset> {
        if run_index >= self.runs.len() {
            return Err(DocumentError::RunNotInParagraph {
                paragraph: self.id,
                run_index,
            });
        }
        let offset = self.runs[..run_index].iter().map(Run::count).sum();
        Ok(ParagraphOffset(offset))
    }

    /// Detach everything from `offset` to the end of the paragraph.
    ///
    /// Returns `None` when `offset` is the paragraph end. Otherwise the run containing `offset`
    /// is cut in two when needed; the left half stays, the right half leads the returned list.
    /// The paragraph's runs followed by the returned runs always reproduce the original text.
    pub fn split_remove_by_document_offset(
        &mut self,
        offset: ParagraphOffset,
    ) -> Result<Option<Vec<Run>>> {
        if offset.0 == self.char_count {
            return Ok(None);
        }

        let hit = self.get_run_index(offset)?;
        let halves = match hit.hit_offset {
            0 => None,
            at => Some(hit.run.split_at(at)?),
        };

        let mut tail = self.runs.split_off(hit.run_index);
        if let Some((first, second)) = halves {
            self.runs.push(first);
            tail[0] = second;
        }

        self.recount();
        self.bump_version();
        tracing::trace!(
            paragraph = %self.id,
            %offset,
            tail_runs = tail.len(),
            "split paragraph"
        );
        Ok(Some(tail))
    }

    /// Insert `run` so that its first character lands at `offset`.
    pub fn insert_run(&mut self, offset: ParagraphOffset, run: Run) -> Result<()> {
        validate_storable(&run)?;
        if offset.0 > self.char_count {
            return Err(DocumentError::ParagraphOffsetOutOfRange {
                offset,
                char_count: self.char_count,
            });
        }

        if offset.0 == self.char_count {
            self.runs.push(run);
        } else {
            let (mut left, right) = split_run_list(&self.runs, offset.0)?;
            left.push(run);
            left.extend(right);
            self.runs = left;
        }

        self.recount();
        self.bump_version();
        Ok(())
    }

    /// Append one run.
    pub fn append_run(&mut self, run: Run) -> Result<()> {
        validate_storable(&run)?;
        self.runs.push(run);
        self.recount();
        self.bump_version();
        Ok(())
    }

    /// Append several runs, bumping the version once for the whole batch.
    ///
    /// Nothing is appended if any run is not storable.
    pub fn append_runs(&mut self, runs: Vec<Run>) -> Result<()> {
        if runs.is_empty() {
            return Ok(());
        }
        runs.iter().try_for_each(validate_storable)?;

        self.runs.extend(runs);
        self.recount();
        self.bump_version();
        Ok(())
    }

    /// Replace the run at `index` by `first` followed by `second`.
    ///
    /// Layout uses this to break a run at a line end. The two halves must be a split of the
    /// replaced run, so the paragraph text does not change.
    pub fn split_replace(&mut self, index: usize, first: Run, second: Run) -> Result<()> {
        let Some(old) = self.runs.get(index) else {
            return Err(DocumentError::RunIndexOutOfRange {
                index,
                run_count: self.runs.len(),
            });
        };
        validate_storable(&first)?;
        validate_storable(&second)?;

        let mut joined = first.get_text();
        second.push_text(&mut joined);
        if first.count() + second.count() != old.count() || joined != old.get_text() {
            return Err(DocumentError::SplitReplaceMismatch);
        }

        self.runs[index] = first;
        self.runs.insert(index + 1, second);
        self.bump_version();
        Ok(())
    }

    /// Remove the characters in `start..end`.
    pub fn remove_range(&mut self, start: ParagraphOffset, end: ParagraphOffset) -> Result<()> {
        if end.0 > self.char_count {
            return Err(DocumentError::ParagraphOffsetOutOfRange {
                offset: end,
                char_count: self.char_count,
            });
        }
        if start.0 >= end.0 {
            return Ok(());
        }

        let (mut left, rest) = split_run_list(&self.runs, start.0)?;
        let (_, right) = split_run_list(&rest, end.0 - start.0)?;
        left.extend(right);
        self.runs = left;

        self.recount();
        self.bump_version();
        Ok(())
    }

    /// Record the current version in a freshly created cache entry.
    pub fn init_version(&self, cache: &mut impl ParagraphCache) -> Result<()> {
        if cache.current_paragraph_version() != UNINITIALIZED_VERSION {
            return Err(DocumentError::VersionAlreadyInitialized);
        }
        cache.set_current_paragraph_version(self.version);
        Ok(())
    }

    /// Mark a cache entry as up to date with the current version.
    pub fn update_version(&self, cache: &mut impl ParagraphCache) -> Result<()> {
        if cache.current_paragraph_version() == UNINITIALIZED_VERSION {
            return Err(DocumentError::VersionNotInitialized);
        }
        cache.set_current_paragraph_version(self.version);
        Ok(())
    }

    /// Whether a cache entry was computed against an older (or foreign) version.
    pub fn is_invalid_version(&self, cache: &impl ParagraphCache) -> bool {
        cache.current_paragraph_version() != self.version
    }

    fn recount(&mut self) {
        self.char_count = self.runs.iter().map(Run::count).sum();
    }

    fn bump_version(&mut self) {
        self.version = match self.version.wrapping_add(1) {
            0 => 1,
            v => v,
        };
        tracing::trace!(paragraph = %self.id, version = self.version, "paragraph version bumped");
    }
}

fn validate_storable(run: &Run) -> Result<()> {
    let has_break = match run {
        Run::LineBreak(_) => true,
        Run::Text(text) => text.text().contains(['\r', '\n']),
        Run::Object(_) => false,
    };
    if has_break {
        return Err(DocumentError::LineBreakInParagraph);
    }
    if run.is_empty() {
        return Err(DocumentError::EmptyRun);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::LineVisualData;
    use pretty_assertions::assert_eq;

    fn paragraph(texts: &[&str]) -> ParagraphData {
        let mut paragraph = ParagraphData::new(ParagraphId(1), ParagraphProperty::default());
        paragraph
            .append_runs(texts.iter().map(|t| Run::text(t)).collect())
            .unwrap();
        paragraph
    }

    fn run_texts(runs: &[Run]) -> Vec<String> {
        runs.iter().map(Run::get_text).collect()
    }

    #[test]
    fn test_split_remove_mid_run() {
        let mut p = paragraph(&["Hello", "World"]);
        let tail = p
            .split_remove_by_document_offset(ParagraphOffset(7))
            .unwrap()
            .unwrap();
        assert_eq!(run_texts(p.runs()), vec!["Hello", "Wo"]);
        assert_eq!(run_texts(&tail), vec!["rld"]);
        assert_eq!(p.char_count(), 7);
    }

    #[test]
    fn test_split_remove_on_run_boundary() {
        let mut p = paragraph(&["Hello", "World"]);
        let tail = p
            .split_remove_by_document_offset(ParagraphOffset(5))
            .unwrap()
            .unwrap();
        assert_eq!(run_texts(p.runs()), vec!["Hello"]);
        assert_eq!(run_texts(&tail), vec!["World"]);
    }

    #[test]
    fn test_split_remove_at_end_is_noop() {
        let mut p = paragraph(&["Hello"]);
        let version = p.version();
        assert_eq!(
            p.split_remove_by_document_offset(ParagraphOffset(5)),
            Ok(None)
        );
        assert_eq!(p.version(), version);
    }

    #[test]
    fn test_split_remove_at_start_takes_everything() {
        let mut p = paragraph(&["ab", "cd"]);
        let tail = p
            .split_remove_by_document_offset(ParagraphOffset(0))
            .unwrap()
            .unwrap();
        assert!(p.runs().is_empty());
        assert_eq!(p.char_count(), 0);
        assert_eq!(run_texts(&tail), vec!["ab", "cd"]);
    }

    #[test]
    fn test_split_remove_past_end_fails() {
        let mut p = paragraph(&["ab"]);
        assert_eq!(
            p.split_remove_by_document_offset(ParagraphOffset(3)),
            Err(DocumentError::ParagraphOffsetOutOfRange {
                offset: ParagraphOffset(3),
                char_count: 2,
            })
        );
    }

    #[test]
    fn test_get_run_index() {
        let p = paragraph(&["Hello", "World"]);
        let hit = p.get_run_index(ParagraphOffset(7)).unwrap();
        assert_eq!(hit.run_index, 1);
        assert_eq!(hit.hit_offset, 2);
        assert_eq!(hit.run.get_text(), "World");
        assert_eq!(hit.paragraph_version, p.version());
        assert!(!hit.is_stale(&p));

        let hit = p.get_run_index(ParagraphOffset(5)).unwrap();
        assert_eq!((hit.run_index, hit.hit_offset), (1, 0));
        assert!(p.get_run_index(ParagraphOffset(10)).is_err());
    }

    #[test]
    fn test_run_hit_goes_stale_after_mutation() {
        let mut p = paragraph(&["Hello"]);
        let hit = p.get_run_index(ParagraphOffset(1)).unwrap();
        p.append_run(Run::text("!")).unwrap();
        assert!(hit.is_stale(&p));
    }

    #[test]
    fn test_get_paragraph_offset() {
        let p = paragraph(&["ab", "cde", "f"]);
        assert_eq!(p.get_paragraph_offset(0).unwrap(), ParagraphOffset(0));
        assert_eq!(p.get_paragraph_offset(2).unwrap(), ParagraphOffset(5));
        assert_eq!(
            p.get_paragraph_offset(3),
            Err(DocumentError::RunNotInParagraph {
                paragraph: ParagraphId(1),
                run_index: 3,
            })
        );
    }

    #[test]
    fn test_insert_run_in_middle() {
        let mut p = paragraph(&["Hello", "World"]);
        p.insert_run(ParagraphOffset(7), Run::text("--")).unwrap();
        assert_eq!(p.get_text(), "HelloWo--rld");
        assert_eq!(run_texts(p.runs()), vec!["Hello", "Wo", "--", "rld"]);
        assert_eq!(p.char_count(), 12);
    }

    #[test]
    fn test_insert_run_at_end_and_past_end() {
        let mut p = paragraph(&["ab"]);
        p.insert_run(ParagraphOffset(2), Run::text("c")).unwrap();
        assert_eq!(p.get_text(), "abc");
        assert!(p.insert_run(ParagraphOffset(9), Run::text("x")).is_err());
    }

    #[test]
    fn test_append_runs_bumps_version_once() {
        let mut p = paragraph(&[]);
        let before = p.version();
        p.append_runs(vec![Run::text("a"), Run::text("b"), Run::text("c")])
            .unwrap();
        assert_eq!(p.version(), before + 1);
        assert_eq!(p.char_count(), 3);
    }

    #[test]
    fn test_unstorable_runs_are_rejected() {
        let mut p = paragraph(&["a"]);
        let version = p.version();
        assert_eq!(p.append_run(Run::text("")), Err(DocumentError::EmptyRun));
        assert_eq!(
            p.append_runs(vec![Run::text("b"), Run::line_break()]),
            Err(DocumentError::LineBreakInParagraph)
        );
        assert_eq!(p.get_text(), "a");
        assert_eq!(p.version(), version);
    }

    #[test]
    fn test_text_with_line_break_characters_is_rejected() {
        let mut p = paragraph(&["ab"]);
        let version = p.version();
        for text in ["a\r\nb", "x\n", "\ry"] {
            assert_eq!(
                p.append_run(Run::text(text)),
                Err(DocumentError::LineBreakInParagraph)
            );
            assert_eq!(
                p.insert_run(ParagraphOffset(1), Run::text(text)),
                Err(DocumentError::LineBreakInParagraph)
            );
        }
        assert_eq!(
            p.split_replace(0, Run::text("a\r"), Run::text("\nb")),
            Err(DocumentError::LineBreakInParagraph)
        );
        assert_eq!(p.get_text(), "ab");
        assert_eq!(p.char_count(), 2);
        assert_eq!(p.version(), version);
    }

    #[test]
    fn test_split_replace() {
        let mut p = paragraph(&["Hello", "World"]);
        let before = p.version();
        let (first, second) = p.runs()[1].split_at(3).unwrap();
        p.split_replace(1, first, second).unwrap();
        assert_eq!(run_texts(p.runs()), vec!["Hello", "Wor", "ld"]);
        assert_eq!(p.get_text(), "HelloWorld");
        assert!(p.version() > before);
    }

    #[test]
    fn test_split_replace_rejects_foreign_halves() {
        let mut p = paragraph(&["Hello"]);
        assert_eq!(
            p.split_replace(0, Run::text("He"), Run::text("xyz")),
            Err(DocumentError::SplitReplaceMismatch)
        );
        assert!(matches!(
            p.split_replace(4, Run::text("a"), Run::text("b")),
            Err(DocumentError::RunIndexOutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn test_remove_range_across_runs() {
        let mut p = paragraph(&["Hello", "World"]);
        p.remove_range(ParagraphOffset(3), ParagraphOffset(7)).unwrap();
        assert_eq!(p.get_text(), "Helrld");
        assert_eq!(p.char_count(), 6);
    }

    #[test]
    fn test_version_wraps_to_one() {
        let mut p = paragraph(&["a"]);
        p.version = u32::MAX;
        p.append_run(Run::text("b")).unwrap();
        assert_eq!(p.version(), 1);
    }

    #[test]
    fn test_version_protocol() {
        let mut p = paragraph(&["a"]);
        let mut line = LineVisualData::new(p.id(), 0, 1);

        assert_eq!(
            p.update_version(&mut line),
            Err(DocumentError::VersionNotInitialized)
        );
        p.init_version(&mut line).unwrap();
        assert!(!p.is_invalid_version(&line));
        assert_eq!(
            p.init_version(&mut line),
            Err(DocumentError::VersionAlreadyInitialized)
        );

        p.append_run(Run::text("b")).unwrap();
        assert!(p.is_invalid_version(&line));
        p.update_version(&mut line).unwrap();
        assert!(!p.is_invalid_version(&line));
    }
}
