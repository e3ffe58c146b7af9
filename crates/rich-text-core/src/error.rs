//! Error type shared by the document model.

use thiserror::Error;

use crate::offset::{DocumentOffset, ParagraphOffset};
use crate::paragraph::ParagraphId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced while resolving offsets or mutating paragraphs.
pub enum DocumentError {
    #[error("document offset {offset} is beyond the document length {document_length}")]
    /// A document offset lies past the end of the last paragraph.
    OffsetOutOfRange {
        /// The offending offset.
        offset: DocumentOffset,
        /// Document length at the time of the lookup.
        document_length: usize,
    },

    #[error("document offset {offset} falls inside the delimiter after paragraph {paragraph}")]
    /// A document offset points between the two characters of a paragraph delimiter.
    OffsetInsideDelimiter {
        /// The offending offset.
        offset: DocumentOffset,
        /// The paragraph whose delimiter was hit.
        paragraph: ParagraphId,
    },

    #[error("paragraph offset {offset} is beyond the paragraph char count {char_count}")]
    /// A paragraph-local offset lies past the end of the paragraph.
    ParagraphOffsetOutOfRange {
        /// The offending offset.
        offset: ParagraphOffset,
        /// Paragraph char count at the time of the call.
        char_count: usize,
    },

    #[error("paragraph {0} is not part of the document")]
    /// The paragraph was removed from the document (or never added).
    ParagraphNotFound(ParagraphId),

    #[error("cache entry of paragraph {expected} was read against paragraph {actual}")]
    /// A cache entry was handed a paragraph other than the one it was computed for.
    ParagraphMismatch {
        /// Paragraph the entry belongs to.
        expected: ParagraphId,
        /// Paragraph that was passed in.
        actual: ParagraphId,
    },

    #[error("run index {run_index} does not belong to paragraph {paragraph}")]
    /// A run index was used with a paragraph that does not own it.
    RunNotInParagraph {
        /// The paragraph that was queried.
        paragraph: ParagraphId,
        /// The offending run index.
        run_index: usize,
    },

    #[error("run index {index} is out of range (run count {run_count})")]
    /// A run index passed to a mutation is out of range.
    RunIndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of runs in the paragraph.
        run_count: usize,
    },

    #[error("cannot split a run of {count} chars at {index}")]
    /// `split_at` was called with an index that would produce an empty half, or on an atomic run.
    InvalidSplit {
        /// Requested split index.
        index: usize,
        /// Char count of the run.
        count: usize,
    },

    #[error("split replacement does not reproduce the original run")]
    /// The two halves handed to `split_replace` are not a split of the replaced run.
    SplitReplaceMismatch,

    #[error("empty runs cannot be stored in a paragraph")]
    /// A run with zero characters was about to be stored.
    EmptyRun,

    #[error("line breaks cannot be stored in a paragraph")]
    /// A line break marker, or text containing `'\r'` or `'\n'`, was about to be stored
    /// instead of starting a new paragraph.
    LineBreakInParagraph,

    #[error("cache version is already initialized")]
    /// `init_version` was called on a cache entry twice.
    VersionAlreadyInitialized,

    #[error("cache version is not initialized; call init_version first")]
    /// `update_version` was called before `init_version`.
    VersionNotInitialized,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DocumentError>;
