#![warn(missing_docs)]
//! Rich Text Core - Headless Paragraph/Run Document Model
//!
//! # Overview
//!
//! `rich-text-core` models a rich-text document as an ordered list of paragraphs, each built
//! from immutable formatted runs. It resolves document offsets to paragraph offsets, splits and
//! re-merges runs at arbitrary positions, inserts multi-paragraph content in one pass, and keeps
//! a per-paragraph version counter that layout caches compare against to find stale data.
//!
//! It does not measure or render text.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  TextEditorCore (caret + selection)         │  ← Facade
//! ├─────────────────────────────────────────────┤
//! │  TextRunManager (insert / remove / replace) │  ← Mutation entry point
//! ├─────────────────────────────────────────────┤
//! │  ParagraphManager (offset resolution)       │  ← Paragraph list
//! ├─────────────────────────────────────────────┤
//! │  ParagraphData (runs + version)             │  ← Paragraph storage
//! ├─────────────────────────────────────────────┤
//! │  Run (Text / LineBreak / Object)            │  ← Immutable content
//! └─────────────────────────────────────────────┘
//!         ▲
//!         │ version comparison only
//!  LineVisualData / CharRenderData (layout caches)
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use rich_text_core::{DocumentOffset, Run, TextRunManager, DELIMITER_LENGTH};
//!
//! let mut manager = TextRunManager::default();
//! manager.insert(DocumentOffset(0), Run::text("ab\r\ncd")).unwrap();
//!
//! let paragraphs = manager.paragraph_manager().paragraphs();
//! assert_eq!(paragraphs.len(), 2);
//! assert_eq!(paragraphs[0].get_text(), "ab");
//! assert_eq!(paragraphs[1].get_text(), "cd");
//!
//! let second = paragraphs[1].id();
//! let start = manager.paragraph_manager().get_paragraph_start_offset(second).unwrap();
//! assert_eq!(start.get(), 2 + DELIMITER_LENGTH);
//! ```
//!
//! ## Cache Invalidation
//!
//! ```rust
//! use rich_text_core::{DocumentOffset, LineVisualData, ParagraphCache, TextRunManager};
//!
//! let mut manager = TextRunManager::default();
//! manager.insert_text(DocumentOffset(0), "Hello").unwrap();
//!
//! let paragraph = &manager.paragraph_manager().paragraphs()[0];
//! let line = LineVisualData::attach(paragraph, 0, paragraph.run_count()).unwrap();
//! assert!(!line.is_dirty(manager.paragraph_manager()).unwrap());
//!
//! manager.insert_text(DocumentOffset(5), "!").unwrap();
//! assert!(line.is_dirty(manager.paragraph_manager()).unwrap());
//! ```
//!
//! # Module Description
//!
//! - [`run`] - Immutable runs and run splitting
//! - [`offset`] - Document / paragraph / run coordinate types
//! - [`paragraph`] - Paragraph storage and version protocol
//! - [`paragraph_manager`] - Ordered paragraph list and offset resolution
//! - [`text_run_manager`] - Insert / remove / replace
//! - [`splitter`] - Run paragraph splitting
//! - [`cache`] - Layout cache entries
//! - [`editor`] - Caret and selection facade
//!
//! # Concurrency
//!
//! Every mutation takes `&mut self`. Share a document across threads by wrapping the whole
//! [`TextRunManager`] in one lock; one insert touches several paragraphs and must not interleave
//! with another edit.

pub mod cache;
pub mod editor;
pub mod error;
pub mod offset;
pub mod paragraph;
pub mod paragraph_manager;
pub mod property;
pub mod run;
pub mod splitter;
pub mod text_run_manager;

/// Logical width of the delimiter between two paragraphs (`"\r\n"`), on every platform.
pub const DELIMITER_LENGTH: usize = 2;

pub use cache::{CharRenderData, LineVisualData, ParagraphCache, ParagraphLineCache, Point, Size};
pub use editor::TextEditorCore;
pub use error::{DocumentError, Result};
pub use offset::{DocumentOffset, ParagraphOffset, RunHit, Selection};
pub use paragraph::{ParagraphData, ParagraphId, UNINITIALIZED_VERSION};
pub use paragraph_manager::{HitParagraphData, ParagraphManager};
pub use property::{
    DocumentContext, HorizontalAlignment, ParagraphProperty, ParagraphPropertyProvider,
    RunProperty,
};
pub use run::{LineBreakRun, NEW_LINE, ObjectRun, Run, TextRun};
pub use splitter::{LineBreakSplitter, RunParagraphSplitter};
pub use text_run_manager::TextRunManager;
