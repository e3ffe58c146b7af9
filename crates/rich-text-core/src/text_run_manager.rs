//! Document mutation entry point.
//!
//! [`TextRunManager`] turns "replace this selection with that run" into paragraph operations:
//!
//! 1. resolve the offset to a paragraph and a paragraph offset,
//! 2. detach the runs after the insertion point (the tail),
//! 3. walk the splitter output, opening a new paragraph at every line break,
//! 4. re-append the tail to whichever paragraph is current at the end.
//!
//! The tail is captured once and re-attached once, so text after the insertion point is never
//! lost or duplicated.

use std::fmt;

use crate::error::Result;
use crate::offset::{DocumentOffset, Selection};
use crate::paragraph_manager::ParagraphManager;
use crate::property::DocumentContext;
use crate::run::{Run, TextRun};
use crate::splitter::{LineBreakSplitter, RunParagraphSplitter};

/// Owns the paragraphs of a document and applies edits to them.
pub struct TextRunManager {
    paragraph_manager: ParagraphManager,
    context: DocumentContext,
    splitter: Box<dyn RunParagraphSplitter>,
}

impl fmt::Debug for TextRunManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextRunManager")
            .field("paragraph_manager", &self.paragraph_manager)
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

impl Default for TextRunManager {
    fn default() -> Self {
        Self::new(DocumentContext::default())
    }
}

impl TextRunManager {
    /// Create an empty document using the default line-break splitter.
    pub fn new(context: DocumentContext) -> Self {
        Self::with_splitter(context, LineBreakSplitter)
    }

    /// Create an empty document with a custom splitter.
    pub fn with_splitter(
        context: DocumentContext,
        splitter: impl RunParagraphSplitter + 'static,
    ) -> Self {
        Self {
            paragraph_manager: ParagraphManager::new(),
            context,
            splitter: Box::new(splitter),
        }
    }

    /// Replace the splitter used by subsequent inserts.
    pub fn set_splitter(&mut self, splitter: impl RunParagraphSplitter + 'static) {
        self.splitter = Box::new(splitter);
    }

    /// The paragraphs of the document.
    pub fn paragraph_manager(&self) -> &ParagraphManager {
        &self.paragraph_manager
    }

    /// Mutable access for layout consumers (e.g. [`split_replace`](crate::ParagraphData::split_replace)).
    pub fn paragraph_manager_mut(&mut self) -> &mut ParagraphManager {
        &mut self.paragraph_manager
    }

    /// Document defaults.
    pub fn context(&self) -> &DocumentContext {
        &self.context
    }

    /// Mutable document defaults.
    pub fn context_mut(&mut self) -> &mut DocumentContext {
        &mut self.context
    }

    /// Remove the selected range (if any), then insert `run` at the selection start.
    ///
    /// Returns the document offset right after the inserted content.
    pub fn replace(&mut self, selection: Selection, run: Run) -> Result<DocumentOffset> {
        if !selection.is_empty() {
            self.remove(selection)?;
        }
        self.insert(selection.start, run)
    }

    /// [`replace`](Self::replace) with plain text in the current run property.
    pub fn replace_text(&mut self, selection: Selection, text: &str) -> Result<DocumentOffset> {
        let run = Run::Text(TextRun::new(text, self.context.run_property().clone()));
        self.replace(selection, run)
    }

    /// Insert `run` at `offset`, creating a paragraph for every line break it contains.
    ///
    /// Returns the document offset right after the inserted content.
    pub fn insert(&mut self, offset: DocumentOffset, run: Run) -> Result<DocumentOffset> {
        let hit = self
            .paragraph_manager
            .get_hit_paragraph_data(offset, &self.context)?;
        let hit_paragraph = self.paragraph_manager.paragraph_mut(hit.paragraph)?;
        let property = hit_paragraph.property().clone();
        let tail = hit_paragraph.split_remove_by_document_offset(hit.hit_offset)?;

        let mut current = hit.paragraph;
        let mut inserted = 0usize;
        let mut created = 0usize;
        for sub_run in self.splitter.split(run) {
            inserted += sub_run.count();
            if sub_run.is_line_break() {
                let paragraph = self
                    .paragraph_manager
                    .create_paragraph_data(Some(property.clone()), &self.context);
                let id = paragraph.id();
                self.paragraph_manager
                    .insert_paragraph_after(current, paragraph)?;
                current = id;
                created += 1;
            } else {
                self.paragraph_manager
                    .paragraph_mut(current)?
                    .append_run(sub_run)?;
            }
        }

        if let Some(tail) = tail {
            self.paragraph_manager
                .paragraph_mut(current)?
                .append_runs(tail)?;
        }

        tracing::debug!(%offset, inserted, created, "inserted run");
        Ok(DocumentOffset(offset.0 + inserted))
    }

    /// [`insert`](Self::insert) plain text in the current run property.
    pub fn insert_text(&mut self, offset: DocumentOffset, text: &str) -> Result<DocumentOffset> {
        self.replace_text(Selection::caret(offset), text)
    }

    /// Remove the selected range, merging paragraphs when it crosses delimiters.
    ///
    /// Both ends must resolve to character positions; an end inside a delimiter or past the
    /// document end is an error and nothing is changed.
    pub fn remove(&mut self, selection: Selection) -> Result<()> {
        if selection.is_empty() {
            return Ok(());
        }

        let start = self.paragraph_manager.hit_test(selection.start)?;
        let end = self.paragraph_manager.hit_test(selection.end())?;

        if start.paragraph == end.paragraph {
            self.paragraph_manager
                .paragraph_mut(start.paragraph)?
                .remove_range(start.hit_offset, end.hit_offset)?;
        } else {
            let kept = self
                .paragraph_manager
                .paragraph_mut(end.paragraph)?
                .split_remove_by_document_offset(end.hit_offset)?;
            self.paragraph_manager
                .paragraph_mut(start.paragraph)?
                .split_remove_by_document_offset(start.hit_offset)?;
            self.paragraph_manager
                .remove_paragraphs_after(start.paragraph, end.paragraph)?;
            if let Some(kept) = kept {
                self.paragraph_manager
                    .paragraph_mut(start.paragraph)?
                    .append_runs(kept)?;
            }
        }

        tracing::debug!(start = %selection.start, length = selection.length, "removed range");
        Ok(())
    }

    /// Document length in document offsets.
    pub fn document_length(&self) -> usize {
        self.paragraph_manager.document_length()
    }

    /// Document text, paragraphs joined by `"\r\n"`.
    pub fn get_text(&self) -> String {
        self.paragraph_manager.get_text()
    }
}
