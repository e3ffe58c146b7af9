//! Editor facade: a document plus the current caret and selection.

use crate::error::{DocumentError, Result};
use crate::offset::{DocumentOffset, Selection};
use crate::property::DocumentContext;
use crate::run::Run;
use crate::text_run_manager::TextRunManager;

/// A document together with the caret and selection an editing surface works with.
///
/// # Example
///
/// ```rust
/// use rich_text_core::TextEditorCore;
///
/// let mut editor = TextEditorCore::default();
/// editor.edit_and_replace("Hello\r\nWorld").unwrap();
/// editor.select_all();
/// editor.edit_and_replace("Bye").unwrap();
/// assert_eq!(editor.get_text(), "Bye");
/// ```
#[derive(Debug, Default)]
pub struct TextEditorCore {
    text_run_manager: TextRunManager,
    current_caret_offset: DocumentOffset,
    current_selection: Selection,
}

impl TextEditorCore {
    /// Create an empty editor.
    pub fn new(context: DocumentContext) -> Self {
        Self {
            text_run_manager: TextRunManager::new(context),
            current_caret_offset: DocumentOffset::ZERO,
            current_selection: Selection::default(),
        }
    }

    /// The underlying document.
    pub fn text_run_manager(&self) -> &TextRunManager {
        &self.text_run_manager
    }

    /// The underlying document, for edits that bypass caret tracking.
    pub fn text_run_manager_mut(&mut self) -> &mut TextRunManager {
        &mut self.text_run_manager
    }

    /// Caret position.
    pub fn current_caret_offset(&self) -> DocumentOffset {
        self.current_caret_offset
    }

    /// Current selection (empty when only a caret is shown).
    pub fn current_selection(&self) -> Selection {
        self.current_selection
    }

    /// Move the caret, collapsing the selection.
    pub fn set_caret_offset(&mut self, offset: DocumentOffset) -> Result<()> {
        self.check_in_document(offset)?;
        self.current_caret_offset = offset;
        self.current_selection = Selection::caret(offset);
        Ok(())
    }

    /// Select a range; the caret moves to its end.
    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        self.check_in_document(selection.end())?;
        self.current_caret_offset = selection.end();
        self.current_selection = selection;
        Ok(())
    }

    /// Select the whole document.
    pub fn select_all(&mut self) {
        let selection = self.get_all_document_selection();
        self.current_caret_offset = selection.end();
        self.current_selection = selection;
    }

    /// Collapse the selection to the caret.
    pub fn clear_selection(&mut self) {
        self.current_selection = Selection::caret(self.current_caret_offset);
    }

    /// Selection covering the whole document.
    pub fn get_all_document_selection(&self) -> Selection {
        Selection::new(DocumentOffset::ZERO, self.text_run_manager.document_length())
    }

    /// Replace the current selection with text; the caret lands after the inserted text.
    pub fn edit_and_replace(&mut self, text: &str) -> Result<()> {
        let end = self
            .text_run_manager
            .replace_text(self.current_selection, text)?;
        self.collapse_to(end);
        Ok(())
    }

    /// Replace the current selection with a run; the caret lands after it.
    pub fn edit_and_replace_run(&mut self, run: Run) -> Result<()> {
        let end = self.text_run_manager.replace(self.current_selection, run)?;
        self.collapse_to(end);
        Ok(())
    }

    /// Document text.
    pub fn get_text(&self) -> String {
        self.text_run_manager.get_text()
    }

    fn collapse_to(&mut self, offset: DocumentOffset) {
        self.current_caret_offset = offset;
        self.current_selection = Selection::caret(offset);
    }

    fn check_in_document(&self, offset: DocumentOffset) -> Result<()> {
        let document_length = self.text_run_manager.document_length();
        if offset.0 > document_length {
            return Err(DocumentError::OffsetOutOfRange {
                offset,
                document_length,
            });
        }
        Ok(())
    }
}
