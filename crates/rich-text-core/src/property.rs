//! Formatting properties and document defaults.

use std::sync::Arc;

/// Default font size (in points) for new runs.
pub const DEFAULT_FONT_SIZE: u32 = 15;

/// Formatting shared by every character of a run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RunProperty {
    /// Font family name.
    pub font_name: Arc<str>,
    /// Font size in points.
    pub font_size: u32,
    /// Bold weight
    pub bold: bool,
    /// Italic style
    pub italic: bool,
    /// Underline decoration
    pub underline: bool,
    /// Foreground color as `0xRRGGBBAA`.
    pub foreground: u32,
}

impl Default for RunProperty {
    fn default() -> Self {
        Self {
            font_name: Arc::from("sans-serif"),
            font_size: DEFAULT_FONT_SIZE,
            bold: false,
            italic: false,
            underline: false,
            foreground: 0x0000_00FF,
        }
    }
}

impl RunProperty {
    /// Same property with a different font size.
    pub fn with_font_size(mut self, font_size: u32) -> Self {
        self.font_size = font_size;
        self
    }

    /// Same property with bold toggled on or off.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    /// Same property with italic toggled on or off.
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }
}

/// Horizontal alignment of a paragraph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlignment {
    /// Align to the start edge.
    #[default]
    Left,
    /// Center between both edges.
    Center,
    /// Align to the end edge.
    Right,
}

/// Formatting shared by a whole paragraph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ParagraphProperty {
    /// Horizontal alignment
    pub alignment: HorizontalAlignment,
    /// First-line indent in layout units.
    pub indent: u32,
    /// Extra space between lines, in percent of the line height (0 = single spacing).
    pub line_spacing_percent: u32,
}

/// Source of the property used when a paragraph is created without an explicit one.
pub trait ParagraphPropertyProvider {
    /// Property for paragraphs created without an explicit property.
    fn current_paragraph_property(&self) -> ParagraphProperty;
}

/// Per-document defaults handed to the managers at construction time.
///
/// # Example
///
/// ```rust
/// use rich_text_core::{DocumentContext, HorizontalAlignment, ParagraphProperty};
///
/// let context = DocumentContext::default().with_paragraph_property(ParagraphProperty {
///     alignment: HorizontalAlignment::Center,
///     ..Default::default()
/// });
/// assert_eq!(context.paragraph_property().alignment, HorizontalAlignment::Center);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentContext {
    paragraph_property: ParagraphProperty,
    run_property: RunProperty,
}

impl DocumentContext {
    /// Set the paragraph property used for new paragraphs.
    pub fn with_paragraph_property(mut self, property: ParagraphProperty) -> Self {
        self.paragraph_property = property;
        self
    }

    /// Set the run property used for plain-text insertion.
    pub fn with_run_property(mut self, property: RunProperty) -> Self {
        self.run_property = property;
        self
    }

    /// Current paragraph property.
    pub fn paragraph_property(&self) -> &ParagraphProperty {
        &self.paragraph_property
    }

    /// Current run property.
    pub fn run_property(&self) -> &RunProperty {
        &self.run_property
    }

    /// Replace the current paragraph property.
    pub fn set_paragraph_property(&mut self, property: ParagraphProperty) {
        self.paragraph_property = property;
    }

    /// Replace the current run property.
    pub fn set_run_property(&mut self, property: RunProperty) {
        self.run_property = property;
    }
}

impl ParagraphPropertyProvider for DocumentContext {
    fn current_paragraph_property(&self) -> ParagraphProperty {
        self.paragraph_property.clone()
    }
}
