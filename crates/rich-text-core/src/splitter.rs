//! Run paragraph splitting.
//!
//! Inserted content may span several paragraphs. A [`RunParagraphSplitter`] turns one run into
//! an ordered sequence of sub-runs where every paragraph boundary is a
//! [`Run::LineBreak`]. The default [`LineBreakSplitter`] treats `"\r\n"`, `"\n"` and `"\r"` as
//! boundaries.

use std::sync::Arc;

use crate::property::RunProperty;
use crate::run::{Run, TextRun};

/// Splits one run into sub-runs at paragraph boundaries.
///
/// Implementations must preserve the text: concatenating the text of the yielded runs gives
/// the text of the input (with every boundary rendered as a line break). They must not yield
/// empty text runs. The returned iterator is single-pass.
pub trait RunParagraphSplitter {
    /// Split `run` lazily.
    fn split<'a>(&'a self, run: Run) -> Box<dyn Iterator<Item = Run> + 'a>;
}

/// Default splitter recognizing CRLF, LF and CR line breaks inside text runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineBreakSplitter;

impl RunParagraphSplitter for LineBreakSplitter {
    fn split<'a>(&'a self, run: Run) -> Box<dyn Iterator<Item = Run> + 'a> {
        match run {
            Run::Text(text_run) => Box::new(LineBreakSplit::new(text_run)),
            other => Box::new(std::iter::once(other)),
        }
    }
}

/// Iterator returned by [`LineBreakSplitter`] for text runs.
#[derive(Debug)]
struct LineBreakSplit {
    text: Arc<str>,
    property: RunProperty,
    /// Byte position of the next unread character.
    pos: usize,
    pending_break: bool,
}

impl LineBreakSplit {
    fn new(run: TextRun) -> Self {
        Self {
            text: Arc::from(run.text()),
            property: run.property().clone(),
            pos: 0,
            pending_break: false,
        }
    }
}

impl Iterator for LineBreakSplit {
    type Item = Run;

    fn next(&mut self) -> Option<Run> {
        if self.pending_break {
            self.pending_break = false;
            return Some(Run::line_break());
        }

        if self.pos >= self.text.len() {
            return None;
        }

        let rest = &self.text[self.pos..];
        let Some(found) = rest.find(['\r', '\n']) else {
            self.pos = self.text.len();
            return Some(Run::Text(TextRun::new(rest, self.property.clone())));
        };

        let break_len = if rest[found..].starts_with("\r\n") { 2 } else { 1 };
        let segment = &rest[..found];
        self.pos += found + break_len;

        if segment.is_empty() {
            Some(Run::line_break())
        } else {
            self.pending_break = true;
            Some(Run::Text(TextRun::new(segment, self.property.clone())))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::RunProperty;
    use crate::run::ObjectRun;

    fn describe(runs: impl Iterator<Item = Run>) -> Vec<String> {
        runs.map(|run| match run {
            Run::LineBreak(_) => "<br>".to_string(),
            other => other.get_text(),
        })
        .collect()
    }

    #[test]
    fn test_split_crlf() {
        let splitter = LineBreakSplitter;
        let parts = describe(splitter.split(Run::text("ab\r\ncd")));
        assert_eq!(parts, vec!["ab", "<br>", "cd"]);
    }

    #[test]
    fn test_split_mixed_and_consecutive_breaks() {
        let splitter = LineBreakSplitter;
        let parts = describe(splitter.split(Run::text("a\n\rb\r\n\r\n")));
        assert_eq!(parts, vec!["a", "<br>", "<br>", "b", "<br>", "<br>"]);
    }

    #[test]
    fn test_split_without_breaks_yields_original_text() {
        let splitter = LineBreakSplitter;
        let parts = describe(splitter.split(Run::text("plain")));
        assert_eq!(parts, vec!["plain"]);
    }

    #[test]
    fn test_split_empty_text_yields_nothing() {
        let splitter = LineBreakSplitter;
        assert_eq!(splitter.split(Run::text("")).count(), 0);
    }

    #[test]
    fn test_split_keeps_property() {
        let property = RunProperty::default().with_bold(true);
        let splitter = LineBreakSplitter;
        let runs: Vec<Run> = splitter
            .split(Run::Text(TextRun::new("x\ny", property.clone())))
            .collect();
        assert_eq!(runs[0].property(), Some(&property));
        assert_eq!(runs[2].property(), Some(&property));
    }

    #[test]
    fn test_non_text_runs_pass_through() {
        let splitter = LineBreakSplitter;
        let object = Run::Object(ObjectRun::new("image", RunProperty::default()));
        let runs: Vec<Run> = splitter.split(object.clone()).collect();
        assert_eq!(runs, vec![object]);
    }
}
