use std::ops::Range;

use codespan_reporting::diagnostic::{Diagnostic, Label, Severity};

/// How a Markdown reading of the document disagrees with the block scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingKind {
    NotExtracted,
    Truncated,
    InfoCarried,
    OutsideBlock,
}

/// An audit result with source location information.
#[derive(Debug, Clone)]
pub struct Finding {
    pub kind: FindingKind,
    pub message: String,
    pub span: Range<usize>,
    pub file_id: usize,
    pub notes: Vec<String>,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        message: impl Into<String>,
        span: Range<usize>,
        file_id: usize,
    ) -> Self {
        Finding {
            kind,
            message: message.into(),
            span,
            file_id,
            notes: Vec::new(),
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Convert to a codespan-reporting Diagnostic for display.
    pub fn to_diagnostic(&self) -> Diagnostic<usize> {
        Diagnostic::new(Severity::Warning)
            .with_message(&self.message)
            .with_labels(vec![Label::primary(self.file_id, self.span.clone())])
            .with_notes(self.notes.clone())
    }
}
