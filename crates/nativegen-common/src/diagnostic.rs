//! Diagnostics for structural problems found while scanning headers.
//!
//! These never abort a run: the frontend attaches them to its output and the
//! driver logs them. Fatal problems use the error types of the crate that
//! detects them instead.

use crate::source::SourceFile;
use crate::span::Span;
use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};
use thiserror::Error;

/// A skipped or malformed block in a header.
#[derive(Debug, Clone, Error, MietteDiagnostic)]
#[error("{message}")]
#[diagnostic(severity(Warning))]
pub struct Diagnostic {
    pub message: String,
    pub span: Option<Span>,
    #[label(collection)]
    pub labels: Vec<LabeledSpan>,
    #[help]
    pub help: Option<String>,
}

impl Diagnostic {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            span: None,
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Label the primary span. Without a span the label is dropped.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        if let Some(span) = self.span {
            let at = SourceSpan::new((span.start as usize).into(), span.len() as usize);
            self.labels.push(LabeledSpan::new_with_span(Some(label.into()), at));
        }
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Render as a single log line, prefixed with the location in `source`.
    pub fn describe(&self, source: &SourceFile) -> String {
        match self.span {
            Some(span) => format!("{}: {}", source.location(span.start), self.message),
            None => format!("{}: {}", source.path.display(), self.message),
        }
    }
}
