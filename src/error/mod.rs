use crate::ast::Span;

use ariadne::{ColorGenerator, Label, Report, ReportKind, Source};
use thiserror::Error;

/// The kind of a compile error. Parser errors are always `Syntax`, resolver
/// errors are always `UnresolvedReference`; the remaining kinds come from the
/// validator and the emitters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ErrorKind {
    #[error("syntax error")]
    Syntax,
    #[error("unresolved reference")]
    UnresolvedReference,
    #[error("duplicate definition")]
    DuplicateDefinition,
    #[error("composition cycle")]
    CompositionCycle,
    #[error("arity mismatch")]
    ArityMismatch,
    #[error("type mismatch")]
    TypeMismatch,
    #[error("unsupported construct")]
    UnsupportedConstruct,
}

impl ErrorKind {
    /// Short code used on rendered reports.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::UnresolvedReference => "unresolved",
            ErrorKind::DuplicateDefinition => "duplicate",
            ErrorKind::CompositionCycle => "cycle",
            ErrorKind::ArityMismatch => "arity",
            ErrorKind::TypeMismatch => "type",
            ErrorKind::UnsupportedConstruct => "unsupported",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("{file}:{}..{}: {kind}: {message}", span.start, span.end)]
pub struct CompileError {
    pub kind: ErrorKind,
    pub message: String,
    pub file: String,
    pub span: Span,
}

impl CompileError {
    pub fn new(kind: ErrorKind, message: String, file: &str, span: Span) -> Self {
        CompileError {
            kind,
            message,
            file: file.to_string(),
            span,
        }
    }

    /// Builds an ariadne report for this error, keyed by the source file name.
    pub fn report(&self) -> Report<'static, (String, Span)> {
        Report::build(
            ReportKind::Error,
            (self.file.clone(), self.span.clone()),
        )
        .with_code(self.kind.code())
        .with_message(self.kind.to_string())
        .with_label(
            Label::new((self.file.clone(), self.span.clone()))
                .with_message(self.message.clone())
                .with_color(ColorGenerator::new().next()),
        )
        .finish()
    }

    /// Prints the rendered report against the given source text.
    pub fn eprint(&self, source: &str) -> std::io::Result<()> {
        self.report()
            .eprint((self.file.clone(), Source::from(source.to_string())))
    }
}

/// How the validator collects semantic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Stop at the first failing check's first error.
    FailFast,
    /// Run every check to completion and return the full set.
    #[default]
    Aggregate,
}
