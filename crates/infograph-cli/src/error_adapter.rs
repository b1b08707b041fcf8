//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error
//! types and miette's rich diagnostic formatting used in the CLI. A JSON
//! syntax error in the input document is reported with a label pointing at
//! the offending line and column.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use infograph::InfographicError;

use crate::{CliError, ConfigError};

/// Adapter for an error in the input document, with its source text.
pub struct DocumentAdapter<'a> {
    err: &'a InfographicError,
    src: &'a str,
}

impl<'a> DocumentAdapter<'a> {
    /// Create a new document adapter.
    pub fn new(err: &'a InfographicError, src: &'a str) -> Self {
        Self { err, src }
    }

    /// The location of the error, when the JSON parser reported one.
    fn span(&self) -> Option<SourceSpan> {
        let InfographicError::InvalidDocument(err) = self.err else {
            return None;
        };
        if err.line() == 0 {
            return None;
        }
        let offset = byte_offset(self.src, err.line(), err.column());
        let length = usize::from(offset < self.src.len());
        Some(SourceSpan::new(offset.into(), length))
    }
}

/// Converts a one-based line and column into a byte offset into `src`.
fn byte_offset(src: &str, line: usize, column: usize) -> usize {
    let line_start: usize = src
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(src.len())
}

impl fmt::Debug for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for DocumentAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for DocumentAdapter<'_> {}

impl MietteDiagnostic for DocumentAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("infograph::document"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a document is a JSON object with `data` and a `design` or a `template`",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span()?;
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for errors without source information.
///
/// This adapter handles configuration, I/O, lookup and rendering errors.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Config(_) => "infograph::config",
            CliError::Read { .. } | CliError::Io(_) => "infograph::io",
            CliError::Document { .. } => "infograph::document",
            CliError::Infographic(err) => match err {
                InfographicError::Io(_) => "infograph::io",
                InfographicError::NotFound { .. } => "infograph::not_found",
                InfographicError::MissingSlot { .. } => "infograph::missing_slot",
                InfographicError::InvalidOptions { .. } => "infograph::options",
                InfographicError::InvalidDocument(_) => "infograph::document",
                InfographicError::UnknownTemplate(_) => "infograph::template",
                InfographicError::Config(_) => "infograph::config",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Infographic(InfographicError::UnknownTemplate(_)) => {
                "run with --list-templates to see the built-in templates"
            }
            CliError::Config(ConfigError::MissingFile(_)) => {
                "check the path passed to --config"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// An error in the input document, with its source text.
    Document(DocumentAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Document(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Document(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Document(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Document(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Document(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Document { src, err, .. } => {
            vec![Reportable::Document(DocumentAdapter::new(err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use infograph::design::Document;

    use super::*;

    fn document_error(src: &str) -> CliError {
        let err = Document::from_json(src).unwrap_err();
        CliError::Document {
            path: "input.json".to_string(),
            src: src.to_string(),
            err,
        }
    }

    #[test]
    fn test_byte_offset() {
        let src = "{\n  \"a\": 1,\n  oops\n}";
        assert_eq!(byte_offset(src, 1, 1), 0);
        assert_eq!(byte_offset(src, 3, 3), 14);
        assert_eq!(byte_offset(src, 99, 99), src.len());
    }

    #[test]
    fn test_syntax_error_is_labeled() {
        let src = "{\n  \"data\": {\n    \"items\": [,]\n  }\n}";
        let err = document_error(src);
        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);

        let Reportable::Document(adapter) = &reportables[0] else {
            panic!("Expected Document");
        };
        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(&src[labels[0].offset()..labels[0].offset() + 1], ",");
    }

    #[test]
    fn test_non_document_error() {
        let err = CliError::Infographic(InfographicError::UnknownTemplate("pie".to_string()));
        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "unknown template `pie`");
                assert!(e.help().is_some());
            }
            Reportable::Document(_) => panic!("Expected Error"),
        }
    }
}
