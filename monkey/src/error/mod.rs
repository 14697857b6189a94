//! Parse error type and diagnostic reporting

use crate::ast::Span;
use thiserror::Error;

/// A recoverable syntax error recorded by the parser
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Render parse errors to stderr with ariadne
pub fn report_parse_errors(
    filename: &str,
    source: &str,
    errors: &[ParseError],
    color: bool,
) -> std::io::Result<()> {
    use ariadne::{Color, Config, Label, Report, ReportKind, Source};

    for error in errors {
        let range: std::ops::Range<usize> = error.span.into();
        let mut label = Label::new((filename, range.clone())).with_message(error.message());
        if color {
            label = label.with_color(Color::Red);
        }
        Report::build(ReportKind::Error, (filename, range))
            .with_config(Config::default().with_color(color))
            .with_message("Parse error")
            .with_label(label)
            .finish()
            .eprint((filename, Source::from(source)))?;
    }
    Ok(())
}
