//! Error types for parsing and validation

use ariadne::{Config, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Input is not well-formed JSON
    #[error("syntax error at line {line}, column {column}: {message}")]
    Syntax {
        message: String,
        line: usize,
        column: usize,
        span: Span,
    },

    /// Well-formed JSON that does not match the UI contract
    #[error("schema violation at {path}: {message}")]
    Schema { path: String, message: String },

    /// Brackets nested deeper than any tree within the depth limit allows
    #[error("nesting exceeds {limit} levels at line {line}, column {column}")]
    Nesting {
        limit: usize,
        line: usize,
        column: usize,
        span: Span,
    },
}

impl ParseError {
    /// Create a schema violation for the value at `path`
    pub fn schema(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Schema {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Build a syntax error from serde_json's line/column report
    ///
    /// `base` is the byte offset in `source` where the parsed text started.
    pub(crate) fn from_json(err: &serde_json::Error, source: &str, base: usize) -> Self {
        let base = base.min(source.len());
        let offset = base + offset_of(&source[base..], err.line(), err.column());
        let (line, column) = line_col(source, offset);
        let message = err.to_string();
        // serde_json appends " at line L column C"; the position is kept separately.
        let message = match message.rfind(" at line ") {
            Some(idx) => message[..idx].to_string(),
            None => message,
        };
        Self::Syntax {
            message,
            line,
            column,
            span: offset..(offset + 1).min(source.len()),
        }
    }

    /// Build a syntax error that has no serde_json counterpart
    pub(crate) fn syntax(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, column) = line_col(source, offset);
        Self::Syntax {
            message: message.into(),
            line,
            column,
            span: offset..(offset + 1).min(source.len()),
        }
    }

    /// Build a nesting error located at byte `offset`
    pub(crate) fn nesting(source: &str, offset: usize, limit: usize) -> Self {
        let (line, column) = line_col(source, offset);
        Self::Nesting {
            limit,
            line,
            column,
            span: offset..(offset + 1).min(source.len()),
        }
    }

    /// Source span, for errors tied to a text location
    pub fn span(&self) -> Option<&Span> {
        match self {
            Self::Syntax { span, .. } | Self::Nesting { span, .. } => Some(span),
            Self::Schema { .. } => None,
        }
    }

    /// JSON path of the offending value, for schema violations
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Schema { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let mut buf = Vec::new();
        let config = Config::default().with_color(false);
        let report = match self {
            Self::Syntax { message, span, .. } => {
                let span = char_span(source, span);
                Report::build(ReportKind::Error, filename, span.start)
                    .with_config(config)
                    .with_message("invalid JSON")
                    .with_label(Label::new((filename, span)).with_message(message))
                    .finish()
            }
            Self::Nesting { limit, span, .. } => {
                let span = char_span(source, span);
                Report::build(ReportKind::Error, filename, span.start)
                    .with_config(config)
                    .with_message("document nested too deeply")
                    .with_label(
                        Label::new((filename, span))
                            .with_message(format!("nesting exceeds {} levels here", limit)),
                    )
                    .finish()
            }
            Self::Schema { path, message } => {
                Report::<(&str, Span)>::build(ReportKind::Error, filename, 0)
                    .with_config(config)
                    .with_message(format!("schema violation: {}", message))
                    .with_note(format!("at {}", path))
                    .finish()
            }
        };
        // Writing into a Vec cannot fail.
        let _ = report.write((filename, Source::from(source)), &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

/// 1-based line and column of a byte offset
pub(crate) fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(source.len());
    let before = &source.as_bytes()[..offset];
    let line = before.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |idx| idx + 1);
    (line, offset - line_start + 1)
}

/// Byte offset of a 1-based line/column pair, clamped to the source
fn offset_of(source: &str, line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        source
            .match_indices('\n')
            .nth(line - 2)
            .map_or(source.len(), |(idx, _)| idx + 1)
    };
    (line_start + column.saturating_sub(1)).min(source.len())
}

/// ariadne counts characters, not bytes
fn char_span(source: &str, span: &Span) -> Span {
    let to_chars = |byte: usize| source.char_indices().take_while(|(i, _)| *i < byte).count();
    let start = to_chars(span.start);
    let end = to_chars(span.end).max(start);
    start..end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_col() {
        let source = "{\n  \"a\": [\n}";
        assert_eq!(line_col(source, 0), (1, 1));
        assert_eq!(line_col(source, 4), (2, 3));
        assert_eq!(line_col(source, source.len() - 1), (3, 1));
    }

    #[test]
    fn test_offset_of_inverts_line_col() {
        let source = "{\n  \"a\": [\n}";
        for offset in 0..source.len() {
            let (line, column) = line_col(source, offset);
            assert_eq!(offset_of(source, line, column), offset);
        }
    }

    #[test]
    fn test_char_span_counts_characters() {
        let source = "\"é\" x";
        // 'é' is two bytes; byte 4 is the space after the closing quote.
        assert_eq!(char_span(source, &(4..5)), 3..4);
    }

    #[test]
    fn test_schema_error_display() {
        let err = ParseError::schema("components[0].type", "unknown component type 'x'");
        assert_eq!(
            err.to_string(),
            "schema violation at components[0].type: unknown component type 'x'"
        );
        assert_eq!(err.path(), Some("components[0].type"));
        assert!(err.span().is_none());
    }

    #[test]
    fn test_format_syntax_error_mentions_file() {
        let source = "{\"components\": [}";
        let json_err = serde_json::from_str::<serde_json::Value>(source).unwrap_err();
        let err = ParseError::from_json(&json_err, source, 0);
        let report = err.format(source, "ui.json");
        assert!(report.contains("invalid JSON"));
        assert!(report.contains("ui.json"));
    }

    #[test]
    fn test_format_schema_error_names_path() {
        let err = ParseError::schema("components[2].label", "expected a string");
        let report = err.format("{}", "ui.json");
        assert!(report.contains("expected a string"));
        assert!(report.contains("components[2].label"));
    }
}
