use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::io;

use serde::Serialize;

/// Operational failures in the collaborators around the scanner core.
/// Lexical problems in the scanned text are not errors in this sense;
/// they flow through the [ErrorHandler] sink and never abort a scan.
#[derive(Debug)]
pub enum ScanError {
    FileNotFound(String),
    Io(io::Error),
}

impl Error for ScanError {}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScanError::FileNotFound(msg) => writeln!(f, "FileNotFoundError: {}", msg),
            ScanError::Io(err) => writeln!(f, "IOError: {}", err),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
pub enum ErrorKind {
    InvalidCharacter,
    MalformedLiteral,
    InvalidIdentifier,
    UnclosedComment,
    UnterminatedString,
    UnterminatedChar,
}

impl ErrorKind {
    /// Plural label used by the categorized summary.
    pub fn summary_label(&self) -> &'static str {
        match self {
            ErrorKind::InvalidCharacter => "Invalid characters",
            ErrorKind::MalformedLiteral => "Malformed literals",
            ErrorKind::InvalidIdentifier => "Invalid identifiers",
            ErrorKind::UnclosedComment => "Unclosed comments",
            ErrorKind::UnterminatedString => "Unterminated strings",
            ErrorKind::UnterminatedChar => "Unterminated chars",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidCharacter => "invalid character",
            ErrorKind::MalformedLiteral => "malformed literal",
            ErrorKind::InvalidIdentifier => "invalid identifier",
            ErrorKind::UnclosedComment => "unclosed comment",
            ErrorKind::UnterminatedString => "unterminated string",
            ErrorKind::UnterminatedChar => "unterminated char",
        };
        f.write_str(name)
    }
}

/// One recorded lexical diagnostic. Never removed once recorded.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct LexicalError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
    pub lexeme: String,
    pub reason: String,
}

impl fmt::Display for LexicalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "line {}, col {} [{}]: {} (found \"{}\")",
            self.line, self.column, self.kind, self.reason, self.lexeme
        )
    }
}

/// Append-only sink for lexical diagnostics with per-kind counts.
#[derive(Debug, Default)]
pub struct ErrorHandler {
    errors: Vec<LexicalError>,
    counts: HashMap<ErrorKind, usize>,
}

impl ErrorHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(
        &mut self,
        kind: ErrorKind,
        line: usize,
        column: usize,
        lexeme: String,
        reason: String,
    ) {
        *self.counts.entry(kind).or_insert(0) += 1;
        self.errors.push(LexicalError {
            kind,
            line,
            column,
            lexeme,
            reason,
        });
    }

    pub fn invalid_character(&mut self, line: usize, column: usize, ch: char) {
        self.report(
            ErrorKind::InvalidCharacter,
            line,
            column,
            ch.to_string(),
            format!("Invalid character '{}' not recognized", ch),
        );
    }

    pub fn malformed_literal(&mut self, line: usize, column: usize, lexeme: &str, reason: &str) {
        self.report(
            ErrorKind::MalformedLiteral,
            line,
            column,
            lexeme.to_string(),
            reason.to_string(),
        );
    }

    pub fn invalid_identifier(&mut self, line: usize, column: usize, lexeme: &str, reason: &str) {
        self.report(
            ErrorKind::InvalidIdentifier,
            line,
            column,
            lexeme.to_string(),
            reason.to_string(),
        );
    }

    pub fn unclosed_comment(&mut self, line: usize, column: usize) {
        self.report(
            ErrorKind::UnclosedComment,
            line,
            column,
            "#*".to_string(),
            "Block comment not closed".to_string(),
        );
    }

    pub fn unterminated_string(&mut self, line: usize, column: usize, lexeme: &str) {
        self.report(
            ErrorKind::UnterminatedString,
            line,
            column,
            lexeme.to_string(),
            "String literal not terminated".to_string(),
        );
    }

    pub fn unterminated_char(&mut self, line: usize, column: usize, lexeme: &str) {
        self.report(
            ErrorKind::UnterminatedChar,
            line,
            column,
            lexeme.to_string(),
            "Character literal not terminated".to_string(),
        );
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn count(&self) -> usize {
        self.errors.len()
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn errors(&self) -> &[LexicalError] {
        &self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sink_appends_and_counts_by_kind() {
        let mut handler = ErrorHandler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.count(), 0);

        handler.invalid_character(1, 1, '@');
        handler.invalid_character(1, 2, '$');
        handler.unterminated_string(2, 5, "\"abc");

        assert!(handler.has_errors());
        assert_eq!(handler.count(), 3);
        assert_eq!(handler.count_of(ErrorKind::InvalidCharacter), 2);
        assert_eq!(handler.count_of(ErrorKind::UnterminatedString), 1);
        assert_eq!(handler.count_of(ErrorKind::UnclosedComment), 0);
    }

    #[test]
    fn recorded_errors_keep_their_order_and_fields() {
        let mut handler = ErrorHandler::new();
        handler.malformed_literal(3, 4, "12.", "Floating-point literal must have 1-6 digits after the decimal point");
        handler.unclosed_comment(7, 1);

        let errors = handler.errors();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].kind, ErrorKind::MalformedLiteral);
        assert_eq!((errors[0].line, errors[0].column), (3, 4));
        assert_eq!(errors[0].lexeme, "12.");
        assert_eq!(errors[1].kind, ErrorKind::UnclosedComment);
        assert_eq!(errors[1].lexeme, "#*");
    }

    #[test]
    fn display_names_the_position_and_reason() {
        let mut handler = ErrorHandler::new();
        handler.invalid_character(2, 9, '~');
        let rendered = handler.errors()[0].to_string();
        assert!(rendered.contains("line 2, col 9"));
        assert!(rendered.contains("invalid character"));
        assert!(rendered.contains('~'));
    }
}
