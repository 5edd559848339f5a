use std::collections::HashMap;

use crate::cursor::{is_alphanumeric, is_digit, is_lower_letter, is_upper_letter, is_whitespace, Cursor};
use crate::error::ErrorHandler;
use crate::symbols::SymbolTable;
use crate::token::{Kind, Token};

/// Keywords in declaration order. Matching iterates this slice front to back
/// so the result never depends on incidental set ordering.
pub const KEYWORDS: [&str; 12] = [
    "start", "finish", "loop", "condition", "declare", "output",
    "input", "function", "return", "break", "continue", "else",
];

pub const MAX_IDENTIFIER_LENGTH: usize = 31;
pub const MAX_FRACTION_DIGITS: usize = 6;

/// The tokenizing engine: drives an ordered list of matchers over the cursor,
/// collecting tokens, diagnostics and identifier sightings as it goes.
///
/// Scanning never fails. Input no matcher accepts is reported through the
/// error sink and skipped one character at a time, so a full pass over
/// arbitrarily malformed text always completes.
pub struct Scanner {
    cursor: Cursor,
    tokens: Vec<Token>,
    errors: ErrorHandler,
    symbols: SymbolTable,
    token_counts: HashMap<Kind, usize>,
    comment_count: usize,
    token_start_line: usize,
    token_start_column: usize,
}

impl Scanner {
    pub fn new(input: &str) -> Self {
        Self {
            cursor: Cursor::new(input),
            tokens: Vec::new(),
            errors: ErrorHandler::new(),
            symbols: SymbolTable::new(),
            token_counts: HashMap::new(),
            comment_count: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Runs the scan to end of input and returns the token sequence.
    ///
    /// The matcher order below is a contract, not an accident: two-character
    /// operators must run before one-character ones (longest match), keywords
    /// and boolean literals before identifiers, floats before integers.
    pub fn scan(&mut self) -> &[Token] {
        while !self.cursor.is_eof() {
            self.token_start_line = self.cursor.line();
            self.token_start_column = self.cursor.column();

            if self.try_block_comment() {
                continue;
            }
            if self.try_line_comment() {
                continue;
            }
            if self.try_two_char_operator() {
                continue;
            }
            if self.try_keyword() {
                continue;
            }
            if self.try_boolean_literal() {
                continue;
            }
            if self.try_identifier() {
                continue;
            }
            if self.try_float_literal() {
                continue;
            }
            if self.try_integer_literal() {
                continue;
            }
            if self.try_string_literal() {
                continue;
            }
            if self.try_char_literal() {
                continue;
            }
            if self.try_single_char_operator() {
                continue;
            }
            if self.try_punctuator() {
                continue;
            }
            if self.try_whitespace() {
                continue;
            }

            // Nothing matched. Report and force one character of progress so
            // the loop always terminates.
            let ch = self.cursor.peek();
            self.errors
                .invalid_character(self.cursor.line(), self.cursor.column(), ch);
            self.cursor.consume();
        }

        &self.tokens
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn error_handler(&self) -> &ErrorHandler {
        &self.errors
    }

    pub fn symbol_table(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn token_counts(&self) -> &HashMap<Kind, usize> {
        &self.token_counts
    }

    pub fn comment_count(&self) -> usize {
        self.comment_count
    }

    pub fn lines_processed(&self) -> usize {
        self.cursor.line()
    }

    fn push_token(&mut self, kind: Kind, lexeme: String) {
        *self.token_counts.entry(kind).or_insert(0) += 1;
        self.tokens.push(Token {
            kind,
            lexeme,
            line: self.token_start_line,
            column: self.token_start_column,
        });
    }

    /// True when the upcoming characters spell `word` and the character after
    /// it would not extend it into a longer identifier-like lexeme.
    fn matches_word(&self, word: &str) -> bool {
        let mut length = 0;
        for expected in word.chars() {
            if self.cursor.peek_at(length) != expected {
                return false;
            }
            length += 1;
        }
        !is_alphanumeric(self.cursor.peek_at(length))
    }

    fn try_block_comment(&mut self) -> bool {
        if self.cursor.peek() != '#' || self.cursor.peek_at(1) != '*' {
            return false;
        }
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();
        self.cursor.consume(); // #
        self.cursor.consume(); // *

        while !self.cursor.is_eof() {
            if self.cursor.peek() == '*' && self.cursor.peek_at(1) == '#' {
                self.cursor.consume(); // *
                self.cursor.consume(); // #
                self.comment_count += 1;
                return true;
            }
            self.cursor.consume();
        }

        // Ran off the end of input before *# was seen. Still a successful
        // match: the text is consumed and must not be rescanned.
        self.errors.unclosed_comment(start_line, start_column);
        true
    }

    fn try_line_comment(&mut self) -> bool {
        if self.cursor.peek() != '#' || self.cursor.peek_at(1) != '#' {
            return false;
        }
        self.cursor.consume(); // #
        self.cursor.consume(); // #

        // The newline itself is left for the whitespace matcher.
        while !self.cursor.is_eof() && self.cursor.peek() != '\n' {
            self.cursor.consume();
        }
        self.comment_count += 1;
        true
    }

    fn try_two_char_operator(&mut self) -> bool {
        let pair = self.cursor.peek_string(2);
        let kind = match two_char_operator_kind(&pair) {
            Some(kind) => kind,
            None => return false,
        };
        self.cursor.consume();
        self.cursor.consume();
        self.push_token(kind, pair);
        true
    }

    fn try_keyword(&mut self) -> bool {
        for keyword in KEYWORDS {
            if self.matches_word(keyword) {
                let mut lexeme = String::with_capacity(keyword.len());
                for _ in 0..keyword.len() {
                    lexeme.push(self.cursor.consume());
                }
                self.push_token(Kind::Keyword, lexeme);
                return true;
            }
        }
        false
    }

    fn try_boolean_literal(&mut self) -> bool {
        // `false` is checked before `true`.
        for literal in ["false", "true"] {
            if self.matches_word(literal) {
                let mut lexeme = String::with_capacity(literal.len());
                for _ in 0..literal.len() {
                    lexeme.push(self.cursor.consume());
                }
                self.push_token(Kind::BooleanLiteral, lexeme);
                return true;
            }
        }
        false
    }

    fn try_identifier(&mut self) -> bool {
        if !is_upper_letter(self.cursor.peek()) {
            return false;
        }
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();

        // Uppercase first letter, then lowercase letters, digits, underscores.
        let mut lexeme = String::new();
        lexeme.push(self.cursor.consume());
        while is_lower_letter(self.cursor.peek())
            || is_digit(self.cursor.peek())
            || self.cursor.peek() == '_'
        {
            lexeme.push(self.cursor.consume());
        }

        if lexeme.chars().count() > MAX_IDENTIFIER_LENGTH {
            self.errors.invalid_identifier(
                start_line,
                start_column,
                &lexeme,
                "Identifier exceeds maximum length of 31 characters",
            );
            return true;
        }

        self.symbols.register(&lexeme, start_line, start_column);
        self.push_token(Kind::Identifier, lexeme);
        true
    }

    fn try_float_literal(&mut self) -> bool {
        let saved = self.cursor.snapshot();
        let mut lexeme = String::new();

        if self.cursor.peek() == '+' || self.cursor.peek() == '-' {
            lexeme.push(self.cursor.consume());
        }

        if !is_digit(self.cursor.peek()) {
            self.cursor.restore(saved);
            return false;
        }
        while is_digit(self.cursor.peek()) {
            lexeme.push(self.cursor.consume());
        }

        // No decimal point: not a float, let the integer matcher try.
        if self.cursor.peek() != '.' {
            self.cursor.restore(saved);
            return false;
        }
        lexeme.push(self.cursor.consume()); // '.'

        let mut fraction_digits = 0;
        while is_digit(self.cursor.peek()) {
            lexeme.push(self.cursor.consume());
            fraction_digits += 1;
        }

        if fraction_digits == 0 || fraction_digits > MAX_FRACTION_DIGITS {
            // The malformed text is swallowed: consumed, reported, no token.
            self.errors.malformed_literal(
                saved.line,
                saved.column,
                &lexeme,
                "Floating-point literal must have 1-6 digits after the decimal point",
            );
            return true;
        }

        if self.cursor.peek() == 'e' || self.cursor.peek() == 'E' {
            lexeme.push(self.cursor.consume());
            if self.cursor.peek() == '+' || self.cursor.peek() == '-' {
                lexeme.push(self.cursor.consume());
            }
            if !is_digit(self.cursor.peek()) {
                self.errors.malformed_literal(
                    saved.line,
                    saved.column,
                    &lexeme,
                    "Exponent must have at least one digit",
                );
                return true;
            }
            while is_digit(self.cursor.peek()) {
                lexeme.push(self.cursor.consume());
            }
        }

        self.push_token(Kind::FloatLiteral, lexeme);
        true
    }

    fn try_integer_literal(&mut self) -> bool {
        let saved = self.cursor.snapshot();
        let mut lexeme = String::new();

        if self.cursor.peek() == '+' || self.cursor.peek() == '-' {
            lexeme.push(self.cursor.consume());
        }

        if !is_digit(self.cursor.peek()) {
            self.cursor.restore(saved);
            return false;
        }
        while is_digit(self.cursor.peek()) {
            lexeme.push(self.cursor.consume());
        }

        // A decimal point after the digits means a float shape, which the
        // float matcher owns.
        if self.cursor.peek() == '.' {
            self.cursor.restore(saved);
            return false;
        }

        self.push_token(Kind::IntegerLiteral, lexeme);
        true
    }

    fn try_string_literal(&mut self) -> bool {
        if self.cursor.peek() != '"' {
            return false;
        }
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();

        let mut lexeme = String::new();
        lexeme.push(self.cursor.consume()); // opening "

        while !self.cursor.is_eof() && self.cursor.peek() != '"' && self.cursor.peek() != '\n' {
            if self.cursor.peek() == '\\' {
                lexeme.push(self.cursor.consume());
                // The escaped character is taken verbatim, recognized or not.
                if !self.cursor.is_eof() {
                    lexeme.push(self.cursor.consume());
                }
            } else {
                lexeme.push(self.cursor.consume());
            }
        }

        if self.cursor.is_eof() || self.cursor.peek() != '"' {
            self.errors
                .unterminated_string(start_line, start_column, &lexeme);
            return true;
        }

        lexeme.push(self.cursor.consume()); // closing "
        self.push_token(Kind::StringLiteral, lexeme);
        true
    }

    fn try_char_literal(&mut self) -> bool {
        if self.cursor.peek() != '\'' {
            return false;
        }
        let start_line = self.cursor.line();
        let start_column = self.cursor.column();

        let mut lexeme = String::new();
        lexeme.push(self.cursor.consume()); // opening '

        if self.cursor.is_eof() {
            self.errors
                .unterminated_char(start_line, start_column, &lexeme);
            return true;
        }

        if self.cursor.peek() == '\\' {
            lexeme.push(self.cursor.consume());
            if !self.cursor.is_eof() {
                lexeme.push(self.cursor.consume());
            }
        } else if self.cursor.peek() != '\'' && self.cursor.peek() != '\n' {
            lexeme.push(self.cursor.consume());
        }

        if self.cursor.is_eof() || self.cursor.peek() != '\'' {
            self.errors
                .unterminated_char(start_line, start_column, &lexeme);
            return true;
        }

        lexeme.push(self.cursor.consume()); // closing '
        self.push_token(Kind::CharLiteral, lexeme);
        true
    }

    fn try_single_char_operator(&mut self) -> bool {
        let kind = match single_char_operator_kind(self.cursor.peek()) {
            Some(kind) => kind,
            None => return false,
        };
        let lexeme = self.cursor.consume().to_string();
        self.push_token(kind, lexeme);
        true
    }

    fn try_punctuator(&mut self) -> bool {
        let ch = self.cursor.peek();
        if !matches!(ch, '(' | ')' | '{' | '}' | '[' | ']' | ',' | ';' | ':') {
            return false;
        }
        let lexeme = self.cursor.consume().to_string();
        self.push_token(Kind::Punctuator, lexeme);
        true
    }

    fn try_whitespace(&mut self) -> bool {
        if !is_whitespace(self.cursor.peek()) {
            return false;
        }
        while !self.cursor.is_eof() && is_whitespace(self.cursor.peek()) {
            self.cursor.consume();
        }
        true
    }
}

fn two_char_operator_kind(op: &str) -> Option<Kind> {
    match op {
        "**" => Some(Kind::ArithmeticOp),
        "==" | "!=" | "<=" | ">=" => Some(Kind::RelationalOp),
        "&&" | "||" => Some(Kind::LogicalOp),
        "+=" | "-=" | "*=" | "/=" => Some(Kind::AssignmentOp),
        "++" => Some(Kind::IncrementOp),
        "--" => Some(Kind::DecrementOp),
        _ => None,
    }
}

fn single_char_operator_kind(ch: char) -> Option<Kind> {
    match ch {
        '+' | '-' | '*' | '/' | '%' => Some(Kind::ArithmeticOp),
        '<' | '>' => Some(Kind::RelationalOp),
        '!' => Some(Kind::LogicalOp),
        '=' => Some(Kind::AssignmentOp),
        _ => None,
    }
}
