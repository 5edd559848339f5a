use std::fmt;

use serde::Serialize;

/// A classified, positioned unit of the output stream. Immutable once built;
/// `line` and `column` locate the first character of the lexeme.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Token {
    pub kind: Kind,
    pub lexeme: String,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize)]
pub enum Kind {
    // Keywords
    Keyword,

    // Identifiers
    Identifier,

    // Literals
    IntegerLiteral,
    FloatLiteral,
    StringLiteral,
    CharLiteral,
    BooleanLiteral,

    // Operators
    ArithmeticOp,   // + - * / % **
    RelationalOp,   // == != < > <= >=
    LogicalOp,      // && || !
    AssignmentOp,   // = += -= *= /=
    IncrementOp,    // ++
    DecrementOp,    // --

    // Punctuators
    Punctuator,     // ( ) { } [ ] , ; :
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Keyword => "KEYWORD",
            Kind::Identifier => "IDENTIFIER",
            Kind::IntegerLiteral => "INTEGER_LITERAL",
            Kind::FloatLiteral => "FLOAT_LITERAL",
            Kind::StringLiteral => "STRING_LITERAL",
            Kind::CharLiteral => "CHAR_LITERAL",
            Kind::BooleanLiteral => "BOOLEAN_LITERAL",
            Kind::ArithmeticOp => "ARITHMETIC_OP",
            Kind::RelationalOp => "RELATIONAL_OP",
            Kind::LogicalOp => "LOGICAL_OP",
            Kind::AssignmentOp => "ASSIGNMENT_OP",
            Kind::IncrementOp => "INCREMENT_OP",
            Kind::DecrementOp => "DECREMENT_OP",
            Kind::Punctuator => "PUNCTUATOR",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:<16} {:<24} Line: {:<4} Col: {}",
            self.kind, self.lexeme, self.line, self.column
        )
    }
}
