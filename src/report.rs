use serde::Serialize;

use crate::error::{ErrorHandler, ErrorKind, LexicalError};
use crate::scanner::Scanner;
use crate::symbols::{SymbolEntry, SymbolTable};
use crate::token::{Kind, Token};

const SUMMARY_KINDS: [ErrorKind; 6] = [
    ErrorKind::InvalidCharacter,
    ErrorKind::MalformedLiteral,
    ErrorKind::InvalidIdentifier,
    ErrorKind::UnclosedComment,
    ErrorKind::UnterminatedString,
    ErrorKind::UnterminatedChar,
];

pub fn print_tokens(tokens: &[Token]) {
    println!("\n=== Tokens ===");
    for token in tokens {
        println!("{}", token);
    }
}

pub fn print_statistics(scanner: &Scanner) {
    println!("\n=== Statistics ===");
    println!("Total tokens: {}", scanner.tokens().len());
    println!("Lines processed: {}", scanner.lines_processed());
    println!("Comments removed: {}", scanner.comment_count());
    println!("\nToken counts by kind:");
    for (kind, count) in token_counts_sorted(scanner) {
        println!("  {}: {}", kind, count);
    }
}

pub fn print_symbol_table(table: &SymbolTable) {
    if table.is_empty() {
        println!("\nSymbol table is empty.");
        return;
    }

    println!("\n=== Symbol Table ===");
    println!(
        "{:<32} {:<12} {:<18} {}",
        "Identifier", "Category", "First Occurrence", "Frequency"
    );
    println!("{}", "=".repeat(75));
    for entry in table.sorted_entries() {
        println!(
            "{:<32} {:<12} Line: {:<4} Col: {:<4} {}",
            entry.name, entry.category, entry.first_line, entry.first_column, entry.frequency
        );
    }
    println!("{}", "=".repeat(75));
    println!("Total unique identifiers: {}", table.len());
}

pub fn print_error_report(errors: &ErrorHandler) {
    if !errors.has_errors() {
        println!("\nNo lexical errors found.");
        return;
    }

    println!("\n=== Lexical Errors ===");
    for error in errors.errors() {
        println!("{}", error);
    }

    println!("\nTotal errors: {}", errors.count());
    println!("Errors by kind:");
    for kind in SUMMARY_KINDS {
        let count = errors.count_of(kind);
        if count > 0 {
            println!("  {}: {}", kind.summary_label(), count);
        }
    }
}

/// Token counts ordered by count descending, name ascending on ties, so the
/// console and JSON surfaces are deterministic.
fn token_counts_sorted(scanner: &Scanner) -> Vec<(Kind, usize)> {
    let mut counts: Vec<(Kind, usize)> = scanner
        .token_counts()
        .iter()
        .map(|(kind, count)| (*kind, *count))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.name().cmp(b.0.name())));
    counts
}

#[derive(Debug, Serialize)]
pub struct KindCount {
    pub kind: Kind,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct Statistics {
    pub total_tokens: usize,
    pub lines_processed: usize,
    pub comments_removed: usize,
    pub token_counts: Vec<KindCount>,
}

/// Everything one scan produced, in one serializable value. This is the
/// machine-readable counterpart of the console report.
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexicalError>,
    pub symbols: Vec<SymbolEntry>,
    pub statistics: Statistics,
}

impl ScanReport {
    pub fn from_scanner(scanner: &Scanner) -> Self {
        let token_counts = token_counts_sorted(scanner)
            .into_iter()
            .map(|(kind, count)| KindCount { kind, count })
            .collect();

        Self {
            tokens: scanner.tokens().to_vec(),
            errors: scanner.error_handler().errors().to_vec(),
            symbols: scanner
                .symbol_table()
                .sorted_entries()
                .into_iter()
                .cloned()
                .collect(),
            statistics: Statistics {
                total_tokens: scanner.tokens().len(),
                lines_processed: scanner.lines_processed(),
                comments_removed: scanner.comment_count(),
                token_counts,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(input: &str) -> Scanner {
        let mut scanner = Scanner::new(input);
        scanner.scan();
        scanner
    }

    #[test]
    fn report_mirrors_the_scanner_outputs() {
        let scanner = scan("declare Count = 1;\noutput Count;\nbad@\n");
        let report = ScanReport::from_scanner(&scanner);

        assert_eq!(report.tokens.len(), scanner.tokens().len());
        assert_eq!(report.errors.len(), scanner.error_handler().count());
        assert_eq!(report.symbols.len(), 1);
        assert_eq!(report.symbols[0].name, "Count");
        assert_eq!(report.symbols[0].frequency, 2);
        assert_eq!(report.statistics.total_tokens, report.tokens.len());
        assert_eq!(report.statistics.lines_processed, 4);
    }

    #[test]
    fn token_counts_sort_descending_then_by_name() {
        let scanner = scan("output output output Value = 1");
        let counts = token_counts_sorted(&scanner);
        assert_eq!(counts[0], (Kind::Keyword, 3));
        // The three singleton kinds tie and fall back to name order.
        let tail: Vec<&str> = counts[1..].iter().map(|(k, _)| k.name()).collect();
        assert_eq!(tail, vec!["ASSIGNMENT_OP", "IDENTIFIER", "INTEGER_LITERAL"]);
    }

    #[test]
    fn report_serializes_to_json() {
        let scanner = scan("declare Value = 3.14;");
        let report = ScanReport::from_scanner(&scanner);
        let json = serde_json::to_value(&report).unwrap();

        assert!(json["tokens"].is_array());
        assert_eq!(json["tokens"][0]["kind"], "Keyword");
        assert_eq!(json["tokens"][0]["lexeme"], "declare");
        assert_eq!(json["statistics"]["total_tokens"], 5);
        assert!(json["errors"].as_array().unwrap().is_empty());
        assert_eq!(json["symbols"][0]["name"], "Value");
    }
}
