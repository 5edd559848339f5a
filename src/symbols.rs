use std::collections::HashMap;

use serde::Serialize;

const IDENTIFIER_CATEGORY: &str = "IDENTIFIER";

/// Registry entry for one identifier spelling. The first-occurrence position
/// is fixed at creation; only the frequency moves afterwards.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct SymbolEntry {
    pub name: String,
    pub category: &'static str,
    pub first_line: usize,
    pub first_column: usize,
    pub frequency: usize,
}

impl SymbolEntry {
    fn new(name: &str, line: usize, column: usize) -> Self {
        Self {
            name: name.to_string(),
            category: IDENTIFIER_CATEGORY,
            first_line: line,
            first_column: column,
            frequency: 1,
        }
    }
}

/// Identifier spellings seen during a scan, keyed by name.
#[derive(Debug, Default)]
pub struct SymbolTable {
    entries: HashMap<String, SymbolEntry>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a sighting of `name`. The first sighting fixes the position;
    /// later sightings only bump the frequency.
    pub fn register(&mut self, name: &str, line: usize, column: usize) {
        if let Some(entry) = self.entries.get_mut(name) {
            entry.frequency += 1;
        } else {
            self.entries
                .insert(name.to_string(), SymbolEntry::new(name, line, column));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries ordered by name ascending, for reporting.
    pub fn sorted_entries(&self) -> Vec<&SymbolEntry> {
        let mut entries: Vec<&SymbolEntry> = self.entries.values().collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sighting_creates_entry_with_frequency_one() {
        let mut table = SymbolTable::new();
        table.register("Total", 4, 9);

        let entry = table.get("Total").unwrap();
        assert_eq!(entry.name, "Total");
        assert_eq!(entry.category, "IDENTIFIER");
        assert_eq!((entry.first_line, entry.first_column), (4, 9));
        assert_eq!(entry.frequency, 1);
    }

    #[test]
    fn repeat_sightings_bump_frequency_but_not_position() {
        let mut table = SymbolTable::new();
        table.register("Count", 1, 5);
        table.register("Count", 2, 1);
        table.register("Count", 9, 30);

        assert_eq!(table.len(), 1);
        let entry = table.get("Count").unwrap();
        assert_eq!(entry.frequency, 3);
        assert_eq!((entry.first_line, entry.first_column), (1, 5));
    }

    #[test]
    fn sorted_entries_order_by_name() {
        let mut table = SymbolTable::new();
        table.register("Zeta", 1, 1);
        table.register("Alpha", 1, 6);
        table.register("Mid", 1, 12);

        let names: Vec<&str> = table
            .sorted_entries()
            .iter()
            .map(|entry| entry.name.as_str())
            .collect();
        assert_eq!(names, vec!["Alpha", "Mid", "Zeta"]);
    }

    #[test]
    fn contains_and_len() {
        let mut table = SymbolTable::new();
        assert!(table.is_empty());
        table.register("Value", 1, 1);
        assert!(table.contains("Value"));
        assert!(!table.contains("value"));
        assert_eq!(table.len(), 1);
    }
}
