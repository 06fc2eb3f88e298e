//! Symbol tables attached to scope-opening nodes.
//!
//! The binder decides what goes into a table; the tree only stores it and
//! shows it in dumps. Entries keep insertion order so dumps are reproducible.

use indexmap::IndexMap;
use knox_lexer::{Position, Token};
use smol_str::SmolStr;

/// What a name is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SymbolKind {
    Variable,
    Parameter,
    Function,
    Class,
}

/// A symbol table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    pub name: SmolStr,
    pub kind: SymbolKind,
    /// Where the name was declared.
    #[cfg_attr(feature = "serde", serde(default))]
    pub declared_at: Position,
}

impl Symbol {
    pub fn new(name: impl Into<SmolStr>, kind: SymbolKind, declared_at: Position) -> Self {
        Self {
            name: name.into(),
            kind,
            declared_at,
        }
    }

    /// Build an entry from the identifier token that declares it.
    pub fn declared_by(token: &Token, kind: SymbolKind) -> Self {
        Self::new(token.literal.clone(), kind, token.position)
    }
}

/// An ordered mapping from identifier to symbol.
///
/// Serialized as the list of its symbols; each is keyed by its own name
/// when loaded back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "Vec<Symbol>", into = "Vec<Symbol>"))]
pub struct SymbolTable {
    entries: IndexMap<SmolStr, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a symbol under its name; returns the entry it replaced.
    ///
    /// A replaced name keeps its original position in iteration order.
    pub fn insert(&mut self, symbol: Symbol) -> Option<Symbol> {
        self.entries.insert(symbol.name.clone(), symbol)
    }

    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &Symbol)> {
        self.entries.iter()
    }

    /// Bound names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(SmolStr::as_str)
    }
}

impl FromIterator<Symbol> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = Symbol>>(iter: I) -> Self {
        let mut table = SymbolTable::new();
        table.extend(iter);
        table
    }
}

impl Extend<Symbol> for SymbolTable {
    fn extend<I: IntoIterator<Item = Symbol>>(&mut self, iter: I) {
        for symbol in iter {
            self.insert(symbol);
        }
    }
}

impl From<Vec<Symbol>> for SymbolTable {
    fn from(symbols: Vec<Symbol>) -> Self {
        symbols.into_iter().collect()
    }
}

impl From<SymbolTable> for Vec<Symbol> {
    fn from(table: SymbolTable) -> Self {
        table.entries.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Symbol {
        Symbol::new(name, SymbolKind::Variable, Position::synthetic())
    }

    #[test]
    fn test_iteration_follows_insertion_order() {
        let table: SymbolTable = ["zeta", "alpha", "mid"].into_iter().map(var).collect();
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["zeta", "alpha", "mid"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_rebinding_keeps_slot() {
        let mut table: SymbolTable = ["a", "b"].into_iter().map(var).collect();
        let previous = table.insert(Symbol::new("a", SymbolKind::Function, Position::new(4, 1)));

        assert_eq!(previous.map(|s| s.kind), Some(SymbolKind::Variable));
        assert_eq!(table.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(table.get("a").map(|s| s.kind), Some(SymbolKind::Function));
    }

    #[test]
    fn test_declared_by_token() {
        let token = Token::new(
            knox_lexer::TokenKind::Ident,
            "count",
            10..15,
            Position::new(2, 5),
        );
        let symbol = Symbol::declared_by(&token, SymbolKind::Parameter);

        assert_eq!(symbol.name, "count");
        assert_eq!(symbol.declared_at, Position::new(2, 5));
    }

    #[test]
    fn test_symbols_round_trip_through_vec() {
        let table: SymbolTable = ["b", "a"].into_iter().map(var).collect();
        let symbols: Vec<Symbol> = table.clone().into();

        assert_eq!(symbols.iter().map(|s| s.name.as_str()).collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(SymbolTable::from(symbols), table);
    }

    #[test]
    fn test_empty_table() {
        let table = SymbolTable::new();
        assert!(table.is_empty());
        assert!(!table.contains("x"));
        assert_eq!(table.iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_loaded_entries_are_keyed_by_their_name() {
        let json = r#"[{ "name": "y", "kind": "variable" }, { "name": "f", "kind": "function" }]"#;
        let table: SymbolTable = serde_json::from_str(json).unwrap();

        assert_eq!(table.names().collect::<Vec<_>>(), vec!["y", "f"]);
        assert_eq!(table.get("y").map(|s| s.name.as_str()), Some("y"));
        assert!(!table.contains("x"));
    }

    #[test]
    fn test_keyed_object_form_is_rejected() {
        let json = r#"{ "x": { "name": "y", "kind": "variable" } }"#;
        assert!(serde_json::from_str::<SymbolTable>(json).is_err());
    }

    #[test]
    fn test_serializes_as_symbol_list() {
        let table: SymbolTable = [Symbol::new("n", SymbolKind::Variable, Position::new(1, 5))]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&table).unwrap();

        assert_eq!(
            json,
            r#"[{"name":"n","kind":"variable","declared_at":{"line":1,"column":5}}]"#
        );
        assert_eq!(serde_json::from_str::<SymbolTable>(&json).unwrap(), table);
    }
}
