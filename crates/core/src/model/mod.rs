//! Core data model: symbols extracted from one binary and the per-binary
//! entity that owns them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// One sized unit (function or data object) reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub address: u64,
    pub size: u64,
    /// Single-letter section class, e.g. `t`/`T` for code, `r`/`R` for read-only data.
    pub kind: char,
    pub name: String,
    /// Repository-relative source path, empty when the extractor had no line info.
    pub file: String,
    pub line: i64,
}

/// All symbols of one binary, kept sorted by name.
///
/// Only [`Entity::new`] constructs one, so the order can be relied on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub label: String,
    symbols: Vec<Symbol>,
}

impl Entity {
    /// Build an entity, sorting `symbols` by name.
    ///
    /// The sort is stable: symbols sharing a name keep the order the
    /// extractor emitted them in, and the diff pairs them up by position.
    pub fn new(label: impl Into<String>, mut symbols: Vec<Symbol>) -> Self {
        symbols.sort_by(|a, b| a.name.cmp(&b.name));
        Self { label: label.into(), symbols }
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Names that occur more than once, in name order.
    pub fn duplicate_names(&self) -> Vec<&str> {
        let mut dups = BTreeSet::new();
        for pair in self.symbols.windows(2) {
            if pair[0].name == pair[1].name {
                dups.insert(pair[0].name.as_str());
            }
        }
        dups.into_iter().collect()
    }
}
