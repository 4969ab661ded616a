//! Symbol-level comparison of two entities.
//!
//! The merge walks both name-sorted symbol lists once and only looks at
//! names; sizes decide between `Modified` and unchanged. Display order is a
//! separate pass (`sort_for_display`) keyed on file, then symbol.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::model::{Entity, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    Added,
    Deleted,
    Modified,
}

impl ChangeKind {
    /// One-character marker used by the text report.
    pub fn marker(self) -> char {
        match self {
            ChangeKind::Added => 'A',
            ChangeKind::Deleted => 'D',
            ChangeKind::Modified => '-',
        }
    }
}

/// One symbol whose presence or size differs between the two binaries.
///
/// `old_size` is `None` for additions and `new_size` is `None` for
/// deletions. That is distinct from `Some(0)`, a symbol that exists with
/// zero size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub old_size: Option<u64>,
    pub new_size: Option<u64>,
    pub file: String,
    pub symbol: String,
}

impl Change {
    fn added(sym: &Symbol) -> Self {
        Self {
            kind: ChangeKind::Added,
            old_size: None,
            new_size: Some(sym.size),
            file: sym.file.clone(),
            symbol: sym.name.clone(),
        }
    }

    fn deleted(sym: &Symbol) -> Self {
        Self {
            kind: ChangeKind::Deleted,
            old_size: Some(sym.size),
            new_size: None,
            file: sym.file.clone(),
            symbol: sym.name.clone(),
        }
    }

    /// File and name are taken from the new side.
    fn modified(old: &Symbol, new: &Symbol) -> Self {
        Self {
            kind: ChangeKind::Modified,
            old_size: Some(old.size),
            new_size: Some(new.size),
            file: new.file.clone(),
            symbol: new.name.clone(),
        }
    }
}

/// Compare `old` against `new` with a two-cursor merge over the name-sorted
/// symbol lists. Returned changes are in merge order.
pub fn diff_entities(old: &Entity, new: &Entity) -> Vec<Change> {
    let (aa, bb) = (old.symbols(), new.symbols());
    let (mut i, mut j) = (0, 0);
    let mut changes = Vec::new();

    while i < aa.len() || j < bb.len() {
        if j == bb.len() {
            changes.push(Change::deleted(&aa[i]));
            i += 1;
            continue;
        }
        if i == aa.len() {
            changes.push(Change::added(&bb[j]));
            j += 1;
            continue;
        }

        match aa[i].name.cmp(&bb[j].name) {
            Ordering::Less => {
                changes.push(Change::deleted(&aa[i]));
                i += 1;
            }
            Ordering::Greater => {
                changes.push(Change::added(&bb[j]));
                j += 1;
            }
            Ordering::Equal => {
                if aa[i].size != bb[j].size {
                    changes.push(Change::modified(&aa[i], &bb[j]));
                }
                i += 1;
                j += 1;
            }
        }
    }

    changes
}

/// Order changes for grouped output: by file, then by symbol name.
pub fn sort_for_display(changes: &mut [Change]) {
    changes.sort_by(|a, b| a.file.cmp(&b.file).then_with(|| a.symbol.cmp(&b.symbol)));
}

/// Sums of every present old size and every present new size.
///
/// Widened to `u128` so any number of `u64` sizes adds up without wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaTotals {
    pub old: u128,
    pub new: u128,
}

impl DeltaTotals {
    pub fn from_changes(changes: &[Change]) -> Self {
        changes.iter().fold(Self::default(), |acc, ch| Self {
            old: acc.old + u128::from(ch.old_size.unwrap_or(0)),
            new: acc.new + u128::from(ch.new_size.unwrap_or(0)),
        })
    }
}

/// Per-kind change counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub deleted: usize,
    pub modified: usize,
}

/// A complete before/after comparison, ready to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeltaReport {
    pub old: String,
    pub new: String,
    /// Sorted by file, then symbol.
    pub changes: Vec<Change>,
    pub totals: DeltaTotals,
}

impl DeltaReport {
    pub fn build(old: &Entity, new: &Entity) -> Self {
        let mut changes = diff_entities(old, new);
        sort_for_display(&mut changes);
        let totals = DeltaTotals::from_changes(&changes);
        Self { old: old.label.clone(), new: new.label.clone(), changes, totals }
    }

    pub fn counts(&self) -> ChangeCounts {
        let mut counts = ChangeCounts::default();
        for ch in &self.changes {
            match ch.kind {
                ChangeKind::Added => counts.added += 1,
                ChangeKind::Deleted => counts.deleted += 1,
                ChangeKind::Modified => counts.modified += 1,
            }
        }
        counts
    }
}
