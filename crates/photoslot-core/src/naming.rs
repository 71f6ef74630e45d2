//! Orientation-based slot naming.
//!
//! Every placeholder leaf gets a label `<prefix>_<orientation>_<ordinal>`.
//! Ordinals are 1-based and counted separately for landscape and portrait
//! slots, in pre-order. [`build_name_table`] only reads the tree; applying
//! the labels is a separate step addressed by [`NodePath`], so the table and
//! the renamed tree cannot drift apart.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::orientation::{Orientation, OrientationCounter, Oriented};
use crate::tree::{LayerTree, NodePath};

/// A placeholder identity: orientation plus 1-based ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slot {
    pub orientation: Orientation,
    pub ordinal: u32,
}

impl Slot {
    pub fn new(orientation: Orientation, ordinal: u32) -> Self {
        Self {
            orientation,
            ordinal,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.orientation, self.ordinal)
    }
}

/// Direction in which ordinals are handed out along the pre-order walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Numbering {
    /// First slot of each orientation is `_1`.
    #[default]
    Ascending,
    /// First slot of each orientation gets the highest ordinal, last is `_1`.
    Descending,
}

impl Numbering {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// Canonical label for `slot` under `prefix`.
pub fn slot_label(prefix: &str, slot: Slot) -> String {
    format!("{prefix}_{slot}")
}

/// One labelled placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameEntry {
    pub slot: Slot,
    pub label: String,
    /// Leaf name before relabelling.
    pub original_name: String,
    pub path: NodePath,
}

/// Slot → label mapping for one template, in pre-order.
#[derive(Debug, Clone, PartialEq)]
pub struct NameTable {
    entries: Vec<NameEntry>,
    by_slot: HashMap<Slot, usize>,
}

impl NameTable {
    /// Entries in the order their leaves were visited.
    pub fn entries(&self) -> &[NameEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, slot: Slot) -> Option<&NameEntry> {
        self.by_slot.get(&slot).map(|&i| &self.entries[i])
    }

    pub fn label(&self, slot: Slot) -> Option<&str> {
        self.get(slot).map(|e| e.label.as_str())
    }

    /// Number of slots of `orientation`.
    pub fn count(&self, orientation: Orientation) -> u32 {
        self.entries
            .iter()
            .filter(|e| e.slot.orientation == orientation)
            .count() as u32
    }

    /// Rename every labelled leaf in `tree`. Returns how many were renamed.
    ///
    /// Entries whose path no longer addresses a leaf are skipped.
    pub fn apply(&self, tree: &mut LayerTree) -> usize {
        self.entries
            .iter()
            .filter(|e| tree.rename_leaf(&e.path, &e.label))
            .count()
    }
}

/// Label every placeholder leaf of `tree` in one pre-order pass.
pub fn build_name_table(tree: &LayerTree, prefix: &str, numbering: Numbering) -> NameTable {
    let mut counter = OrientationCounter::new();
    let mut entries: Vec<NameEntry> = tree
        .placeholders()
        .map(|(path, leaf)| {
            let orientation = leaf.orientation();
            NameEntry {
                slot: Slot::new(orientation, counter.take(orientation)),
                label: String::new(),
                original_name: leaf.name.clone(),
                path,
            }
        })
        .collect();

    // Totals come from the same walk, so reversing cannot see a different tree.
    for entry in &mut entries {
        if numbering == Numbering::Descending {
            let total = counter.taken(entry.slot.orientation);
            entry.slot.ordinal = total - entry.slot.ordinal + 1;
        }
        entry.label = slot_label(prefix, entry.slot);
    }

    let by_slot = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.slot, i))
        .collect();

    tracing::debug!(
        "labelled {} placeholders ({} landscape, {} portrait)",
        entries.len(),
        counter.taken(Orientation::Landscape),
        counter.taken(Orientation::Portrait)
    );

    NameTable {
        entries,
        by_slot,
    }
}
