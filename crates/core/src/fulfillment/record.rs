//! The common line shape every stage is projected into.

use std::collections::HashMap;
use std::collections::hash_map::{Entry, Values};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::LineKey;

/// One line of a PO, inbound, goods receipt or AP invoice document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Identity of this document line.
    pub line: LineKey,
    /// The upstream line this line refers back to.
    ///
    /// Inbound lines and AP lines refer to a PO line; goods receipt lines refer
    /// to an inbound line. Always `None` for PO lines.
    pub reference: Option<LineKey>,
    /// The goods receipt line an AP line was invoiced against. AP lines only.
    pub source: Option<LineKey>,
    /// Quantity carried by this line, already in the line's unit.
    pub qty: Decimal,
    /// Unit of measure, carried through unchanged.
    pub unit_code: String,
}

impl DocumentRecord {
    /// Creates a record with no reference or source.
    #[must_use]
    pub fn new(line: LineKey, qty: Decimal, unit_code: impl Into<String>) -> Self {
        Self {
            line,
            reference: None,
            source: None,
            qty,
            unit_code: unit_code.into(),
        }
    }

    /// Sets the upstream reference.
    #[must_use]
    pub fn with_reference(mut self, reference: Option<LineKey>) -> Self {
        self.reference = reference;
        self
    }

    /// Sets the goods receipt source.
    #[must_use]
    pub fn with_source(mut self, source: Option<LineKey>) -> Self {
        self.source = source;
        self
    }
}

/// All records of one stage, keyed by their own line.
///
/// Inserting a record whose line is already present adds its quantity to the
/// existing record. The first record's reference, source and unit are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageRecords {
    records: HashMap<LineKey, DocumentRecord>,
}

impl StageRecords {
    /// Creates an empty stage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, accumulating quantity on repeated lines.
    pub fn insert(&mut self, record: DocumentRecord) {
        match self.records.entry(record.line.clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().qty += record.qty,
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    /// Returns the record for a line.
    #[must_use]
    pub fn get(&self, line: &LineKey) -> Option<&DocumentRecord> {
        self.records.get(line)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the stage has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates the records in arbitrary order.
    pub fn iter(&self) -> Values<'_, LineKey, DocumentRecord> {
        self.records.values()
    }

    /// Sorted, de-duplicated codes and items of this stage's own lines.
    ///
    /// Used to build the filter for the next stage's fetch.
    #[must_use]
    pub fn codes_and_items(&self) -> (Vec<String>, Vec<String>) {
        let mut codes: Vec<String> = self.records.keys().map(|k| k.code.clone()).collect();
        let mut items: Vec<String> = self.records.keys().map(|k| k.item.clone()).collect();
        codes.sort_unstable();
        codes.dedup();
        items.sort_unstable();
        items.dedup();
        (codes, items)
    }
}

impl FromIterator<DocumentRecord> for StageRecords {
    fn from_iter<T: IntoIterator<Item = DocumentRecord>>(iter: T) -> Self {
        let mut stage = Self::new();
        for record in iter {
            stage.insert(record);
        }
        stage
    }
}

impl<'a> IntoIterator for &'a StageRecords {
    type Item = &'a DocumentRecord;
    type IntoIter = Values<'a, LineKey, DocumentRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Adds `qty` to the entry for `key`.
pub(crate) fn accumulate(map: &mut HashMap<LineKey, Decimal>, key: LineKey, qty: Decimal) {
    *map.entry(key).or_insert(Decimal::ZERO) += qty;
}
