//! Remaining open quantity per PO line.

use std::collections::HashMap;
use std::collections::hash_map::Iter;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::key::LineKey;
use super::record::StageRecords;

/// The terms of the remainder formula for one PO line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LineRemainder {
    /// Nominal ordered quantity.
    pub ordered: Decimal,
    /// Quantity shipped toward the line.
    pub inbound: Decimal,
    /// Invoiced quantity not already netted against a goods receipt.
    pub invoiced: Decimal,
    /// Received quantity not yet invoiced.
    pub receipt_surplus: Decimal,
    /// `max(0, ordered - invoiced - inbound + receipt_surplus)`.
    pub remaining: Decimal,
}

impl LineRemainder {
    /// Applies the remainder formula.
    #[must_use]
    pub fn compute(
        ordered: Decimal,
        inbound: Decimal,
        invoiced: Decimal,
        receipt_surplus: Decimal,
    ) -> Self {
        let remaining = (ordered - invoiced - inbound + receipt_surplus).max(Decimal::ZERO);
        Self {
            ordered,
            inbound,
            invoiced,
            receipt_surplus,
            remaining,
        }
    }
}

/// Remaining quantity for every PO line of one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remainder {
    lines: HashMap<LineKey, LineRemainder>,
}

impl Remainder {
    /// Full breakdown for a PO line.
    #[must_use]
    pub fn get(&self, po_line: &LineKey) -> Option<&LineRemainder> {
        self.lines.get(po_line)
    }

    /// Remaining quantity for a PO line, zero when the line was not reconciled.
    #[must_use]
    pub fn remaining(&self, po_line: &LineKey) -> Decimal {
        self.lines
            .get(po_line)
            .map_or(Decimal::ZERO, |line| line.remaining)
    }

    /// Number of PO lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if no PO line was reconciled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterates lines in arbitrary order.
    pub fn iter(&self) -> Iter<'_, LineKey, LineRemainder> {
        self.lines.iter()
    }
}

/// Combines the stage aggregates into the final remainder.
pub struct RemainderCalculator;

impl RemainderCalculator {
    /// Computes the remainder of every PO line in the catalogue.
    ///
    /// Lines missing from an aggregate take zero for that term. Aggregate
    /// entries for PO lines outside the catalogue are ignored.
    #[must_use]
    pub fn calculate(
        purchase_orders: &StageRecords,
        inbound: &HashMap<LineKey, Decimal>,
        invoiced: &HashMap<LineKey, Decimal>,
        receipt_surplus: &HashMap<LineKey, Decimal>,
    ) -> Remainder {
        let term = |map: &HashMap<LineKey, Decimal>, key: &LineKey| {
            map.get(key).copied().unwrap_or(Decimal::ZERO)
        };

        let lines = purchase_orders
            .iter()
            .map(|po| {
                let line = LineRemainder::compute(
                    po.qty,
                    term(inbound, &po.line),
                    term(invoiced, &po.line),
                    term(receipt_surplus, &po.line),
                );
                (po.line.clone(), line)
            })
            .collect();

        Remainder { lines }
    }
}
