//! Inbound shipment aggregation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::key::LineKey;
use super::record::{StageRecords, accumulate};

/// Inbound quantities per PO line, plus the inbound line to PO line lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundSummary {
    /// Summed inbound quantity per PO line.
    pub qty_by_po_line: HashMap<LineKey, Decimal>,
    /// The PO line each inbound line ships toward.
    pub po_line_by_inbound: HashMap<LineKey, LineKey>,
}

impl InboundSummary {
    /// Inbound quantity for a PO line, zero if nothing shipped.
    #[must_use]
    pub fn qty_for(&self, po_line: &LineKey) -> Decimal {
        self.qty_by_po_line
            .get(po_line)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Aggregates inbound lines onto the PO lines they fulfil.
pub struct InboundAggregator;

impl InboundAggregator {
    /// Sums inbound quantity per referenced PO line.
    ///
    /// Inbound lines without a PO reference cannot be attributed to any PO
    /// line and are skipped. They also do not appear in the reverse lookup, so
    /// goods receipts against them are skipped later as well.
    #[must_use]
    pub fn sum_by_po_line(inbound: &StageRecords) -> InboundSummary {
        let mut summary = InboundSummary::default();

        for record in inbound {
            let Some(po_line) = &record.reference else {
                continue;
            };

            accumulate(&mut summary.qty_by_po_line, po_line.clone(), record.qty);
            summary
                .po_line_by_inbound
                .insert(record.line.clone(), po_line.clone());
        }

        summary
    }
}
