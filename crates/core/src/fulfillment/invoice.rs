//! AP invoice aggregation.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use super::key::{LineKey, PairingKey};
use super::record::{StageRecords, accumulate};

/// Aggregates AP invoice lines onto PO lines.
pub struct ApAggregator;

impl ApAggregator {
    /// Sums AP quantity per PO line, leaving out pairings already netted
    /// against a goods receipt.
    ///
    /// An AP line without a receipt source has no pairing, so it is never
    /// ignored. An AP line without a PO reference is skipped.
    #[must_use]
    pub fn compute_ap_remain(
        invoices: &StageRecords,
        ignored: &HashSet<PairingKey>,
    ) -> HashMap<LineKey, Decimal> {
        let mut by_po_line = HashMap::new();

        for record in invoices {
            let Some(po_line) = &record.reference else {
                continue;
            };

            if let Some(receipt_line) = &record.source {
                let pairing = PairingKey::new(po_line.clone(), receipt_line.clone());
                if ignored.contains(&pairing) {
                    continue;
                }
            }

            accumulate(&mut by_po_line, po_line.clone(), record.qty);
        }

        by_po_line
    }
}
