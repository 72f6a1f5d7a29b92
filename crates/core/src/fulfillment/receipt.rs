//! Goods receipt reconciliation against AP invoices.
//!
//! A goods receipt confirms quantity that was already counted once as inbound.
//! Part of that quantity may also have been invoiced against the very same
//! receipt line. The reconciler works out, per PO line, how much confirmed
//! quantity is not yet invoiced (the surplus) and which AP quantities were
//! already netted against a receipt and so must stay out of the AP total.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use super::key::{LineKey, PairingKey};
use super::record::{StageRecords, accumulate};

/// Output of [`ReceiptReconciler::compute_receive_remain`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptReconciliation {
    /// Confirmed-but-not-invoiced quantity per PO line.
    pub surplus_by_po_line: HashMap<LineKey, Decimal>,
    /// PO/receipt pairings whose AP quantity is already netted into the surplus.
    pub ignored: HashSet<PairingKey>,
}

impl ReceiptReconciliation {
    /// Surplus for a PO line, zero if no receipt resolved to it.
    #[must_use]
    pub fn surplus_for(&self, po_line: &LineKey) -> Decimal {
        self.surplus_by_po_line
            .get(po_line)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Reconciles goods receipt confirmations with AP invoice lines.
pub struct ReceiptReconciler;

impl ReceiptReconciler {
    /// Sums AP quantity per PO line / receipt line pairing.
    ///
    /// AP lines lacking either the PO reference or the receipt source have no
    /// pairing and are left out.
    #[must_use]
    pub fn matched_ap_by_pairing(invoices: &StageRecords) -> HashMap<PairingKey, Decimal> {
        let mut matched: HashMap<PairingKey, Decimal> = HashMap::new();

        for record in invoices {
            let (Some(po_line), Some(receipt_line)) = (&record.reference, &record.source) else {
                continue;
            };
            *matched
                .entry(PairingKey::new(po_line.clone(), receipt_line.clone()))
                .or_insert(Decimal::ZERO) += record.qty;
        }

        matched
    }

    /// Computes the goods receipt surplus per PO line and the ignored pairings.
    ///
    /// For every receipt line:
    /// 1. resolve its PO line through the inbound line it references,
    /// 2. look up AP quantity invoiced against exactly this PO line and receipt line,
    /// 3. add `max(0, received - matched)` to the PO line's surplus,
    /// 4. if matched quantity is positive, mark the pairing as ignored.
    ///
    /// A receipt line whose inbound origin is unknown (no reference, or an
    /// inbound line outside `po_line_by_inbound`) cannot be attributed to a PO
    /// line. It contributes nothing and is not an error.
    #[must_use]
    pub fn compute_receive_remain(
        receipts: &StageRecords,
        invoices: &StageRecords,
        po_line_by_inbound: &HashMap<LineKey, LineKey>,
    ) -> ReceiptReconciliation {
        let matched = Self::matched_ap_by_pairing(invoices);
        let mut result = ReceiptReconciliation::default();

        for receipt in receipts {
            let Some(po_line) = receipt
                .reference
                .as_ref()
                .and_then(|inbound_line| po_line_by_inbound.get(inbound_line))
            else {
                continue;
            };

            let pairing = PairingKey::new(po_line.clone(), receipt.line.clone());
            let matched_qty = matched.get(&pairing).copied().unwrap_or(Decimal::ZERO);

            let diff = (receipt.qty - matched_qty).max(Decimal::ZERO);
            accumulate(&mut result.surplus_by_po_line, po_line.clone(), diff);

            if matched_qty > Decimal::ZERO {
                result.ignored.insert(pairing);
            }
        }

        result
    }
}
