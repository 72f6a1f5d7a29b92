//! The pure reconciliation pipeline.

use super::inbound::InboundAggregator;
use super::invoice::ApAggregator;
use super::receipt::ReceiptReconciler;
use super::record::StageRecords;
use super::remainder::{Remainder, RemainderCalculator};

/// Records of all four stages for one reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationInput {
    /// Purchase order lines with nominal quantities.
    pub purchase_orders: StageRecords,
    /// Inbound lines referencing PO lines.
    pub inbound: StageRecords,
    /// Goods receipt lines referencing inbound lines.
    pub receipts: StageRecords,
    /// AP invoice lines referencing PO lines and goods receipt lines.
    pub invoices: StageRecords,
}

/// Computes the remaining open quantity of every PO line.
///
/// `remaining = max(0, ordered - invoiced - inbound + receipt_surplus)`, where
/// `invoiced` leaves out AP quantity already netted against a goods receipt of
/// the same PO line.
#[must_use]
pub fn reconcile(input: &ReconciliationInput) -> Remainder {
    let inbound = InboundAggregator::sum_by_po_line(&input.inbound);
    let receipts = ReceiptReconciler::compute_receive_remain(
        &input.receipts,
        &input.invoices,
        &inbound.po_line_by_inbound,
    );
    let invoiced = ApAggregator::compute_ap_remain(&input.invoices, &receipts.ignored);

    RemainderCalculator::calculate(
        &input.purchase_orders,
        &inbound.qty_by_po_line,
        &invoiced,
        &receipts.surplus_by_po_line,
    )
}
