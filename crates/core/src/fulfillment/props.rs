//! Property-based tests for the reconciliation engine.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::engine::{ReconciliationInput, reconcile};
use super::key::LineKey;
use super::record::{DocumentRecord, StageRecords};

const PO_LINES: usize = 6;

/// Quantities from 0.00 to 1,000.00.
fn qty() -> impl Strategy<Value = Decimal> {
    (0i64..100_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn po_line(index: usize) -> LineKey {
    LineKey::new(format!("PO-{}", index / 3), format!("{}", index % 3 + 1))
}

fn purchase_orders() -> impl Strategy<Value = StageRecords> {
    prop::collection::vec(qty(), PO_LINES).prop_map(|qtys| {
        qtys.into_iter()
            .enumerate()
            .map(|(i, q)| DocumentRecord::new(po_line(i), q, "PCS"))
            .collect()
    })
}

/// Inbound lines, each pointing at a PO line. Index `PO_LINES` points outside
/// the catalogue.
fn inbound() -> impl Strategy<Value = Vec<(usize, Decimal)>> {
    prop::collection::vec((0..=PO_LINES, qty()), 0..8)
}

fn inbound_docs(lines: &[(usize, Decimal)]) -> Vec<DocumentRecord> {
    lines
        .iter()
        .enumerate()
        .map(|(i, (po, q))| {
            DocumentRecord::new(LineKey::new(format!("IB-{i}"), "1"), *q, "PCS")
                .with_reference(Some(po_line(*po)))
        })
        .collect()
}

fn inbound_records(lines: &[(usize, Decimal)]) -> StageRecords {
    inbound_docs(lines).into_iter().collect()
}

/// Goods receipts, each pointing at an inbound line by index (possibly unknown).
fn receipts() -> impl Strategy<Value = Vec<(usize, Decimal)>> {
    prop::collection::vec((0usize..10, qty()), 0..8)
}

fn receipt_docs(lines: &[(usize, Decimal)]) -> Vec<DocumentRecord> {
    lines
        .iter()
        .enumerate()
        .map(|(i, (ib, q))| {
            DocumentRecord::new(LineKey::new(format!("GR-{i}"), "1"), *q, "PCS")
                .with_reference(Some(LineKey::new(format!("IB-{ib}"), "1")))
        })
        .collect()
}

fn receipt_records(lines: &[(usize, Decimal)]) -> StageRecords {
    receipt_docs(lines).into_iter().collect()
}

/// AP lines: PO line index, optional receipt index, quantity.
fn invoices() -> impl Strategy<Value = Vec<(usize, Option<usize>, Decimal)>> {
    prop::collection::vec((0..=PO_LINES, prop::option::of(0usize..10), qty()), 0..8)
}

fn invoice_docs(lines: &[(usize, Option<usize>, Decimal)]) -> Vec<DocumentRecord> {
    lines
        .iter()
        .enumerate()
        .map(|(i, (po, gr, q))| {
            DocumentRecord::new(LineKey::new(format!("AP-{i}"), "1"), *q, "PCS")
                .with_reference(Some(po_line(*po)))
                .with_source(gr.map(|g| LineKey::new(format!("GR-{g}"), "1")))
        })
        .collect()
}

fn invoice_records(lines: &[(usize, Option<usize>, Decimal)]) -> StageRecords {
    invoice_docs(lines).into_iter().collect()
}

fn world() -> impl Strategy<Value = ReconciliationInput> {
    (purchase_orders(), inbound(), receipts(), invoices()).prop_map(
        |(purchase_orders, ib, gr, ap)| ReconciliationInput {
            purchase_orders,
            inbound: inbound_records(&ib),
            receipts: receipt_records(&gr),
            invoices: invoice_records(&ap),
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Remaining quantity is never negative.
    #[test]
    fn prop_remaining_is_non_negative(input in world()) {
        let remainder = reconcile(&input);
        for (line, r) in remainder.iter() {
            prop_assert!(r.remaining >= Decimal::ZERO, "{} went negative: {}", line, r.remaining);
        }
    }

    /// Every PO line gets exactly one result; dangling references add none.
    #[test]
    fn prop_every_po_line_is_reported(input in world()) {
        let remainder = reconcile(&input);
        prop_assert_eq!(remainder.len(), input.purchase_orders.len());
        for record in &input.purchase_orders {
            prop_assert!(remainder.get(&record.line).is_some());
        }
    }

    /// With nothing downstream, the remaining quantity is the ordered quantity.
    #[test]
    fn prop_no_downstream_keeps_ordered(purchase_orders in purchase_orders()) {
        let input = ReconciliationInput {
            purchase_orders,
            ..ReconciliationInput::default()
        };
        let remainder = reconcile(&input);
        for record in &input.purchase_orders {
            prop_assert_eq!(remainder.remaining(&record.line), record.qty);
        }
    }

    /// Inbound quantity alone is subtracted as a sum over all inbound lines.
    #[test]
    fn prop_inbound_only_subtracts_sum(purchase_orders in purchase_orders(), ib in inbound()) {
        let input = ReconciliationInput {
            purchase_orders,
            inbound: inbound_records(&ib),
            ..ReconciliationInput::default()
        };
        let remainder = reconcile(&input);
        for index in 0..PO_LINES {
            let line = po_line(index);
            let ordered = input.purchase_orders.get(&line).map_or(Decimal::ZERO, |r| r.qty);
            let shipped: Decimal = ib.iter().filter(|(po, _)| *po == index).map(|(_, q)| *q).sum();
            prop_assert_eq!(remainder.remaining(&line), (ordered - shipped).max(Decimal::ZERO));
        }
    }

    /// Remaining never exceeds ordered plus the receipt surplus of the line.
    #[test]
    fn prop_remaining_bounded_by_ordered_plus_surplus(input in world()) {
        let remainder = reconcile(&input);
        for (_, r) in remainder.iter() {
            prop_assert!(r.remaining <= r.ordered + r.receipt_surplus);
        }
    }

    /// Reconciling the same input twice gives the same result.
    #[test]
    fn prop_reconcile_is_deterministic(input in world()) {
        prop_assert_eq!(reconcile(&input), reconcile(&input));
    }

    /// Splitting an inbound line into two lines of the same shipment against
    /// the same PO line leaves every result unchanged.
    #[test]
    fn prop_split_inbound_accumulates(
        purchase_orders in purchase_orders(),
        ib in inbound(),
        gr in receipts(),
        ap in invoices(),
    ) {
        let whole = ReconciliationInput {
            purchase_orders,
            inbound: inbound_records(&ib),
            receipts: receipt_records(&gr),
            invoices: invoice_records(&ap),
        };

        let mut split = StageRecords::new();
        for (i, (po, q)) in ib.iter().enumerate() {
            let first = (*q / Decimal::TWO).round_dp(2);
            split.insert(
                DocumentRecord::new(LineKey::new(format!("IB-{i}"), "1"), first, "PCS")
                    .with_reference(Some(po_line(*po))),
            );
            split.insert(
                DocumentRecord::new(LineKey::new(format!("IB-{i}"), "2"), *q - first, "PCS")
                    .with_reference(Some(po_line(*po))),
            );
        }
        let halves = ReconciliationInput {
            inbound: split,
            ..whole.clone()
        };

        prop_assert_eq!(reconcile(&whole), reconcile(&halves));
    }

    /// The order documents arrive in does not affect the result.
    #[test]
    fn prop_input_order_is_irrelevant(
        purchase_orders in purchase_orders(),
        ib in inbound(),
        gr in receipts(),
        ap in invoices(),
    ) {
        let forward = ReconciliationInput {
            purchase_orders: purchase_orders.clone(),
            inbound: inbound_records(&ib),
            receipts: receipt_records(&gr),
            invoices: invoice_records(&ap),
        };
        let reversed = ReconciliationInput {
            purchase_orders,
            inbound: inbound_docs(&ib).into_iter().rev().collect(),
            receipts: receipt_docs(&gr).into_iter().rev().collect(),
            invoices: invoice_docs(&ap).into_iter().rev().collect(),
        };

        prop_assert_eq!(reconcile(&forward), reconcile(&reversed));
    }
}
