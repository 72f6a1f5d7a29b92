//! Joins the remainder back onto purchase order lines.

use super::key::LineKey;
use super::remainder::Remainder;
use super::types::{OpenLineRow, PurchaseOrder};

/// Builds response rows from purchase orders and their remainder.
pub struct ResponseAssembler;

impl ResponseAssembler {
    /// Emits one row per PO line, sorted by PO code then line item.
    ///
    /// No line is filtered out. A line without a computed remainder gets
    /// `remain_qty = 0` and no breakdown.
    #[must_use]
    pub fn assemble(orders: &[PurchaseOrder], remainder: &Remainder) -> Vec<OpenLineRow> {
        let mut rows: Vec<OpenLineRow> = orders
            .iter()
            .flat_map(|order| {
                order.lines.iter().map(move |line| {
                    let key = LineKey::new(order.code.as_str(), line.item.as_str());
                    OpenLineRow {
                        po_code: order.code.clone(),
                        supplier_code: order.supplier_code.clone(),
                        supplier_name: order.supplier_name.clone(),
                        order_date: order.order_date,
                        approval_status: order.approval_status,
                        payment_status: order.payment_status,
                        currency: order.currency.clone(),
                        item: line.item.clone(),
                        product_code: line.product_code.clone(),
                        product_name: line.product_name.clone(),
                        ordered_qty: line.qty,
                        unit_code: line.unit_code.clone(),
                        unit_price: line.unit_price,
                        remain_qty: remainder.remaining(&key),
                        breakdown: remainder.get(&key).copied(),
                    }
                })
            })
            .collect();

        rows.sort_by(|a, b| (&a.po_code, &a.item).cmp(&(&b.po_code, &b.item)));
        rows
    }
}
