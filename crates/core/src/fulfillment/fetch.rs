//! Stage fetchers: query a collaborator and project its lines into records.

use rust_decimal::Decimal;
use tracing::debug;

use super::error::{FulfillmentError, Stage};
use super::key::LineKey;
use super::query::{ApInvoiceQuery, GoodsReceiptQuery, InboundQuery};
use super::record::{DocumentRecord, StageRecords};
use super::types::{
    ApInvoiceFilter, ApInvoiceLine, GoodsReceiptFilter, GoodsReceiptLine, GoodsReceiptStatus,
    InboundFilter, InboundLine, InboundStatus, PurchaseOrder,
};

/// Adapters between the collaborator queries and [`StageRecords`].
pub struct StageFetcher;

impl StageFetcher {
    /// Projects purchase order lines. Each record carries the nominal ordered quantity.
    #[must_use]
    pub fn purchase_order_records(orders: &[PurchaseOrder]) -> StageRecords {
        orders
            .iter()
            .flat_map(|order| {
                order.lines.iter().map(|line| {
                    DocumentRecord::new(
                        LineKey::new(order.code.as_str(), line.item.as_str()),
                        line.qty,
                        line.unit_code.as_str(),
                    )
                })
            })
            .collect()
    }

    /// Projects inbound lines, referencing the PO line they ship toward.
    #[must_use]
    pub fn inbound_records(lines: &[InboundLine]) -> StageRecords {
        lines
            .iter()
            .map(|line| {
                DocumentRecord::new(
                    LineKey::new(line.inbound_code.as_str(), line.inbound_item.as_str()),
                    line.qty,
                    line.unit_code.as_str(),
                )
                .with_reference(LineKey::from_parts(&line.po_code, &line.po_item))
            })
            .collect()
    }

    /// Projects goods receipt lines, summing their confirmation sub-lines.
    #[must_use]
    pub fn goods_receipt_records(lines: &[GoodsReceiptLine]) -> StageRecords {
        lines
            .iter()
            .map(|line| {
                let confirmed: Decimal = line.confirmed_qty.iter().copied().sum();
                DocumentRecord::new(
                    LineKey::new(line.receipt_code.as_str(), line.receipt_item.as_str()),
                    confirmed,
                    line.unit_code.as_str(),
                )
                .with_reference(LineKey::from_parts(&line.inbound_code, &line.inbound_item))
            })
            .collect()
    }

    /// Projects AP invoice lines with their PO reference and goods receipt source.
    #[must_use]
    pub fn ap_invoice_records(lines: &[ApInvoiceLine]) -> StageRecords {
        lines
            .iter()
            .map(|line| {
                let source = match (&line.receipt_code, &line.receipt_item) {
                    (Some(code), Some(item)) => LineKey::from_parts(code, item),
                    _ => None,
                };
                DocumentRecord::new(
                    LineKey::new(line.invoice_code.as_str(), line.invoice_item.as_str()),
                    line.qty,
                    line.unit_code.as_str(),
                )
                .with_reference(LineKey::from_parts(&line.po_code, &line.po_item))
                .with_source(source)
            })
            .collect()
    }

    /// Fetches pending inbound lines for the given PO lines.
    pub async fn inbound<Q: InboundQuery>(
        query: &Q,
        purchase_orders: &StageRecords,
    ) -> Result<StageRecords, FulfillmentError> {
        if purchase_orders.is_empty() {
            return Ok(StageRecords::new());
        }

        let (po_codes, po_items) = purchase_orders.codes_and_items();
        let filter = InboundFilter {
            status: InboundStatus::Pending,
            po_codes,
            po_items,
        };

        let lines = query.find_inbound_lines(&filter).await?;
        debug!(stage = %Stage::Inbound, lines = lines.len(), "Fetched stage");
        Ok(Self::inbound_records(&lines))
    }

    /// Fetches completed goods receipt lines for the given inbound lines.
    pub async fn goods_receipts<Q: GoodsReceiptQuery>(
        query: &Q,
        inbound: &StageRecords,
    ) -> Result<StageRecords, FulfillmentError> {
        if inbound.is_empty() {
            return Ok(StageRecords::new());
        }

        let (inbound_codes, inbound_items) = inbound.codes_and_items();
        let filter = GoodsReceiptFilter {
            status: GoodsReceiptStatus::Completed,
            inbound_codes,
            inbound_items,
        };

        let lines = query.find_goods_receipt_lines(&filter).await?;
        debug!(stage = %Stage::GoodsReceipt, lines = lines.len(), "Fetched stage");
        Ok(Self::goods_receipt_records(&lines))
    }

    /// Fetches AP invoice lines for the given PO lines.
    pub async fn ap_invoices<Q: ApInvoiceQuery>(
        query: &Q,
        purchase_orders: &StageRecords,
    ) -> Result<StageRecords, FulfillmentError> {
        if purchase_orders.is_empty() {
            return Ok(StageRecords::new());
        }

        let (po_codes, _) = purchase_orders.codes_and_items();
        let filter = ApInvoiceFilter { po_codes };

        let lines = query.find_ap_invoice_lines(&filter).await?;
        debug!(stage = %Stage::ApInvoice, lines = lines.len(), "Fetched stage");
        Ok(Self::ap_invoice_records(&lines))
    }
}
