//! Fulfillment data types.

use chrono::NaiveDate;
use procura_shared::types::PageRequest;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::remainder::LineRemainder;

/// Purchase order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    /// Still accepting deliveries.
    Open,
    /// Fully delivered or manually closed.
    Closed,
    /// Cancelled before completion.
    Cancelled,
}

/// Purchase order approval status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting approval.
    Pending,
    /// Approved.
    Approved,
    /// Rejected.
    Rejected,
}

impl ApprovalStatus {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// Purchase order payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing paid.
    Unpaid,
    /// Partially paid.
    Partial,
    /// Fully paid.
    Paid,
}

impl PaymentStatus {
    /// Lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unpaid => "unpaid",
            Self::Partial => "partial",
            Self::Paid => "paid",
        }
    }
}

/// Inbound shipment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InboundStatus {
    /// Shipped, not yet closed out. This is the "open" inbound state.
    Pending,
    /// Closed out.
    Completed,
    /// Cancelled.
    Cancelled,
}

/// Goods receipt status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoodsReceiptStatus {
    /// Being counted.
    Draft,
    /// Confirmed.
    Completed,
    /// Cancelled.
    Cancelled,
}

/// A purchase order header with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    /// PO code.
    pub code: String,
    /// Supplier code.
    pub supplier_code: String,
    /// Supplier display name.
    pub supplier_name: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Lifecycle status.
    pub status: PurchaseOrderStatus,
    /// Approval status.
    pub approval_status: ApprovalStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Currency code of the prices.
    pub currency: String,
    /// Order lines.
    pub lines: Vec<PurchaseOrderLine>,
}

/// A purchase order line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrderLine {
    /// Line item code within the PO.
    pub item: String,
    /// Product code.
    pub product_code: String,
    /// Product display name.
    pub product_name: String,
    /// Nominal ordered quantity.
    pub qty: Decimal,
    /// Unit of measure.
    pub unit_code: String,
    /// Unit price in the PO currency.
    pub unit_price: Decimal,
}

/// One page of purchase orders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PurchaseOrderPage {
    /// The orders on this page.
    pub orders: Vec<PurchaseOrder>,
    /// Total matching orders across all pages.
    pub total: u64,
}

/// An inbound shipment line.
///
/// Reference fields are empty strings when the upstream row does not know
/// the PO line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundLine {
    /// Inbound document code.
    pub inbound_code: String,
    /// Inbound line item.
    pub inbound_item: String,
    /// Referenced PO code.
    pub po_code: String,
    /// Referenced PO line item.
    pub po_item: String,
    /// Shipped quantity.
    pub qty: Decimal,
    /// Unit of measure.
    pub unit_code: String,
}

/// A goods receipt line with its confirmation quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoodsReceiptLine {
    /// Goods receipt document code.
    pub receipt_code: String,
    /// Goods receipt line item.
    pub receipt_item: String,
    /// Referenced inbound code.
    pub inbound_code: String,
    /// Referenced inbound line item.
    pub inbound_item: String,
    /// Quantity of every confirmation sub-line.
    pub confirmed_qty: Vec<Decimal>,
    /// Unit of measure.
    pub unit_code: String,
}

/// An AP invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApInvoiceLine {
    /// Invoice code.
    pub invoice_code: String,
    /// Invoice line item.
    pub invoice_item: String,
    /// Referenced PO code.
    pub po_code: String,
    /// Referenced PO line item.
    pub po_item: String,
    /// Goods receipt code the line was invoiced against, if known.
    pub receipt_code: Option<String>,
    /// Goods receipt line item the line was invoiced against, if known.
    pub receipt_item: Option<String>,
    /// Invoiced quantity.
    pub qty: Decimal,
    /// Unit of measure.
    pub unit_code: String,
}

/// Caller-facing filter for the open-lines query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenLinesFilter {
    /// Restrict to these PO codes (empty = all).
    pub po_codes: Vec<String>,
    /// Restrict to these supplier codes (empty = all).
    pub supplier_codes: Vec<String>,
    /// Restrict to an approval status.
    pub approval_status: Option<ApprovalStatus>,
    /// Restrict to a payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Page of purchase orders to reconcile.
    pub page: PageRequest,
}

/// Filter passed to [`PurchaseOrderQuery`](super::query::PurchaseOrderQuery).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseOrderFilter {
    /// PO lifecycle status.
    pub status: PurchaseOrderStatus,
    /// PO codes (empty = all).
    pub po_codes: Vec<String>,
    /// Supplier codes (empty = all).
    pub supplier_codes: Vec<String>,
    /// Approval status.
    pub approval_status: Option<ApprovalStatus>,
    /// Payment status.
    pub payment_status: Option<PaymentStatus>,
    /// Page to fetch.
    pub page: PageRequest,
}

impl PurchaseOrderFilter {
    /// Open purchase orders matching the caller's filter.
    #[must_use]
    pub fn open(filter: &OpenLinesFilter) -> Self {
        Self {
            status: PurchaseOrderStatus::Open,
            po_codes: filter.po_codes.clone(),
            supplier_codes: filter.supplier_codes.clone(),
            approval_status: filter.approval_status,
            payment_status: filter.payment_status,
            page: filter.page,
        }
    }
}

/// Filter passed to [`InboundQuery`](super::query::InboundQuery).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundFilter {
    /// Inbound status.
    pub status: InboundStatus,
    /// Referenced PO codes.
    pub po_codes: Vec<String>,
    /// Referenced PO line items.
    pub po_items: Vec<String>,
}

/// Filter passed to [`GoodsReceiptQuery`](super::query::GoodsReceiptQuery).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoodsReceiptFilter {
    /// Goods receipt status.
    pub status: GoodsReceiptStatus,
    /// Referenced inbound codes.
    pub inbound_codes: Vec<String>,
    /// Referenced inbound line items.
    pub inbound_items: Vec<String>,
}

/// Filter passed to [`ApInvoiceQuery`](super::query::ApInvoiceQuery).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApInvoiceFilter {
    /// Referenced PO codes.
    pub po_codes: Vec<String>,
}

/// One response row: a PO line with its remaining open quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenLineRow {
    /// PO code.
    pub po_code: String,
    /// Supplier code.
    pub supplier_code: String,
    /// Supplier display name.
    pub supplier_name: String,
    /// Order date.
    pub order_date: NaiveDate,
    /// Approval status.
    pub approval_status: ApprovalStatus,
    /// Payment status.
    pub payment_status: PaymentStatus,
    /// Currency code.
    pub currency: String,
    /// PO line item.
    pub item: String,
    /// Product code.
    pub product_code: String,
    /// Product display name.
    pub product_name: String,
    /// Nominal ordered quantity.
    pub ordered_qty: Decimal,
    /// Unit of measure.
    pub unit_code: String,
    /// Unit price.
    pub unit_price: Decimal,
    /// Remaining open quantity.
    pub remain_qty: Decimal,
    /// Terms the remainder was computed from, if the line was reconciled.
    pub breakdown: Option<LineRemainder>,
}
