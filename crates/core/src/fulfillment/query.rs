//! Collaborator queries consumed by the reconciliation pipeline.
//!
//! These traits are implemented by the db crate to provide actual database
//! operations, and by in-memory fakes in tests.

use std::future::Future;

use super::error::FulfillmentError;
use super::types::{
    ApInvoiceFilter, ApInvoiceLine, GoodsReceiptFilter, GoodsReceiptLine, InboundFilter,
    InboundLine, PurchaseOrderFilter, PurchaseOrderPage,
};

/// Purchase order lookup.
pub trait PurchaseOrderQuery: Send + Sync {
    /// Find one page of purchase orders with their lines.
    fn find_purchase_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> impl Future<Output = Result<PurchaseOrderPage, FulfillmentError>> + Send;
}

/// Inbound shipment lookup.
pub trait InboundQuery: Send + Sync {
    /// Find inbound lines referencing the given PO codes and items.
    fn find_inbound_lines(
        &self,
        filter: &InboundFilter,
    ) -> impl Future<Output = Result<Vec<InboundLine>, FulfillmentError>> + Send;
}

/// Goods receipt lookup.
pub trait GoodsReceiptQuery: Send + Sync {
    /// Find goods receipt lines referencing the given inbound codes and items.
    fn find_goods_receipt_lines(
        &self,
        filter: &GoodsReceiptFilter,
    ) -> impl Future<Output = Result<Vec<GoodsReceiptLine>, FulfillmentError>> + Send;
}

/// AP invoice lookup.
pub trait ApInvoiceQuery: Send + Sync {
    /// Find AP invoice lines referencing the given PO codes.
    fn find_ap_invoice_lines(
        &self,
        filter: &ApInvoiceFilter,
    ) -> impl Future<Output = Result<Vec<ApInvoiceLine>, FulfillmentError>> + Send;
}
