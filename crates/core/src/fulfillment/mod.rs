//! Purchase-order fulfillment reconciliation.
//!
//! Computes how much of each purchase order line is still open by chaining
//! through the downstream documents that consume it:
//! - Inbound shipments (shipped toward a PO line)
//! - Goods receipts (confirmed against an inbound line)
//! - AP invoices (invoiced against a PO line, optionally against a goods receipt line)
//!
//! The engine itself ([`reconcile`]) is a pure function over [`StageRecords`].
//! [`FulfillmentService`] fetches the stages through the query traits in
//! [`query`] and assembles the response rows.

pub mod assemble;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod inbound;
pub mod invoice;
pub mod key;
pub mod query;
pub mod receipt;
pub mod record;
pub mod remainder;
pub mod service;
pub mod types;

#[cfg(test)]
mod props;
#[cfg(test)]
mod tests;

pub use assemble::ResponseAssembler;
pub use engine::{ReconciliationInput, reconcile};
pub use error::{FulfillmentError, Stage};
pub use fetch::StageFetcher;
pub use inbound::{InboundAggregator, InboundSummary};
pub use invoice::ApAggregator;
pub use key::{LineKey, PairingKey};
pub use query::{ApInvoiceQuery, GoodsReceiptQuery, InboundQuery, PurchaseOrderQuery};
pub use receipt::{ReceiptReconciler, ReceiptReconciliation};
pub use record::{DocumentRecord, StageRecords};
pub use remainder::{LineRemainder, Remainder, RemainderCalculator};
pub use service::FulfillmentService;
pub use types::{
    ApInvoiceFilter, ApInvoiceLine, ApprovalStatus, GoodsReceiptFilter, GoodsReceiptLine,
    GoodsReceiptStatus, InboundFilter, InboundLine, InboundStatus, OpenLineRow, OpenLinesFilter,
    PaymentStatus, PurchaseOrder, PurchaseOrderFilter, PurchaseOrderLine, PurchaseOrderPage,
    PurchaseOrderStatus,
};
