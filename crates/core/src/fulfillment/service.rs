//! Fulfillment service: fetches every stage and reconciles open quantities.

use std::sync::Arc;

use procura_shared::types::PageResponse;
use tracing::{debug, info};

use super::assemble::ResponseAssembler;
use super::engine::{ReconciliationInput, reconcile};
use super::error::{FulfillmentError, Stage};
use super::fetch::StageFetcher;
use super::query::{ApInvoiceQuery, GoodsReceiptQuery, InboundQuery, PurchaseOrderQuery};
use super::record::StageRecords;
use super::types::{OpenLineRow, OpenLinesFilter, PurchaseOrderFilter};

/// Reconciles purchase order lines against their downstream documents.
///
/// Stage dependencies:
/// - inbound needs the PO lines,
/// - goods receipts need the inbound lines,
/// - AP invoices need only the PO lines.
///
/// The goods receipt and AP invoice fetches are therefore independent and run
/// concurrently unless disabled. Any failure aborts the whole call.
pub struct FulfillmentService<P, I, G, A> {
    purchase_orders: Arc<P>,
    inbound: Arc<I>,
    receipts: Arc<G>,
    invoices: Arc<A>,
    concurrent_branches: bool,
}

impl<P, I, G, A> FulfillmentService<P, I, G, A>
where
    P: PurchaseOrderQuery,
    I: InboundQuery,
    G: GoodsReceiptQuery,
    A: ApInvoiceQuery,
{
    /// Create a new fulfillment service.
    #[must_use]
    pub fn new(
        purchase_orders: Arc<P>,
        inbound: Arc<I>,
        receipts: Arc<G>,
        invoices: Arc<A>,
    ) -> Self {
        Self {
            purchase_orders,
            inbound,
            receipts,
            invoices,
            concurrent_branches: true,
        }
    }

    /// Run the goods receipt and AP invoice fetches one after the other.
    #[must_use]
    pub fn with_concurrent_branches(mut self, concurrent: bool) -> Self {
        self.concurrent_branches = concurrent;
        self
    }

    /// Returns one row per line of the requested page of open purchase orders,
    /// each with its remaining open quantity.
    ///
    /// # Errors
    ///
    /// Returns `FulfillmentError::InvalidFilter` if the page size is zero, or
    /// the first fetch or shape error of any stage.
    pub async fn open_lines(
        &self,
        filter: &OpenLinesFilter,
    ) -> Result<PageResponse<OpenLineRow>, FulfillmentError> {
        if filter.page.per_page == 0 {
            return Err(FulfillmentError::InvalidFilter(
                "per_page must be positive".to_string(),
            ));
        }

        let page = self
            .purchase_orders
            .find_purchase_orders(&PurchaseOrderFilter::open(filter))
            .await?;
        let purchase_orders = StageFetcher::purchase_order_records(&page.orders);
        debug!(
            stage = %Stage::PurchaseOrder,
            orders = page.orders.len(),
            lines = purchase_orders.len(),
            "Fetched stage"
        );

        let inbound = StageFetcher::inbound(&*self.inbound, &purchase_orders).await?;
        let (receipts, invoices) = self.fetch_branches(&purchase_orders, &inbound).await?;

        let input = ReconciliationInput {
            purchase_orders,
            inbound,
            receipts,
            invoices,
        };
        let remainder = reconcile(&input);
        let rows = ResponseAssembler::assemble(&page.orders, &remainder);

        info!(
            orders = page.orders.len(),
            rows = rows.len(),
            total = page.total,
            "Reconciled open purchase order lines"
        );

        Ok(PageResponse::new(
            rows,
            filter.page.page,
            filter.page.per_page,
            page.total,
        ))
    }

    async fn fetch_branches(
        &self,
        purchase_orders: &StageRecords,
        inbound: &StageRecords,
    ) -> Result<(StageRecords, StageRecords), FulfillmentError> {
        let receipts = StageFetcher::goods_receipts(&*self.receipts, inbound);
        let invoices = StageFetcher::ap_invoices(&*self.invoices, purchase_orders);

        if self.concurrent_branches {
            tokio::try_join!(receipts, invoices)
        } else {
            Ok((receipts.await?, invoices.await?))
        }
    }
}
