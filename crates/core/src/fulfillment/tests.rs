//! Pipeline tests against in-memory collaborators.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::NaiveDate;
use procura_shared::types::PageRequest;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

// ============================================================================
// Fake collaborators
// ============================================================================

#[derive(Default)]
struct InMemoryDocuments {
    orders: Vec<PurchaseOrder>,
    inbound: Vec<InboundLine>,
    receipts: Vec<GoodsReceiptLine>,
    invoices: Vec<ApInvoiceLine>,
    failing: Option<Stage>,
    calls: [AtomicUsize; 4],
}

impl InMemoryDocuments {
    fn calls(&self, stage: Stage) -> usize {
        self.calls[stage as usize].load(Ordering::SeqCst)
    }

    fn enter(&self, stage: Stage) -> Result<(), FulfillmentError> {
        self.calls[stage as usize].fetch_add(1, Ordering::SeqCst);
        if self.failing == Some(stage) {
            return Err(FulfillmentError::fetch(stage, "connection refused"));
        }
        Ok(())
    }
}

impl PurchaseOrderQuery for InMemoryDocuments {
    async fn find_purchase_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> Result<PurchaseOrderPage, FulfillmentError> {
        self.enter(Stage::PurchaseOrder)?;

        let matching: Vec<PurchaseOrder> = self
            .orders
            .iter()
            .filter(|o| o.status == filter.status)
            .filter(|o| filter.po_codes.is_empty() || filter.po_codes.contains(&o.code))
            .filter(|o| {
                filter.supplier_codes.is_empty() || filter.supplier_codes.contains(&o.supplier_code)
            })
            .filter(|o| filter.approval_status.is_none_or(|s| s == o.approval_status))
            .filter(|o| filter.payment_status.is_none_or(|s| s == o.payment_status))
            .cloned()
            .collect();

        let total = matching.len() as u64;
        let offset = usize::try_from(filter.page.offset()).unwrap();
        let limit = usize::try_from(filter.page.limit()).unwrap();
        Ok(PurchaseOrderPage {
            orders: matching.into_iter().skip(offset).take(limit).collect(),
            total,
        })
    }
}

impl InboundQuery for InMemoryDocuments {
    async fn find_inbound_lines(
        &self,
        filter: &InboundFilter,
    ) -> Result<Vec<InboundLine>, FulfillmentError> {
        self.enter(Stage::Inbound)?;
        assert_eq!(filter.status, InboundStatus::Pending);
        Ok(self
            .inbound
            .iter()
            .filter(|l| filter.po_codes.contains(&l.po_code))
            .cloned()
            .collect())
    }
}

impl GoodsReceiptQuery for InMemoryDocuments {
    async fn find_goods_receipt_lines(
        &self,
        filter: &GoodsReceiptFilter,
    ) -> Result<Vec<GoodsReceiptLine>, FulfillmentError> {
        self.enter(Stage::GoodsReceipt)?;
        assert_eq!(filter.status, GoodsReceiptStatus::Completed);
        Ok(self
            .receipts
            .iter()
            .filter(|l| filter.inbound_codes.contains(&l.inbound_code))
            .cloned()
            .collect())
    }
}

impl ApInvoiceQuery for InMemoryDocuments {
    async fn find_ap_invoice_lines(
        &self,
        filter: &ApInvoiceFilter,
    ) -> Result<Vec<ApInvoiceLine>, FulfillmentError> {
        self.enter(Stage::ApInvoice)?;
        Ok(self
            .invoices
            .iter()
            .filter(|l| filter.po_codes.contains(&l.po_code))
            .cloned()
            .collect())
    }
}

type Service = FulfillmentService<
    InMemoryDocuments,
    InMemoryDocuments,
    InMemoryDocuments,
    InMemoryDocuments,
>;

fn service(docs: &Arc<InMemoryDocuments>) -> Service {
    FulfillmentService::new(
        Arc::clone(docs),
        Arc::clone(docs),
        Arc::clone(docs),
        Arc::clone(docs),
    )
}

// ============================================================================
// Builders
// ============================================================================

fn purchase_order(code: &str, lines: &[(&str, Decimal)]) -> PurchaseOrder {
    PurchaseOrder {
        code: code.to_string(),
        supplier_code: "SUP-1".to_string(),
        supplier_name: "Acme Supplies".to_string(),
        order_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
        status: PurchaseOrderStatus::Open,
        approval_status: ApprovalStatus::Approved,
        payment_status: PaymentStatus::Unpaid,
        currency: "USD".to_string(),
        lines: lines
            .iter()
            .map(|(item, qty)| PurchaseOrderLine {
                item: (*item).to_string(),
                product_code: format!("SKU-{item}"),
                product_name: format!("Item {item}"),
                qty: *qty,
                unit_code: "PCS".to_string(),
                unit_price: dec!(9.99),
            })
            .collect(),
    }
}

fn inbound(code: &str, po: (&str, &str), qty: Decimal) -> InboundLine {
    InboundLine {
        inbound_code: code.to_string(),
        inbound_item: "1".to_string(),
        po_code: po.0.to_string(),
        po_item: po.1.to_string(),
        qty,
        unit_code: "PCS".to_string(),
    }
}

fn receipt(code: &str, inbound_code: &str, confirmed: &[Decimal]) -> GoodsReceiptLine {
    GoodsReceiptLine {
        receipt_code: code.to_string(),
        receipt_item: "1".to_string(),
        inbound_code: inbound_code.to_string(),
        inbound_item: "1".to_string(),
        confirmed_qty: confirmed.to_vec(),
        unit_code: "PCS".to_string(),
    }
}

fn invoice(
    code: &str,
    po: (&str, &str),
    receipt_code: Option<&str>,
    qty: Decimal,
) -> ApInvoiceLine {
    ApInvoiceLine {
        invoice_code: code.to_string(),
        invoice_item: "1".to_string(),
        po_code: po.0.to_string(),
        po_item: po.1.to_string(),
        receipt_code: receipt_code.map(String::from),
        receipt_item: receipt_code.map(|_| "1".to_string()),
        qty,
        unit_code: "PCS".to_string(),
    }
}

async fn remain_of(docs: InMemoryDocuments, po: &str, item: &str) -> Decimal {
    let docs = Arc::new(docs);
    let page = service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();
    page.data
        .iter()
        .find(|r| r.po_code == po && r.item == item)
        .map(|r| r.remain_qty)
        .unwrap()
}

// ============================================================================
// Reconciliation scenarios
// ============================================================================

#[tokio::test]
async fn test_no_downstream_activity_keeps_ordered_qty() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(100)), ("20", dec!(3.5))])],
        ..Default::default()
    };
    let docs = Arc::new(docs);

    let page = service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    for row in &page.data {
        assert_eq!(row.remain_qty, row.ordered_qty);
    }
}

#[tokio::test]
async fn test_received_and_invoiced_against_same_receipt_is_not_double_counted() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(100))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(100))],
        receipts: vec![receipt("GR-1", "IB-1", &[dec!(100)])],
        invoices: vec![invoice("AP-1", ("PO-1", "10"), Some("GR-1"), dec!(100))],
        ..Default::default()
    };

    assert_eq!(remain_of(docs, "PO-1", "10").await, Decimal::ZERO);
}

#[tokio::test]
async fn test_partial_inbound_without_receipt_or_invoice() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(50))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(30))],
        ..Default::default()
    };

    assert_eq!(remain_of(docs, "PO-1", "10").await, dec!(20));
}

#[tokio::test]
async fn test_receipt_ahead_of_invoice() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(50))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(50))],
        receipts: vec![receipt("GR-1", "IB-1", &[dec!(30), dec!(20)])],
        invoices: vec![invoice("AP-1", ("PO-1", "10"), Some("GR-1"), dec!(20))],
        ..Default::default()
    };
    let docs = Arc::new(docs);

    let page = service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();
    let breakdown = page.data[0].breakdown.unwrap();

    assert_eq!(page.data[0].remain_qty, dec!(30));
    assert_eq!(breakdown.inbound, dec!(50));
    assert_eq!(breakdown.invoiced, Decimal::ZERO);
    assert_eq!(breakdown.receipt_surplus, dec!(30));
}

#[tokio::test]
async fn test_receipt_with_unknown_inbound_origin_contributes_nothing() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(50))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(30))],
        // IB-1 is known; the receipt below points at IB-1 line 2, which is not.
        receipts: vec![GoodsReceiptLine {
            inbound_item: "2".to_string(),
            ..receipt("GR-1", "IB-1", &[dec!(30)])
        }],
        ..Default::default()
    };

    assert_eq!(remain_of(docs, "PO-1", "10").await, dec!(20));
}

#[tokio::test]
async fn test_over_delivery_clamps_at_zero() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(10))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(10))],
        invoices: vec![invoice("AP-1", ("PO-1", "10"), None, dec!(10))],
        ..Default::default()
    };

    assert_eq!(remain_of(docs, "PO-1", "10").await, Decimal::ZERO);
}

#[tokio::test]
async fn test_invoice_without_receipt_source_reduces_open_qty() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(100))])],
        invoices: vec![invoice("AP-1", ("PO-1", "10"), None, dec!(30))],
        ..Default::default()
    };

    assert_eq!(remain_of(docs, "PO-1", "10").await, dec!(70));
}

#[tokio::test]
async fn test_padded_codes_are_matched_verbatim_through_every_link() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1 ", &[("10", dec!(100))])],
        inbound: vec![inbound("IB-1 ", ("PO-1 ", "10"), dec!(60))],
        receipts: vec![receipt("GR-1 ", "IB-1 ", &[dec!(60)])],
        invoices: vec![invoice("AP-1", ("PO-1 ", "10"), Some("GR-1 "), dec!(40))],
        ..Default::default()
    };

    // 100 - 60 inbound + 20 receipt surplus; the 40 invoiced is netted against the receipt.
    assert_eq!(remain_of(docs, "PO-1 ", "10").await, dec!(60));
}

#[tokio::test]
async fn test_reconciliation_is_idempotent() {
    let docs = InMemoryDocuments {
        orders: vec![
            purchase_order("PO-1", &[("10", dec!(50)), ("20", dec!(8))]),
            purchase_order("PO-2", &[("10", dec!(12))]),
        ],
        inbound: vec![
            inbound("IB-1", ("PO-1", "10"), dec!(50)),
            inbound("IB-2", ("PO-2", "10"), dec!(4)),
        ],
        receipts: vec![receipt("GR-1", "IB-1", &[dec!(50)])],
        invoices: vec![
            invoice("AP-1", ("PO-1", "10"), Some("GR-1"), dec!(20)),
            invoice("AP-2", ("PO-2", "10"), None, dec!(1)),
        ],
        ..Default::default()
    };
    let docs = Arc::new(docs);
    let service = service(&docs);

    let first = service.open_lines(&OpenLinesFilter::default()).await.unwrap();
    let second = service.open_lines(&OpenLinesFilter::default()).await.unwrap();

    assert_eq!(first.data, second.data);
}

#[tokio::test]
async fn test_sequential_and_concurrent_branches_agree() {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(50))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(50))],
        receipts: vec![receipt("GR-1", "IB-1", &[dec!(50)])],
        invoices: vec![invoice("AP-1", ("PO-1", "10"), Some("GR-1"), dec!(20))],
        ..Default::default()
    };
    let docs = Arc::new(docs);

    let concurrent = service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();
    let sequential = service(&docs)
        .with_concurrent_branches(false)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();

    assert_eq!(concurrent.data, sequential.data);
}

// ============================================================================
// Errors and short-circuits
// ============================================================================

#[rstest]
#[case(Stage::PurchaseOrder)]
#[case(Stage::Inbound)]
#[case(Stage::GoodsReceipt)]
#[case(Stage::ApInvoice)]
#[tokio::test]
async fn test_any_stage_failure_aborts(
    #[case] stage: Stage,
    #[values(true, false)] concurrent: bool,
) {
    let docs = InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(50))])],
        inbound: vec![inbound("IB-1", ("PO-1", "10"), dec!(50))],
        receipts: vec![receipt("GR-1", "IB-1", &[dec!(50)])],
        invoices: vec![invoice("AP-1", ("PO-1", "10"), Some("GR-1"), dec!(20))],
        failing: Some(stage),
        ..Default::default()
    };
    let docs = Arc::new(docs);

    let result = service(&docs)
        .with_concurrent_branches(concurrent)
        .open_lines(&OpenLinesFilter::default())
        .await;

    match result {
        Err(err) => assert_eq!(err.stage(), Some(stage)),
        Ok(_) => panic!("expected {stage} failure to abort"),
    }
}

#[tokio::test]
async fn test_empty_purchase_order_page_skips_downstream_fetches() {
    let docs = Arc::new(InMemoryDocuments::default());

    let page = service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.meta.total, 0);
    assert_eq!(docs.calls(Stage::PurchaseOrder), 1);
    assert_eq!(docs.calls(Stage::Inbound), 0);
    assert_eq!(docs.calls(Stage::GoodsReceipt), 0);
    assert_eq!(docs.calls(Stage::ApInvoice), 0);
}

#[tokio::test]
async fn test_no_inbound_skips_goods_receipt_fetch_only() {
    let docs = Arc::new(InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(5))])],
        ..Default::default()
    });

    service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();

    assert_eq!(docs.calls(Stage::Inbound), 1);
    assert_eq!(docs.calls(Stage::GoodsReceipt), 0);
    assert_eq!(docs.calls(Stage::ApInvoice), 1);
}

#[tokio::test]
async fn test_zero_page_size_is_rejected() {
    let docs = Arc::new(InMemoryDocuments::default());
    let filter = OpenLinesFilter {
        page: PageRequest::new(1, 0),
        ..Default::default()
    };

    let result = service(&docs).open_lines(&filter).await;

    assert!(matches!(result, Err(FulfillmentError::InvalidFilter(_))));
    assert_eq!(docs.calls(Stage::PurchaseOrder), 0);
}

// ============================================================================
// Filtering and pagination
// ============================================================================

#[tokio::test]
async fn test_pagination_meta_counts_purchase_orders() {
    let docs = Arc::new(InMemoryDocuments {
        orders: vec![
            purchase_order("PO-1", &[("10", dec!(1)), ("20", dec!(1))]),
            purchase_order("PO-2", &[("10", dec!(1))]),
            purchase_order("PO-3", &[("10", dec!(1))]),
        ],
        ..Default::default()
    });
    let filter = OpenLinesFilter {
        page: PageRequest::new(1, 2),
        ..Default::default()
    };

    let page = service(&docs).open_lines(&filter).await.unwrap();

    assert_eq!(page.data.len(), 3);
    assert_eq!(page.meta.total, 3);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.meta.per_page, 2);
}

#[tokio::test]
async fn test_only_open_purchase_orders_are_reconciled() {
    let mut closed = purchase_order("PO-2", &[("10", dec!(1))]);
    closed.status = PurchaseOrderStatus::Closed;
    let docs = Arc::new(InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(1))]), closed],
        ..Default::default()
    });

    let page = service(&docs)
        .open_lines(&OpenLinesFilter::default())
        .await
        .unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].po_code, "PO-1");
}

#[tokio::test]
async fn test_supplier_filter_is_forwarded() {
    let mut other = purchase_order("PO-2", &[("10", dec!(1))]);
    other.supplier_code = "SUP-2".to_string();
    let docs = Arc::new(InMemoryDocuments {
        orders: vec![purchase_order("PO-1", &[("10", dec!(1))]), other],
        ..Default::default()
    });
    let filter = OpenLinesFilter {
        supplier_codes: vec!["SUP-2".to_string()],
        ..Default::default()
    };

    let page = service(&docs).open_lines(&filter).await.unwrap();

    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].po_code, "PO-2");
}
