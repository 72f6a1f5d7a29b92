//! Purchase order repository.

use std::collections::HashMap;

use procura_core::fulfillment::{
    ApprovalStatus, FulfillmentError, PaymentStatus, PurchaseOrder, PurchaseOrderFilter,
    PurchaseOrderLine, PurchaseOrderPage, PurchaseOrderQuery, PurchaseOrderStatus, Stage,
};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, QueryTrait,
};
use tracing::debug;
use uuid::Uuid;

use super::stage_error;
use crate::entities::{
    purchase_order_lines, purchase_orders,
    sea_orm_active_enums::{
        ApprovalStatus as DbApprovalStatus, PaymentStatus as DbPaymentStatus,
        PurchaseOrderStatus as DbPurchaseOrderStatus,
    },
};

/// Reads purchase order headers and their lines.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    db: DatabaseConnection,
}

impl PurchaseOrderRepository {
    /// Create a new purchase order repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PurchaseOrderQuery for PurchaseOrderRepository {
    async fn find_purchase_orders(
        &self,
        filter: &PurchaseOrderFilter,
    ) -> Result<PurchaseOrderPage, FulfillmentError> {
        let err = |e| stage_error(Stage::PurchaseOrder, &e);

        let mut query = purchase_orders::Entity::find()
            .filter(purchase_orders::Column::Status.eq(to_db_status(filter.status)))
            .apply_if(filter.approval_status, |q, s| {
                q.filter(purchase_orders::Column::ApprovalStatus.eq(to_db_approval(s)))
            })
            .apply_if(filter.payment_status, |q, s| {
                q.filter(purchase_orders::Column::PaymentStatus.eq(to_db_payment(s)))
            });
        if !filter.po_codes.is_empty() {
            query = query.filter(purchase_orders::Column::Code.is_in(filter.po_codes.clone()));
        }
        if !filter.supplier_codes.is_empty() {
            query = query.filter(
                purchase_orders::Column::SupplierCode.is_in(filter.supplier_codes.clone()),
            );
        }

        let total = query.clone().count(&self.db).await.map_err(err)?;
        let headers = query
            .order_by_asc(purchase_orders::Column::Code)
            .offset(filter.page.offset())
            .limit(filter.page.limit())
            .all(&self.db)
            .await
            .map_err(err)?;

        if headers.is_empty() {
            return Ok(PurchaseOrderPage {
                orders: Vec::new(),
                total,
            });
        }

        let ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
        let lines = purchase_order_lines::Entity::find()
            .filter(purchase_order_lines::Column::PurchaseOrderId.is_in(ids))
            .order_by_asc(purchase_order_lines::Column::Item)
            .all(&self.db)
            .await
            .map_err(err)?;

        let mut lines_by_order: HashMap<Uuid, Vec<PurchaseOrderLine>> = HashMap::new();
        for line in lines {
            lines_by_order
                .entry(line.purchase_order_id)
                .or_default()
                .push(to_domain_line(line));
        }

        debug!(orders = headers.len(), total, "Loaded purchase order page");

        let orders = headers
            .into_iter()
            .map(|header| {
                let lines = lines_by_order.remove(&header.id).unwrap_or_default();
                to_domain(header, lines)
            })
            .collect();

        Ok(PurchaseOrderPage { orders, total })
    }
}

fn to_db_status(status: PurchaseOrderStatus) -> DbPurchaseOrderStatus {
    match status {
        PurchaseOrderStatus::Open => DbPurchaseOrderStatus::Open,
        PurchaseOrderStatus::Closed => DbPurchaseOrderStatus::Closed,
        PurchaseOrderStatus::Cancelled => DbPurchaseOrderStatus::Cancelled,
    }
}

fn from_db_status(status: DbPurchaseOrderStatus) -> PurchaseOrderStatus {
    match status {
        DbPurchaseOrderStatus::Open => PurchaseOrderStatus::Open,
        DbPurchaseOrderStatus::Closed => PurchaseOrderStatus::Closed,
        DbPurchaseOrderStatus::Cancelled => PurchaseOrderStatus::Cancelled,
    }
}

fn to_db_approval(status: ApprovalStatus) -> DbApprovalStatus {
    match status {
        ApprovalStatus::Pending => DbApprovalStatus::Pending,
        ApprovalStatus::Approved => DbApprovalStatus::Approved,
        ApprovalStatus::Rejected => DbApprovalStatus::Rejected,
    }
}

fn from_db_approval(status: DbApprovalStatus) -> ApprovalStatus {
    match status {
        DbApprovalStatus::Pending => ApprovalStatus::Pending,
        DbApprovalStatus::Approved => ApprovalStatus::Approved,
        DbApprovalStatus::Rejected => ApprovalStatus::Rejected,
    }
}

fn to_db_payment(status: PaymentStatus) -> DbPaymentStatus {
    match status {
        PaymentStatus::Unpaid => DbPaymentStatus::Unpaid,
        PaymentStatus::Partial => DbPaymentStatus::Partial,
        PaymentStatus::Paid => DbPaymentStatus::Paid,
    }
}

fn from_db_payment(status: DbPaymentStatus) -> PaymentStatus {
    match status {
        DbPaymentStatus::Unpaid => PaymentStatus::Unpaid,
        DbPaymentStatus::Partial => PaymentStatus::Partial,
        DbPaymentStatus::Paid => PaymentStatus::Paid,
    }
}

/// Convert a header model and its lines to the domain purchase order.
fn to_domain(model: purchase_orders::Model, lines: Vec<PurchaseOrderLine>) -> PurchaseOrder {
    PurchaseOrder {
        code: model.code,
        supplier_code: model.supplier_code,
        supplier_name: model.supplier_name,
        order_date: model.order_date,
        status: from_db_status(model.status),
        approval_status: from_db_approval(model.approval_status),
        payment_status: from_db_payment(model.payment_status),
        currency: model.currency,
        lines,
    }
}

fn to_domain_line(model: purchase_order_lines::Model) -> PurchaseOrderLine {
    PurchaseOrderLine {
        item: model.item,
        product_code: model.product_code,
        product_name: model.product_name,
        qty: model.qty,
        unit_code: model.unit_code,
        unit_price: model.unit_price,
    }
}
