//! Goods receipt repository.
//!
//! A receipt line may be confirmed several times; every confirmation quantity
//! is returned with its line and summed by the engine.

use std::collections::HashMap;

use procura_core::fulfillment::{
    FulfillmentError, GoodsReceiptFilter, GoodsReceiptLine, GoodsReceiptQuery,
    GoodsReceiptStatus, Stage,
};
use rust_decimal::Decimal;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use super::stage_error;
use crate::entities::{
    goods_receipt_confirmations, goods_receipt_lines, goods_receipts,
    sea_orm_active_enums::GoodsReceiptStatus as DbGoodsReceiptStatus,
};

/// Reads goods receipt lines with their header and confirmations.
#[derive(Debug, Clone)]
pub struct GoodsReceiptRepository {
    db: DatabaseConnection,
}

impl GoodsReceiptRepository {
    /// Create a new goods receipt repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl GoodsReceiptQuery for GoodsReceiptRepository {
    async fn find_goods_receipt_lines(
        &self,
        filter: &GoodsReceiptFilter,
    ) -> Result<Vec<GoodsReceiptLine>, FulfillmentError> {
        if filter.inbound_codes.is_empty() || filter.inbound_items.is_empty() {
            return Ok(Vec::new());
        }
        let err = |e| stage_error(Stage::GoodsReceipt, &e);

        let rows = goods_receipt_lines::Entity::find()
            .find_also_related(goods_receipts::Entity)
            .filter(goods_receipts::Column::Status.eq(to_db_status(filter.status)))
            .filter(goods_receipt_lines::Column::InboundCode.is_in(filter.inbound_codes.clone()))
            .filter(goods_receipt_lines::Column::InboundItem.is_in(filter.inbound_items.clone()))
            .order_by_asc(goods_receipt_lines::Column::InboundCode)
            .order_by_asc(goods_receipt_lines::Column::InboundItem)
            .all(&self.db)
            .await
            .map_err(err)?;

        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let line_ids: Vec<Uuid> = rows.iter().map(|(line, _)| line.id).collect();
        let confirmations = goods_receipt_confirmations::Entity::find()
            .filter(goods_receipt_confirmations::Column::GoodsReceiptLineId.is_in(line_ids))
            .order_by_asc(goods_receipt_confirmations::Column::ConfirmedAt)
            .all(&self.db)
            .await
            .map_err(err)?;

        let mut confirmed: HashMap<Uuid, Vec<Decimal>> = HashMap::new();
        for c in confirmations {
            confirmed.entry(c.goods_receipt_line_id).or_default().push(c.qty);
        }

        rows.into_iter()
            .map(|(line, header)| {
                let header = header.ok_or_else(|| {
                    FulfillmentError::shape(
                        Stage::GoodsReceipt,
                        format!("goods receipt line {} has no header", line.id),
                    )
                })?;
                Ok(GoodsReceiptLine {
                    receipt_code: header.code,
                    receipt_item: line.item,
                    inbound_code: line.inbound_code,
                    inbound_item: line.inbound_item,
                    confirmed_qty: confirmed.remove(&line.id).unwrap_or_default(),
                    unit_code: line.unit_code,
                })
            })
            .collect()
    }
}

fn to_db_status(status: GoodsReceiptStatus) -> DbGoodsReceiptStatus {
    match status {
        GoodsReceiptStatus::Draft => DbGoodsReceiptStatus::Draft,
        GoodsReceiptStatus::Completed => DbGoodsReceiptStatus::Completed,
        GoodsReceiptStatus::Cancelled => DbGoodsReceiptStatus::Cancelled,
    }
}
