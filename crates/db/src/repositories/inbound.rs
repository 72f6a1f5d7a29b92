//! Inbound shipment repository.

use procura_core::fulfillment::{
    FulfillmentError, InboundFilter, InboundLine, InboundQuery, InboundStatus, Stage,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::stage_error;
use crate::entities::{
    inbound_lines, inbounds, sea_orm_active_enums::InboundStatus as DbInboundStatus,
};

/// Reads inbound lines together with their inbound header.
#[derive(Debug, Clone)]
pub struct InboundRepository {
    db: DatabaseConnection,
}

impl InboundRepository {
    /// Create a new inbound repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl InboundQuery for InboundRepository {
    async fn find_inbound_lines(
        &self,
        filter: &InboundFilter,
    ) -> Result<Vec<InboundLine>, FulfillmentError> {
        if filter.po_codes.is_empty() || filter.po_items.is_empty() {
            return Ok(Vec::new());
        }

        let rows = inbound_lines::Entity::find()
            .find_also_related(inbounds::Entity)
            .filter(inbounds::Column::Status.eq(to_db_status(filter.status)))
            .filter(inbound_lines::Column::PoCode.is_in(filter.po_codes.clone()))
            .filter(inbound_lines::Column::PoItem.is_in(filter.po_items.clone()))
            .order_by_asc(inbound_lines::Column::PoCode)
            .order_by_asc(inbound_lines::Column::PoItem)
            .all(&self.db)
            .await
            .map_err(|e| stage_error(Stage::Inbound, &e))?;

        rows.into_iter()
            .map(|(line, header)| {
                let header = header.ok_or_else(|| {
                    FulfillmentError::shape(
                        Stage::Inbound,
                        format!("inbound line {} has no header", line.id),
                    )
                })?;
                Ok(InboundLine {
                    inbound_code: header.code,
                    inbound_item: line.item,
                    po_code: line.po_code,
                    po_item: line.po_item,
                    qty: line.qty,
                    unit_code: line.unit_code,
                })
            })
            .collect()
    }
}

fn to_db_status(status: InboundStatus) -> DbInboundStatus {
    match status {
        InboundStatus::Pending => DbInboundStatus::Pending,
        InboundStatus::Completed => DbInboundStatus::Completed,
        InboundStatus::Cancelled => DbInboundStatus::Cancelled,
    }
}
