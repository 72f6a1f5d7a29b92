//! AP invoice repository.

use procura_core::fulfillment::{
    ApInvoiceFilter, ApInvoiceLine, ApInvoiceQuery, FulfillmentError, Stage,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

use super::stage_error;
use crate::entities::{ap_invoice_lines, ap_invoices};

/// Reads AP invoice lines with their invoice header.
#[derive(Debug, Clone)]
pub struct ApInvoiceRepository {
    db: DatabaseConnection,
}

impl ApInvoiceRepository {
    /// Create a new AP invoice repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ApInvoiceQuery for ApInvoiceRepository {
    async fn find_ap_invoice_lines(
        &self,
        filter: &ApInvoiceFilter,
    ) -> Result<Vec<ApInvoiceLine>, FulfillmentError> {
        if filter.po_codes.is_empty() {
            return Ok(Vec::new());
        }

        let rows = ap_invoice_lines::Entity::find()
            .find_also_related(ap_invoices::Entity)
            .filter(ap_invoice_lines::Column::PoCode.is_in(filter.po_codes.clone()))
            .order_by_asc(ap_invoice_lines::Column::PoCode)
            .order_by_asc(ap_invoice_lines::Column::PoItem)
            .all(&self.db)
            .await
            .map_err(|e| stage_error(Stage::ApInvoice, &e))?;

        rows.into_iter()
            .map(|(line, header)| {
                let header = header.ok_or_else(|| {
                    FulfillmentError::shape(
                        Stage::ApInvoice,
                        format!("AP invoice line {} has no header", line.id),
                    )
                })?;
                Ok(ApInvoiceLine {
                    invoice_code: header.code,
                    invoice_item: line.item,
                    po_code: line.po_code,
                    po_item: line.po_item,
                    receipt_code: line.receipt_code,
                    receipt_item: line.receipt_item,
                    qty: line.qty,
                    unit_code: line.unit_code,
                })
            })
            .collect()
    }
}
