//! `SeaORM` Entity for ap_invoice_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ap_invoice_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub ap_invoice_id: Uuid,
    pub item: String,
    pub po_code: String,
    pub po_item: String,
    pub receipt_code: Option<String>,
    pub receipt_item: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub qty: Decimal,
    pub unit_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::ap_invoices::Entity",
        from = "Column::ApInvoiceId",
        to = "super::ap_invoices::Column::Id"
    )]
    ApInvoices,
}

impl Related<super::ap_invoices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApInvoices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
