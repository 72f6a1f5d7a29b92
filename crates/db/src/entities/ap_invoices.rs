//! `SeaORM` Entity for ap_invoices table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "ap_invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub supplier_code: String,
    pub invoice_date: Date,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::ap_invoice_lines::Entity")]
    ApInvoiceLines,
}

impl Related<super::ap_invoice_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApInvoiceLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
