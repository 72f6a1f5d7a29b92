//! `SeaORM` Entity for goods_receipts table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::GoodsReceiptStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "goods_receipts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub status: GoodsReceiptStatus,
    pub received_on: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::goods_receipt_lines::Entity")]
    GoodsReceiptLines,
}

impl Related<super::goods_receipt_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoodsReceiptLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
