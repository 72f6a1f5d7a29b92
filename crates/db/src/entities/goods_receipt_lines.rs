//! `SeaORM` Entity for goods_receipt_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "goods_receipt_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub goods_receipt_id: Uuid,
    pub item: String,
    pub inbound_code: String,
    pub inbound_item: String,
    pub unit_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::goods_receipts::Entity",
        from = "Column::GoodsReceiptId",
        to = "super::goods_receipts::Column::Id"
    )]
    GoodsReceipts,
    #[sea_orm(has_many = "super::goods_receipt_confirmations::Entity")]
    GoodsReceiptConfirmations,
}

impl Related<super::goods_receipts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoodsReceipts.def()
    }
}

impl Related<super::goods_receipt_confirmations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoodsReceiptConfirmations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
