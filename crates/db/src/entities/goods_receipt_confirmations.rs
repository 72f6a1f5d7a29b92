//! `SeaORM` Entity for goods_receipt_confirmations table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "goods_receipt_confirmations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub goods_receipt_line_id: Uuid,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub qty: Decimal,
    pub confirmed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::goods_receipt_lines::Entity",
        from = "Column::GoodsReceiptLineId",
        to = "super::goods_receipt_lines::Column::Id"
    )]
    GoodsReceiptLines,
}

impl Related<super::goods_receipt_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GoodsReceiptLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
