//! `SeaORM` Entity for inbound_lines table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inbound_lines")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub inbound_id: Uuid,
    pub item: String,
    pub po_code: String,
    pub po_item: String,
    #[sea_orm(column_type = "Decimal(Some((19, 4)))")]
    pub qty: Decimal,
    pub unit_code: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::inbounds::Entity",
        from = "Column::InboundId",
        to = "super::inbounds::Column::Id"
    )]
    Inbounds,
}

impl Related<super::inbounds::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inbounds.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
