//! `SeaORM` Entity for inbounds table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::sea_orm_active_enums::InboundStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "inbounds")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub code: String,
    pub status: InboundStatus,
    pub shipped_on: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::inbound_lines::Entity")]
    InboundLines,
}

impl Related<super::inbound_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InboundLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
