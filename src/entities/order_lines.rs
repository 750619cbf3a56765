use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "order_lines")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub order_id: i64,
    pub drink_id: i64,
    pub quantity: i32,
    /// 建单 (或更换饮品) 时的目录单价
    pub unit_price: i64,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::orders::Entity",
        from = "Column::OrderId",
        to = "super::orders::Column::Id",
        on_delete = "Cascade"
    )]
    Orders,
    #[sea_orm(
        belongs_to = "super::drinks::Entity",
        from = "Column::DrinkId",
        to = "super::drinks::Column::Id"
    )]
    Drinks,
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl Related<super::drinks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Drinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
