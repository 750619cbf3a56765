use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 饮品目录 (只读参考数据)
/// - price: 整数货币单位 (VND)，非负
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "drinks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub price: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::drink_categories::Entity",
        from = "Column::CategoryId",
        to = "super::drink_categories::Column::Id"
    )]
    DrinkCategories,
    #[sea_orm(has_many = "super::order_lines::Entity")]
    OrderLines,
}

impl Related<super::drink_categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DrinkCategories.def()
    }
}

impl Related<super::order_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
