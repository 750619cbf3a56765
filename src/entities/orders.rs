use crate::error::AppError;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

/// 订单状态，按固定顺序单向推进:
/// Chờ Xác Nhận -> Chờ Món -> Lên Món -> Đã Thanh Toán
#[derive(
    Debug,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    ToSchema,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(32))")]
pub enum OrderStatus {
    #[sea_orm(string_value = "Chờ Xác Nhận")]
    #[serde(rename = "Chờ Xác Nhận")]
    Pending,
    #[sea_orm(string_value = "Chờ Món")]
    #[serde(rename = "Chờ Món")]
    AwaitingKitchen,
    #[sea_orm(string_value = "Lên Món")]
    #[serde(rename = "Lên Món")]
    Served,
    #[sea_orm(string_value = "Đã Thanh Toán")]
    #[serde(rename = "Đã Thanh Toán")]
    Paid,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::AwaitingKitchen,
        OrderStatus::Served,
        OrderStatus::Paid,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Chờ Xác Nhận",
            OrderStatus::AwaitingKitchen => "Chờ Món",
            OrderStatus::Served => "Lên Món",
            OrderStatus::Paid => "Đã Thanh Toán",
        }
    }

    /// 排序用的序号 (Pending 最小)
    pub fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::AwaitingKitchen => 1,
            OrderStatus::Served => 2,
            OrderStatus::Paid => 3,
        }
    }

    /// 下一个状态；已付款为终态，返回 None
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::AwaitingKitchen),
            OrderStatus::AwaitingKitchen => Some(OrderStatus::Served),
            OrderStatus::Served => Some(OrderStatus::Paid),
            OrderStatus::Paid => None,
        }
    }

    /// 只有待确认的订单允许修改桌号和明细
    pub fn is_editable(&self) -> bool {
        *self == OrderStatus::Pending
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.label() == s)
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "Invalid status. Allowed values are: {}",
                    OrderStatus::ALL.map(|s| s.label()).join(", ")
                ))
            })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub table_number: i32,
    pub status: OrderStatus,
    pub staff_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::order_lines::Entity")]
    OrderLines,
    #[sea_orm(
        belongs_to = "super::staff::Entity",
        from = "Column::StaffId",
        to = "super::staff::Column::UserId"
    )]
    Staff,
}

impl Related<super::order_lines::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderLines.def()
    }
}

impl Related<super::staff::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Staff.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
