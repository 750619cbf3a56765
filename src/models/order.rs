use crate::config::PriceSource;
use crate::entities::{OrderStatus, drink_entity, order_entity, order_line_entity};
use crate::error::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineInput {
    #[serde(alias = "id")]
    #[schema(example = 3)]
    pub drink_id: i64,
    #[schema(example = 2)]
    pub quantity: i32,
    #[serde(default)]
    #[schema(example = "ít đá")]
    pub note: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// 桌号标识，如 "table01"
    #[schema(example = "table01")]
    pub table: String,
    #[serde(alias = "lines")]
    pub drinks: Vec<OrderLineInput>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    pub id: i64,
    pub table_number: i32,
    pub status: OrderStatus,
    pub line_count: usize,
}

/// 明细编辑: 带 id 更新已有明细，不带 id 新增，未出现的已有明细删除
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineEdit {
    #[serde(default)]
    pub id: Option<i64>,
    pub drink_id: i64,
    pub quantity: i32,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateOrderRequest {
    #[schema(example = 2)]
    pub table_number: i32,
    #[schema(example = "Chờ Xác Nhận")]
    pub status: String,
    #[serde(default, rename = "order_detail")]
    pub lines: Option<Vec<OrderLineEdit>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct AdvanceStatusRequest {
    /// 客户端预期的下一状态，可省略
    #[serde(default)]
    #[schema(example = "Chờ Món")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderListQuery {
    /// 桌号
    pub table_number: Option<i32>,
    /// 状态标签，如 "Lên Món"
    pub status: Option<String>,
}

/// Order Store 的查询条件
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub staff_id: Option<String>,
    pub table_number: Option<i32>,
    pub statuses: Option<Vec<OrderStatus>>,
    pub created_from: Option<DateTime<Utc>>,
    pub created_before: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DrinkSummary {
    pub id: i64,
    pub name: String,
    pub price: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderLineResponse {
    pub id: i64,
    pub order_id: i64,
    pub drink_id: i64,
    pub drink: DrinkSummary,
    pub quantity: i32,
    pub note: Option<String>,
    /// 计价使用的单价 (目录价或快照价，取决于配置)
    pub unit_price: i64,
    pub line_total: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OrderResponse {
    pub id: i64,
    pub table_number: i32,
    pub status: OrderStatus,
    pub staff_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "order_detail")]
    pub lines: Vec<OrderLineResponse>,
    pub total: i64,
}

impl OrderResponse {
    /// 组装订单详情与金额，金额溢出返回 InternalError
    pub fn assemble(
        order: order_entity::Model,
        lines: Vec<(order_line_entity::Model, drink_entity::Model)>,
        price_source: PriceSource,
    ) -> AppResult<Self> {
        let overflow = || AppError::InternalError(format!("Order {} total overflows", order.id));

        let lines = lines
            .into_iter()
            .map(|(line, drink)| {
                let unit_price = match price_source {
                    PriceSource::Catalog => drink.price,
                    PriceSource::Snapshot => line.unit_price,
                };
                let line_total = unit_price
                    .checked_mul(i64::from(line.quantity))
                    .ok_or_else(overflow)?;
                Ok(OrderLineResponse {
                    id: line.id,
                    order_id: line.order_id,
                    drink_id: line.drink_id,
                    drink: DrinkSummary {
                        id: drink.id,
                        name: drink.name,
                        price: drink.price,
                    },
                    quantity: line.quantity,
                    note: line.note,
                    unit_price,
                    line_total,
                    created_at: line.created_at,
                })
            })
            .collect::<AppResult<Vec<OrderLineResponse>>>()?;
        let total = lines
            .iter()
            .try_fold(0i64, |acc, l| acc.checked_add(l.line_total))
            .ok_or_else(overflow)?;

        Ok(Self {
            id: order.id,
            table_number: order.table_number,
            status: order.status,
            staff_id: order.staff_id,
            created_at: order.created_at,
            lines,
            total,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableSettlementResponse {
    pub table_number: i32,
    /// 本次调用实际结算的订单数
    pub settled_count: usize,
    /// 本次结算订单的总金额 (基于结算前的快照读取)
    pub grand_total: i64,
    pub orders: Vec<OrderResponse>,
    /// 已被其他请求抢先结算而跳过的订单
    pub skipped_order_ids: Vec<i64>,
    /// 写入失败、仍保持 Lên Món 的订单，可重试结账
    pub failed_order_ids: Vec<i64>,
}

impl TableSettlementResponse {
    pub fn empty(table_number: i32) -> Self {
        Self {
            table_number,
            settled_count: 0,
            grand_total: 0,
            orders: Vec::new(),
            skipped_order_ids: Vec::new(),
            failed_order_ids: Vec::new(),
        }
    }
}
