use crate::entities::OrderStatus;
use crate::error::{AppError, AppResult};
use crate::models::{Actor, OrderFilter, OrderListQuery, OrderResponse, StaffRole};
use crate::services::access_policy;
use crate::services::order_service::{OrderService, find_order};
use crate::utils::{ShiftWindow, validate_table_number};
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

/// 按角色限定的订单查询
#[derive(Clone)]
pub struct OrderQueryService {
    pool: DatabaseConnection,
    orders: OrderService,
    shift_window: ShiftWindow,
}

impl OrderQueryService {
    pub fn new(pool: DatabaseConnection, orders: OrderService, shift_window: ShiftWindow) -> Self {
        Self {
            pool,
            orders,
            shift_window,
        }
    }

    pub async fn list_orders(
        &self,
        actor: &Actor,
        query: &OrderListQuery,
    ) -> AppResult<Vec<OrderResponse>> {
        self.list_orders_at(actor, query, Utc::now()).await
    }

    /// 列出订单
    ///
    /// - waiter: 只看自己创建的订单，按创建时间倒序
    /// - bartender: 当天营业窗口内创建的订单，按状态序号升序、创建时间倒序
    /// - 其他角色: 全部订单，按创建时间倒序
    ///
    /// 桌号与状态过滤可选且相互独立；无结果时返回 NotFound
    pub async fn list_orders_at(
        &self,
        actor: &Actor,
        query: &OrderListQuery,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<OrderResponse>> {
        let status_filter = query
            .status
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()?;
        if let Some(table_number) = query.table_number {
            validate_table_number(table_number)?;
        }

        let mut filter = OrderFilter {
            table_number: query.table_number,
            statuses: status_filter.map(|s| vec![s]),
            ..Default::default()
        };

        match actor.role {
            StaffRole::Waiter => {
                filter.staff_id = Some(actor.staff_id.clone());
            }
            StaffRole::Bartender => {
                let (start, end) = self.shift_window.bounds(now);
                filter.created_from = Some(start);
                filter.created_before = Some(end);
                if filter.statuses.is_none() {
                    filter.statuses = Some(OrderStatus::ALL.to_vec());
                }
            }
            StaffRole::Other(_) => {}
        }

        let mut orders = self.orders.find_orders(&self.pool, &filter).await?;

        if actor.role == StaffRole::Bartender {
            orders.sort_by(|a, b| {
                a.status
                    .rank()
                    .cmp(&b.status.rank())
                    .then_with(|| b.created_at.cmp(&a.created_at))
                    .then_with(|| b.id.cmp(&a.id))
            });
        }

        if orders.is_empty() {
            return Err(AppError::NotFound("no orders found".to_string()));
        }

        Ok(orders)
    }

    /// 读取单个订单；waiter 只能读取自己的订单
    pub async fn get_order(&self, actor: &Actor, order_id: i64) -> AppResult<OrderResponse> {
        let order = find_order(&self.pool, order_id).await?;
        access_policy::ensure_can_view(actor, &order)?;
        self.orders.assemble_one(&self.pool, order).await
    }
}
