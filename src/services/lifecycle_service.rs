use crate::entities::{OrderStatus, order_entity as orders};
use crate::error::{AppError, AppResult};
use crate::models::{Actor, AdvanceStatusRequest, OrderResponse, UpdateOrderRequest};
use crate::services::access_policy;
use crate::services::order_service::{OrderService, find_order};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter, TransactionTrait,
};

/// 订单状态机: 单向推进 Chờ Xác Nhận -> Chờ Món -> Lên Món -> Đã Thanh Toán
///
/// 每次状态变更为一个事务，写入为比较并设置 (WHERE status = 读取时的状态)，
/// 并发修改导致影响行数为 0 时返回 InvalidState 与最新状态。
#[derive(Clone)]
pub struct LifecycleService {
    pool: DatabaseConnection,
    orders: OrderService,
}

impl LifecycleService {
    pub fn new(pool: DatabaseConnection, orders: OrderService) -> Self {
        Self { pool, orders }
    }

    /// 推进到下一状态
    ///
    /// 调用方给出的状态必须是合法标签，且等于计算出的下一状态，否则视为过期视图。
    pub async fn advance_status(
        &self,
        actor: &Actor,
        order_id: i64,
        request: AdvanceStatusRequest,
    ) -> AppResult<OrderResponse> {
        let expected = request
            .status
            .as_deref()
            .map(str::parse::<OrderStatus>)
            .transpose()?;

        let txn = self.pool.begin().await?;
        let order = find_order(&txn, order_id).await?;
        let current = order.status;

        let next = current
            .next()
            .ok_or_else(|| AppError::invalid_state(current, "order is already paid"))?;
        if let Some(expected) = expected
            && expected != next
        {
            return Err(AppError::invalid_state(
                current,
                format!("cannot move to {expected}: next status is {next}"),
            ));
        }

        access_policy::ensure_can_advance(actor, &order)?;

        if !compare_and_set_status(&txn, order_id, current, next).await? {
            let latest = find_order(&txn, order_id).await?.status;
            return Err(AppError::invalid_state(
                latest,
                "order was modified concurrently",
            ));
        }

        let response = self.orders.assemble_one(&txn, refreshed(order, next)).await?;
        txn.commit().await?;

        log::info!(
            "Order {} advanced {} -> {} by {} ({})",
            order_id,
            current,
            next,
            actor.name,
            actor.staff_id
        );

        Ok(response)
    }

    /// 批量编辑桌号、状态与明细，仅限 Chờ Xác Nhận
    pub async fn update_order(
        &self,
        actor: &Actor,
        order_id: i64,
        request: UpdateOrderRequest,
    ) -> AppResult<OrderResponse> {
        let target: OrderStatus = request.status.parse()?;

        let txn = self.pool.begin().await?;
        let order = find_order(&txn, order_id).await?;

        if !order.status.is_editable() {
            return Err(AppError::invalid_state(
                order.status,
                "cannot edit: order not in Pending",
            ));
        }

        access_policy::ensure_can_edit(actor, &order, target)?;

        self.orders
            .update_order_fields(&txn, &order, request.table_number, target, request.lines)
            .await?;

        let updated = find_order(&txn, order_id).await?;
        let response = self.orders.assemble_one(&txn, updated).await?;
        txn.commit().await?;

        log::info!(
            "Order {} edited by {} ({}), table {}, status {}",
            order_id,
            actor.name,
            actor.staff_id,
            response.table_number,
            response.status
        );

        Ok(response)
    }

    /// 结账: Lên Món -> Đã Thanh Toán
    ///
    /// 返回本次调用是否完成了状态变更；已被其他请求结算时返回 false。
    pub async fn settle_order(&self, order_id: i64) -> AppResult<bool> {
        let txn = self.pool.begin().await?;
        let settled =
            compare_and_set_status(&txn, order_id, OrderStatus::Served, OrderStatus::Paid).await?;
        txn.commit().await?;
        Ok(settled)
    }
}

fn refreshed(mut order: orders::Model, status: OrderStatus) -> orders::Model {
    order.status = status;
    order
}

async fn compare_and_set_status<C: ConnectionTrait>(
    db: &C,
    order_id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> AppResult<bool> {
    let result = orders::Entity::update_many()
        .col_expr(orders::Column::Status, Expr::value(to))
        .filter(orders::Column::Id.eq(order_id))
        .filter(orders::Column::Status.eq(from))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}
