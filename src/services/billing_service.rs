use crate::entities::OrderStatus;
use crate::error::AppResult;
use crate::models::{Actor, OrderFilter, OrderResponse, TableSettlementResponse};
use crate::services::access_policy;
use crate::services::lifecycle_service::LifecycleService;
use crate::services::order_service::OrderService;
use crate::utils::validate_table_number;
use sea_orm::{
    AccessMode, ConnectionTrait, DatabaseBackend, DatabaseConnection, DatabaseTransaction,
    IsolationLevel, TransactionTrait,
};

#[derive(Clone)]
pub struct BillingService {
    pool: DatabaseConnection,
    orders: OrderService,
    lifecycle: LifecycleService,
}

impl BillingService {
    pub fn new(pool: DatabaseConnection, orders: OrderService, lifecycle: LifecycleService) -> Self {
        Self {
            pool,
            orders,
            lifecycle,
        }
    }

    /// 整桌结账
    ///
    /// 逻辑:
    /// 1. 在只读快照事务中读取该桌全部 Lên Món 订单 (不按角色限定)
    /// 2. 逐单调用状态机结算，每单独立事务；已被并发结算的订单跳过
    /// 3. 总金额只累计本次实际结算的订单，金额取自快照
    pub async fn settle_table(
        &self,
        actor: &Actor,
        table_number: i32,
    ) -> AppResult<TableSettlementResponse> {
        let served = self.served_snapshot(actor, table_number).await?;
        self.settle_snapshot(actor, table_number, served).await
    }

    /// 读取该桌待结账订单的快照
    pub async fn served_snapshot(
        &self,
        actor: &Actor,
        table_number: i32,
    ) -> AppResult<Vec<OrderResponse>> {
        access_policy::ensure_can_settle(actor)?;
        validate_table_number(table_number)?;

        let filter = OrderFilter {
            table_number: Some(table_number),
            statuses: Some(vec![OrderStatus::Served]),
            ..Default::default()
        };
        let txn = self.begin_snapshot().await?;
        let served = self.orders.find_orders(&txn, &filter).await?;
        txn.commit().await?;
        Ok(served)
    }

    /// 按快照逐单结算
    ///
    /// 单个订单失败不中断整桌: 记入 failed_order_ids 后继续，已结算的订单照常返回。
    pub async fn settle_snapshot(
        &self,
        actor: &Actor,
        table_number: i32,
        served: Vec<OrderResponse>,
    ) -> AppResult<TableSettlementResponse> {
        access_policy::ensure_can_settle(actor)?;

        let mut result = TableSettlementResponse::empty(table_number);
        for mut order in served {
            match self.lifecycle.settle_order(order.id).await {
                Ok(true) => {
                    result.grand_total = result
                        .grand_total
                        .checked_add(order.total)
                        .unwrap_or_else(|| {
                            log::error!("Table {} grand total overflows", table_number);
                            i64::MAX
                        });
                    order.status = OrderStatus::Paid;
                    result.orders.push(order);
                }
                Ok(false) => {
                    log::warn!(
                        "Order {} on table {} was settled concurrently, skipped",
                        order.id,
                        table_number
                    );
                    result.skipped_order_ids.push(order.id);
                }
                Err(e) => {
                    log::error!(
                        "Order {} on table {} failed to settle: {}",
                        order.id,
                        table_number,
                        e
                    );
                    result.failed_order_ids.push(order.id);
                }
            }
        }
        result.settled_count = result.orders.len();

        log::info!(
            "Table {} settled by {} ({}): {} orders, total {}, {} skipped, {} failed",
            table_number,
            actor.name,
            actor.staff_id,
            result.settled_count,
            result.grand_total,
            result.skipped_order_ids.len(),
            result.failed_order_ids.len()
        );

        Ok(result)
    }

    async fn begin_snapshot(&self) -> AppResult<DatabaseTransaction> {
        let txn = match self.pool.get_database_backend() {
            DatabaseBackend::Postgres => {
                self.pool
                    .begin_with_config(
                        Some(IsolationLevel::RepeatableRead),
                        Some(AccessMode::ReadOnly),
                    )
                    .await?
            }
            _ => self.pool.begin().await?,
        };
        Ok(txn)
    }
}
