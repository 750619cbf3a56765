use crate::config::PriceSource;
use crate::entities::{
    OrderStatus, drink_entity as drinks, order_entity as orders, order_line_entity as lines,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    CreateOrderRequest, CreateOrderResponse, OrderFilter, OrderLineEdit, OrderLineInput,
    OrderResponse,
};
use crate::services::catalog_service::drinks_by_ids;
use crate::utils::{parse_table_identifier, validate_table_number};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

type LineWithDrink = (lines::Model, drinks::Model);

/// 订单存储: 订单与明细的持久化、读取组装
#[derive(Clone)]
pub struct OrderService {
    pool: DatabaseConnection,
    price_source: PriceSource,
}

impl OrderService {
    pub fn new(pool: DatabaseConnection, price_source: PriceSource) -> Self {
        Self { pool, price_source }
    }

    /// 创建订单
    ///
    /// 逻辑:
    /// 1. 解析桌号，校验明细非空且数量 >= 1
    /// 2. 同一事务内校验饮品存在、写入订单 (状态强制为 Chờ Xác Nhận) 与全部明细
    /// 3. 明细记录下单时的目录单价
    pub async fn create_order(
        &self,
        staff_id: &str,
        request: CreateOrderRequest,
    ) -> AppResult<CreateOrderResponse> {
        let table_number = parse_table_identifier(&request.table)?;
        validate_line_inputs(&request.drinks)?;

        let txn = self.pool.begin().await?;

        let drink_ids: Vec<i64> = request.drinks.iter().map(|l| l.drink_id).collect();
        let catalog = drinks_by_ids(&txn, &drink_ids).await?;

        let now = Utc::now();
        let order = orders::ActiveModel {
            table_number: Set(table_number),
            status: Set(OrderStatus::Pending),
            staff_id: Set(staff_id.to_string()),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let new_lines: Vec<lines::ActiveModel> = request
            .drinks
            .iter()
            .map(|input| lines::ActiveModel {
                order_id: Set(order.id),
                drink_id: Set(input.drink_id),
                quantity: Set(input.quantity),
                unit_price: Set(catalog
                    .get(&input.drink_id)
                    .map(|d| d.price)
                    .unwrap_or_default()),
                note: Set(input.note.clone()),
                created_at: Set(now),
                ..Default::default()
            })
            .collect();
        let line_count = new_lines.len();
        lines::Entity::insert_many(new_lines).exec(&txn).await?;

        txn.commit().await?;

        log::info!(
            "Order {} created for table {} by {} with {} lines",
            order.id,
            table_number,
            staff_id,
            line_count
        );

        Ok(CreateOrderResponse {
            id: order.id,
            table_number,
            status: order.status,
            line_count,
        })
    }

    pub async fn get_order(&self, id: i64) -> AppResult<OrderResponse> {
        let order = find_order(&self.pool, id).await?;
        self.assemble_one(&self.pool, order).await
    }

    pub async fn assemble_one<C: ConnectionTrait>(
        &self,
        db: &C,
        order: orders::Model,
    ) -> AppResult<OrderResponse> {
        let mut by_order = load_lines(db, &[order.id]).await?;
        let order_lines = by_order.remove(&order.id).unwrap_or_default();
        OrderResponse::assemble(order, order_lines, self.price_source)
    }

    /// 按条件查询订单，按创建时间倒序，附带明细与饮品
    pub async fn find_orders<C: ConnectionTrait>(
        &self,
        db: &C,
        filter: &OrderFilter,
    ) -> AppResult<Vec<OrderResponse>> {
        let mut query = orders::Entity::find();

        if let Some(staff_id) = &filter.staff_id {
            query = query.filter(orders::Column::StaffId.eq(staff_id.clone()));
        }
        if let Some(table_number) = filter.table_number {
            query = query.filter(orders::Column::TableNumber.eq(table_number));
        }
        if let Some(statuses) = &filter.statuses {
            query = query.filter(orders::Column::Status.is_in(statuses.iter().copied()));
        }
        if let Some(from) = filter.created_from {
            query = query.filter(orders::Column::CreatedAt.gte(from));
        }
        if let Some(before) = filter.created_before {
            query = query.filter(orders::Column::CreatedAt.lt(before));
        }

        let order_models = query
            .order_by_desc(orders::Column::CreatedAt)
            .order_by_desc(orders::Column::Id)
            .all(db)
            .await?;
        if order_models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = order_models.iter().map(|o| o.id).collect();
        let mut by_order = load_lines(db, &ids).await?;

        order_models
            .into_iter()
            .map(|order| {
                let order_lines = by_order.remove(&order.id).unwrap_or_default();
                OrderResponse::assemble(order, order_lines, self.price_source)
            })
            .collect()
    }

    /// 批量改写桌号、状态与明细
    ///
    /// 只在调用方事务内使用，调用前必须已通过状态与角色校验。
    /// 订单行写入仍以 status = Chờ Xác Nhận 作为条件，并发推进时返回 InvalidState。
    pub async fn update_order_fields<C: ConnectionTrait>(
        &self,
        db: &C,
        order: &orders::Model,
        table_number: i32,
        status: OrderStatus,
        line_edits: Option<Vec<OrderLineEdit>>,
    ) -> AppResult<()> {
        validate_table_number(table_number)?;
        if let Some(edits) = &line_edits {
            validate_line_edits(edits)?;
        }

        let result = orders::Entity::update_many()
            .col_expr(orders::Column::TableNumber, Expr::value(table_number))
            .col_expr(orders::Column::Status, Expr::value(status))
            .filter(orders::Column::Id.eq(order.id))
            .filter(orders::Column::Status.eq(OrderStatus::Pending))
            .exec(db)
            .await?;
        if result.rows_affected != 1 {
            let current = find_order(db, order.id).await?.status;
            return Err(AppError::invalid_state(
                current,
                "cannot edit: order not in Pending",
            ));
        }

        if let Some(edits) = line_edits {
            self.replace_lines(db, order.id, edits).await?;
        }

        Ok(())
    }

    /// 以 edits 作为完整明细集合: 带 id 更新，不带 id 新增，其余删除
    async fn replace_lines<C: ConnectionTrait>(
        &self,
        db: &C,
        order_id: i64,
        edits: Vec<OrderLineEdit>,
    ) -> AppResult<()> {
        let drink_ids: Vec<i64> = edits.iter().map(|e| e.drink_id).collect();
        let catalog = drinks_by_ids(db, &drink_ids).await?;

        let mut existing: HashMap<i64, lines::Model> = lines::Entity::find()
            .filter(lines::Column::OrderId.eq(order_id))
            .all(db)
            .await?
            .into_iter()
            .map(|l| (l.id, l))
            .collect();

        let mut seen = HashSet::new();
        for edit in &edits {
            if let Some(id) = edit.id
                && (!existing.contains_key(&id) || !seen.insert(id))
            {
                return Err(AppError::ValidationError(format!(
                    "Order line {id} does not belong to order {order_id}"
                )));
            }
        }

        let now = Utc::now();
        for edit in edits {
            let price = catalog
                .get(&edit.drink_id)
                .map(|d| d.price)
                .unwrap_or_default();
            match edit.id.and_then(|id| existing.remove(&id)) {
                Some(line) => {
                    let drink_changed = line.drink_id != edit.drink_id;
                    let mut am = line.into_active_model();
                    if drink_changed {
                        am.unit_price = Set(price);
                    }
                    am.drink_id = Set(edit.drink_id);
                    am.quantity = Set(edit.quantity);
                    am.note = Set(edit.note);
                    am.update(db).await?;
                }
                None => {
                    lines::ActiveModel {
                        order_id: Set(order_id),
                        drink_id: Set(edit.drink_id),
                        quantity: Set(edit.quantity),
                        unit_price: Set(price),
                        note: Set(edit.note),
                        created_at: Set(now),
                        ..Default::default()
                    }
                    .insert(db)
                    .await?;
                }
            }
        }

        // 未出现在编辑列表中的旧明细
        if !existing.is_empty() {
            let removed: Vec<i64> = existing.into_keys().collect();
            lines::Entity::delete_many()
                .filter(lines::Column::Id.is_in(removed))
                .exec(db)
                .await?;
        }

        Ok(())
    }
}

pub async fn find_order<C: ConnectionTrait>(db: &C, id: i64) -> AppResult<orders::Model> {
    orders::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Order {id} not found")))
}

/// 读取多个订单的明细 (含饮品)，按订单分组
async fn load_lines<C: ConnectionTrait>(
    db: &C,
    order_ids: &[i64],
) -> AppResult<HashMap<i64, Vec<LineWithDrink>>> {
    let rows = lines::Entity::find()
        .filter(lines::Column::OrderId.is_in(order_ids.to_vec()))
        .find_also_related(drinks::Entity)
        .order_by_asc(lines::Column::Id)
        .all(db)
        .await?;

    let mut grouped: HashMap<i64, Vec<LineWithDrink>> = HashMap::new();
    for (line, drink) in rows {
        let drink = drink.ok_or_else(|| {
            AppError::InternalError(format!(
                "Drink {} missing for order line {}",
                line.drink_id, line.id
            ))
        })?;
        grouped.entry(line.order_id).or_default().push((line, drink));
    }
    Ok(grouped)
}

/// 单行数量上限
pub const MAX_LINE_QUANTITY: i32 = 999;

fn validate_quantity(quantity: i32) -> AppResult<()> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(AppError::ValidationError(format!(
            "Quantity must be between 1 and {MAX_LINE_QUANTITY}"
        )));
    }
    Ok(())
}

fn validate_line_inputs(inputs: &[OrderLineInput]) -> AppResult<()> {
    if inputs.is_empty() {
        return Err(AppError::ValidationError(
            "Order must contain at least one drink".to_string(),
        ));
    }
    inputs.iter().try_for_each(|l| validate_quantity(l.quantity))
}

fn validate_line_edits(edits: &[OrderLineEdit]) -> AppResult<()> {
    if edits.is_empty() {
        return Err(AppError::ValidationError(
            "Order must keep at least one drink".to_string(),
        ));
    }
    edits.iter().try_for_each(|l| validate_quantity(l.quantity))
}
