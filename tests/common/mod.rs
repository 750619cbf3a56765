#![allow(dead_code)]

use chrono::{DateTime, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};
use table_order_backend::config::{BusinessConfig, PriceSource};
use table_order_backend::entities::{
    OrderStatus, drink_category_entity, drink_entity, order_entity, order_line_entity, staff_entity,
};
use table_order_backend::models::{Actor, StaffRole};
use table_order_backend::services::{
    BillingService, CatalogService, LifecycleService, OrderQueryService, OrderService,
    StaffService,
};

pub const COFFEE: i64 = 1; // 10_000
pub const MILK_TEA: i64 = 2; // 20_000
pub const SMOOTHIE: i64 = 3; // 25_000
pub const BEER: i64 = 4; // 30_000

pub const WAITER_1: &str = "waiter-1";
pub const WAITER_2: &str = "waiter-2";
pub const BARTENDER: &str = "bartender-1";
pub const MANAGER: &str = "manager-1";

pub struct Services {
    pub catalog: CatalogService,
    pub staff: StaffService,
    pub orders: OrderService,
    pub lifecycle: LifecycleService,
    pub query: OrderQueryService,
    pub billing: BillingService,
}

impl Services {
    pub fn new(db: &DatabaseConnection, price_source: PriceSource) -> Self {
        let shift_window = BusinessConfig::default().shift_window().unwrap();
        let orders = OrderService::new(db.clone(), price_source);
        let lifecycle = LifecycleService::new(db.clone(), orders.clone());
        Self {
            catalog: CatalogService::new(db.clone()),
            staff: StaffService::new(db.clone()),
            query: OrderQueryService::new(db.clone(), orders.clone(), shift_window),
            billing: BillingService::new(db.clone(), orders.clone(), lifecycle.clone()),
            lifecycle,
            orders,
        }
    }
}

/// 单连接的内存 SQLite，迁移后写入目录与员工数据
pub async fn setup_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    seed(&db).await;
    db
}

async fn seed(db: &DatabaseConnection) {
    let now = Utc::now();
    drink_category_entity::ActiveModel {
        id: Set(1),
        name: Set("Đồ uống".to_string()),
        slug: Set("do-uong".to_string()),
        image_url: Set("https://img.example.com/do-uong.png".to_string()),
        created_at: Set(now),
    }
    .insert(db)
    .await
    .unwrap();

    for (id, name, price) in [
        (COFFEE, "Cà phê sữa", 10_000),
        (MILK_TEA, "Trà sữa", 20_000),
        (SMOOTHIE, "Sinh tố bơ", 25_000),
        (BEER, "Bia", 30_000),
    ] {
        drink_entity::ActiveModel {
            id: Set(id),
            category_id: Set(1),
            name: Set(name.to_string()),
            price: Set(price),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .unwrap();
    }

    for (user_id, role) in [
        (WAITER_1, "waiter"),
        (WAITER_2, "waiter"),
        (BARTENDER, "bartender"),
        (MANAGER, "manager"),
    ] {
        staff_entity::ActiveModel {
            user_id: Set(user_id.to_string()),
            role: Set(role.to_string()),
            staff_name: Set(user_id.to_string()),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .unwrap();
    }
}

pub fn actor(staff_id: &str) -> Actor {
    let role = match staff_id {
        WAITER_1 | WAITER_2 => StaffRole::Waiter,
        BARTENDER => StaffRole::Bartender,
        _ => StaffRole::Other("manager".to_string()),
    };
    Actor {
        staff_id: staff_id.to_string(),
        role,
        name: staff_id.to_string(),
    }
}

/// 直接写入一张指定状态与创建时间的订单，lines 为 (饮品, 数量, 单价)
pub async fn insert_order(
    db: &DatabaseConnection,
    staff_id: &str,
    table_number: i32,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    lines: &[(i64, i32, i64)],
) -> i64 {
    let order = order_entity::ActiveModel {
        table_number: Set(table_number),
        status: Set(status),
        staff_id: Set(staff_id.to_string()),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .unwrap();

    for &(drink_id, quantity, unit_price) in lines {
        order_line_entity::ActiveModel {
            order_id: Set(order.id),
            drink_id: Set(drink_id),
            quantity: Set(quantity),
            unit_price: Set(unit_price),
            note: Set(None),
            created_at: Set(created_at),
            ..Default::default()
        }
        .insert(db)
        .await
        .unwrap();
    }

    order.id
}
