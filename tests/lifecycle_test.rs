mod common;

use chrono::Utc;
use common::*;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use table_order_backend::AppError;
use table_order_backend::config::PriceSource;
use table_order_backend::entities::{OrderStatus, order_entity, order_line_entity};
use table_order_backend::models::{AdvanceStatusRequest, OrderLineEdit, UpdateOrderRequest};

fn advance(status: Option<&str>) -> AdvanceStatusRequest {
    AdvanceStatusRequest {
        status: status.map(str::to_string),
    }
}

async fn status_of(db: &DatabaseConnection, id: i64) -> OrderStatus {
    order_entity::Entity::find_by_id(id)
        .one(db)
        .await
        .unwrap()
        .unwrap()
        .status
}

#[tokio::test]
async fn test_advance_walks_the_fixed_sequence() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let id = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, Utc::now(), &[(COFFEE, 1, 10_000)]).await;
    let manager = actor(MANAGER);

    for expected in [
        OrderStatus::AwaitingKitchen,
        OrderStatus::Served,
        OrderStatus::Paid,
    ] {
        let order = svc
            .lifecycle
            .advance_status(&manager, id, advance(None))
            .await
            .unwrap();
        assert_eq!(order.status, expected);
        assert_eq!(status_of(&db, id).await, expected);
    }

    let err = svc
        .lifecycle
        .advance_status(&manager, id, advance(None))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidState {
            current: OrderStatus::Paid,
            ..
        }
    ));
    assert_eq!(status_of(&db, id).await, OrderStatus::Paid);
}

#[tokio::test]
async fn test_advance_checks_caller_status() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let id = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, Utc::now(), &[(COFFEE, 1, 10_000)]).await;
    let waiter = actor(WAITER_1);

    let err = svc
        .lifecycle
        .advance_status(&waiter, id, advance(Some("Chờ Lên Món")))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // 过期视图: 客户端以为订单已经是 Chờ Món
    let err = svc
        .lifecycle
        .advance_status(&waiter, id, advance(Some("Lên Món")))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidState {
            current: OrderStatus::Pending,
            ..
        }
    ));
    assert_eq!(status_of(&db, id).await, OrderStatus::Pending);

    let order = svc
        .lifecycle
        .advance_status(&waiter, id, advance(Some("Chờ Món")))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::AwaitingKitchen);
}

#[tokio::test]
async fn test_advance_role_gating() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let now = Utc::now();
    let pending = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, now, &[(COFFEE, 1, 10_000)]).await;
    let served = insert_order(&db, WAITER_1, 1, OrderStatus::Served, now, &[(COFFEE, 1, 10_000)]).await;
    let paid = insert_order(&db, WAITER_1, 1, OrderStatus::Paid, now, &[(COFFEE, 1, 10_000)]).await;

    // 其他服务员的订单
    let err = svc
        .lifecycle
        .advance_status(&actor(WAITER_2), pending, advance(None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    // 吧台只能推进厨房侧状态
    let bartender = actor(BARTENDER);
    let err = svc
        .lifecycle
        .advance_status(&bartender, served, advance(None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));
    assert_eq!(status_of(&db, served).await, OrderStatus::Served);

    // 状态检查先于角色检查
    let err = svc
        .lifecycle
        .advance_status(&actor(WAITER_2), paid, advance(None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidState { .. }));

    let order = svc
        .lifecycle
        .advance_status(&bartender, pending, advance(None))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::AwaitingKitchen);
}

#[tokio::test]
async fn test_bulk_edit_replaces_fields_and_lines() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Snapshot);
    let id = insert_order(
        &db,
        WAITER_1,
        1,
        OrderStatus::Pending,
        Utc::now(),
        &[(COFFEE, 1, 10_000), (MILK_TEA, 1, 20_000)],
    )
    .await;
    let existing = order_line_entity::Entity::find()
        .filter(order_line_entity::Column::OrderId.eq(id))
        .all(&db)
        .await
        .unwrap();
    let coffee_line = existing.iter().find(|l| l.drink_id == COFFEE).unwrap().id;

    let order = svc
        .lifecycle
        .update_order(
            &actor(WAITER_1),
            id,
            UpdateOrderRequest {
                table_number: 5,
                status: "Chờ Xác Nhận".to_string(),
                lines: Some(vec![
                    OrderLineEdit {
                        id: Some(coffee_line),
                        drink_id: COFFEE,
                        quantity: 3,
                        note: Some("nóng".to_string()),
                    },
                    OrderLineEdit {
                        id: None,
                        drink_id: BEER,
                        quantity: 1,
                        note: None,
                    },
                ]),
            },
        )
        .await
        .unwrap();

    assert_eq!(order.table_number, 5);
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.lines.len(), 2);
    assert!(order.lines.iter().all(|l| l.drink_id != MILK_TEA));
    let coffee = order.lines.iter().find(|l| l.id == coffee_line).unwrap();
    assert_eq!(coffee.quantity, 3);
    assert_eq!(coffee.note.as_deref(), Some("nóng"));
    assert_eq!(order.total, 3 * 10_000 + 30_000);
}

#[tokio::test]
async fn test_bulk_edit_outside_pending_is_rejected() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let id = insert_order(&db, WAITER_1, 1, OrderStatus::AwaitingKitchen, Utc::now(), &[(COFFEE, 1, 10_000)]).await;
    let line = order_line_entity::Entity::find()
        .filter(order_line_entity::Column::OrderId.eq(id))
        .one(&db)
        .await
        .unwrap()
        .unwrap();

    let err = svc
        .lifecycle
        .update_order(
            &actor(MANAGER),
            id,
            UpdateOrderRequest {
                table_number: 9,
                status: "Chờ Món".to_string(),
                lines: Some(vec![
                    OrderLineEdit {
                        id: Some(line.id),
                        drink_id: SMOOTHIE,
                        quantity: 4,
                        note: Some("không đường".to_string()),
                    },
                    OrderLineEdit {
                        id: None,
                        drink_id: BEER,
                        quantity: 2,
                        note: None,
                    },
                ]),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::InvalidState {
            current: OrderStatus::AwaitingKitchen,
            ..
        }
    ));

    let order = order_entity::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(order.table_number, 1);
    assert_eq!(order.status, OrderStatus::AwaitingKitchen);

    // 明细保持不变
    let lines_after = order_line_entity::Entity::find()
        .filter(order_line_entity::Column::OrderId.eq(id))
        .all(&db)
        .await
        .unwrap();
    assert_eq!(lines_after, vec![line]);
}

#[tokio::test]
async fn test_bulk_edit_validation_and_roles() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let id = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, Utc::now(), &[(COFFEE, 1, 10_000)]).await;
    let other = insert_order(&db, WAITER_2, 2, OrderStatus::Pending, Utc::now(), &[(BEER, 1, 30_000)]).await;
    let other_line = order_line_entity::Entity::find()
        .filter(order_line_entity::Column::OrderId.eq(other))
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let edit = |status: &str, lines| UpdateOrderRequest {
        table_number: 4,
        status: status.to_string(),
        lines,
    };

    let err = svc
        .lifecycle
        .update_order(&actor(WAITER_1), id, edit("Done", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    let err = svc
        .lifecycle
        .update_order(&actor(WAITER_1), id, edit("Chờ Món", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    let err = svc
        .lifecycle
        .update_order(&actor(WAITER_2), id, edit("Chờ Xác Nhận", None))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::AuthError(_)));

    let err = svc
        .lifecycle
        .update_order(&actor(WAITER_1), id, edit("Chờ Xác Nhận", Some(vec![])))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));

    // 其他订单的明细不能被挪用，且整个编辑回滚
    let foreign = OrderLineEdit {
        id: Some(other_line.id),
        drink_id: COFFEE,
        quantity: 1,
        note: None,
    };
    let err = svc
        .lifecycle
        .update_order(&actor(MANAGER), id, edit("Chờ Xác Nhận", Some(vec![foreign])))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::ValidationError(_)));
    let order = order_entity::Entity::find_by_id(id).one(&db).await.unwrap().unwrap();
    assert_eq!(order.table_number, 1);

    // 吧台可编辑待确认订单并修改状态
    let order = svc
        .lifecycle
        .update_order(&actor(BARTENDER), id, edit("Chờ Món", None))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::AwaitingKitchen);
    assert_eq!(order.table_number, 4);
}

#[tokio::test]
async fn test_settle_order_is_compare_and_set() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let served = insert_order(&db, WAITER_1, 1, OrderStatus::Served, Utc::now(), &[(COFFEE, 1, 10_000)]).await;
    let pending = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, Utc::now(), &[(COFFEE, 1, 10_000)]).await;

    assert!(svc.lifecycle.settle_order(served).await.unwrap());
    assert!(!svc.lifecycle.settle_order(served).await.unwrap());
    assert!(!svc.lifecycle.settle_order(pending).await.unwrap());
    assert_eq!(status_of(&db, served).await, OrderStatus::Paid);
    assert_eq!(status_of(&db, pending).await, OrderStatus::Pending);
}
