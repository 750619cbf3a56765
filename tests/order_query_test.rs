mod common;

use chrono::{TimeZone, Utc};
use common::*;
use table_order_backend::AppError;
use table_order_backend::config::PriceSource;
use table_order_backend::entities::OrderStatus;
use table_order_backend::models::OrderListQuery;

fn all() -> OrderListQuery {
    OrderListQuery::default()
}

#[tokio::test]
async fn test_waiters_see_only_their_own_orders() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let now = Utc::now();
    let first = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, now, &[(COFFEE, 1, 10_000)]).await;
    let second = insert_order(&db, WAITER_2, 2, OrderStatus::Served, now, &[(BEER, 2, 30_000)]).await;

    let mine = svc.query.list_orders(&actor(WAITER_1), &all()).await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, first);

    let theirs = svc.query.list_orders(&actor(WAITER_2), &all()).await.unwrap();
    assert_eq!(theirs.len(), 1);
    assert_eq!(theirs[0].id, second);
    assert_eq!(theirs[0].total, 60_000);

    let everything = svc.query.list_orders(&actor(MANAGER), &all()).await.unwrap();
    assert_eq!(everything.len(), 2);
}

#[tokio::test]
async fn test_empty_result_is_not_found() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    insert_order(&db, WAITER_1, 1, OrderStatus::Pending, Utc::now(), &[(COFFEE, 1, 10_000)]).await;

    let err = svc
        .query
        .list_orders(&actor(WAITER_2), &all())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(ref msg) if msg == "no orders found"));
}

#[tokio::test]
async fn test_bartender_sees_shift_window_sorted_by_status() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let line = [(COFFEE, 1, 10_000)];

    // 本地 UTC+7: 窗口 [06:00, 23:30) 即 UTC [前一日 23:00, 当日 16:30)
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 5, 0, 0).unwrap();
    let at = |d, h, m, s| Utc.with_ymd_and_hms(2026, 10, d, h, m, s).unwrap();

    let too_early = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, at(18, 22, 59, 59), &line).await;
    let opening = insert_order(&db, WAITER_1, 1, OrderStatus::Served, at(18, 23, 0, 0), &line).await;
    let pending_old = insert_order(&db, WAITER_1, 2, OrderStatus::Pending, at(19, 1, 0, 0), &line).await;
    let pending_new = insert_order(&db, WAITER_2, 3, OrderStatus::Pending, at(19, 4, 0, 0), &line).await;
    let paid = insert_order(&db, WAITER_2, 3, OrderStatus::Paid, at(19, 3, 0, 0), &line).await;
    let kitchen = insert_order(&db, WAITER_2, 4, OrderStatus::AwaitingKitchen, at(19, 16, 29, 59), &line).await;
    let closed = insert_order(&db, WAITER_1, 4, OrderStatus::Pending, at(19, 16, 30, 0), &line).await;

    let list = svc
        .query
        .list_orders_at(&actor(BARTENDER), &all(), now)
        .await
        .unwrap();
    let ids: Vec<i64> = list.iter().map(|o| o.id).collect();

    assert_eq!(ids, vec![pending_new, pending_old, kitchen, opening, paid]);
    assert!(!ids.contains(&too_early));
    assert!(!ids.contains(&closed));
}

#[tokio::test]
async fn test_table_and_status_filters() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let now = Utc::now();
    let ready = insert_order(&db, WAITER_1, 2, OrderStatus::Served, now, &[(COFFEE, 1, 10_000)]).await;
    insert_order(&db, WAITER_1, 2, OrderStatus::Pending, now, &[(COFFEE, 1, 10_000)]).await;
    insert_order(&db, WAITER_1, 3, OrderStatus::Served, now, &[(COFFEE, 1, 10_000)]).await;

    let query = OrderListQuery {
        table_number: Some(2),
        status: Some("Lên Món".to_string()),
    };
    let list = svc.query.list_orders(&actor(MANAGER), &query).await.unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].id, ready);

    // 两个过滤条件相互独立
    let by_table = OrderListQuery {
        table_number: Some(2),
        status: None,
    };
    assert_eq!(
        svc.query.list_orders(&actor(MANAGER), &by_table).await.unwrap().len(),
        2
    );

    let bad = OrderListQuery {
        table_number: None,
        status: Some("Served".to_string()),
    };
    assert!(matches!(
        svc.query.list_orders(&actor(MANAGER), &bad).await,
        Err(AppError::ValidationError(_))
    ));
}

#[tokio::test]
async fn test_get_order_applies_ownership() {
    let db = setup_db().await;
    let svc = Services::new(&db, PriceSource::Catalog);
    let id = insert_order(&db, WAITER_1, 1, OrderStatus::Pending, Utc::now(), &[(COFFEE, 1, 10_000)]).await;

    assert!(svc.query.get_order(&actor(WAITER_1), id).await.is_ok());
    assert!(svc.query.get_order(&actor(BARTENDER), id).await.is_ok());
    assert!(matches!(
        svc.query.get_order(&actor(WAITER_2), id).await,
        Err(AppError::AuthError(_))
    ));
    assert!(matches!(
        svc.query.get_order(&actor(MANAGER), 999).await,
        Err(AppError::NotFound(_))
    ));
}
