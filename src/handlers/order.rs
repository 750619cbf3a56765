use super::current_actor;
use crate::models::*;
use crate::services::{LifecycleService, OrderQueryService, OrderService, StaffService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/orders",
    tag = "order",
    request_body = CreateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "下单成功，状态为 Chờ Xác Nhận", body = CreateOrderResponse),
        (status = 400, description = "桌号非法、明细为空、数量小于1或饮品不存在"),
        (status = 401, description = "未授权"),
        (status = 404, description = "员工记录不存在")
    )
)]
pub async fn create_order(
    staff_service: web::Data<StaffService>,
    order_service: web::Data<OrderService>,
    req: HttpRequest,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse> {
    let actor = match current_actor(&req, &staff_service).await {
        Ok(actor) => actor,
        Err(e) => return Ok(e.error_response()),
    };

    match order_service
        .create_order(&actor.staff_id, body.into_inner())
        .await
    {
        Ok(created) => Ok(HttpResponse::Ok().json(ApiResponse::success(created))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders",
    tag = "order",
    params(OrderListQuery),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "按角色范围列出订单", body = [OrderResponse]),
        (status = 400, description = "状态标签非法"),
        (status = 401, description = "未授权"),
        (status = 404, description = "员工记录不存在或没有订单")
    )
)]
/// waiter 只能看到自己的订单；bartender 看到当天营业窗口内的订单，按状态排序
pub async fn list_orders(
    staff_service: web::Data<StaffService>,
    query_service: web::Data<OrderQueryService>,
    req: HttpRequest,
    query: web::Query<OrderListQuery>,
) -> Result<HttpResponse> {
    let actor = match current_actor(&req, &staff_service).await {
        Ok(actor) => actor,
        Err(e) => return Ok(e.error_response()),
    };

    match query_service.list_orders(&actor, &query).await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/orders/{id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "获取订单成功", body = OrderResponse),
        (status = 401, description = "未授权或无权查看"),
        (status = 404, description = "订单不存在")
    )
)]
pub async fn get_order(
    staff_service: web::Data<StaffService>,
    query_service: web::Data<OrderQueryService>,
    req: HttpRequest,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    let actor = match current_actor(&req, &staff_service).await {
        Ok(actor) => actor,
        Err(e) => return Ok(e.error_response()),
    };

    match query_service.get_order(&actor, path.into_inner()).await {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    request_body = UpdateOrderRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "修改成功", body = OrderResponse),
        (status = 400, description = "参数非法"),
        (status = 401, description = "未授权或角色不允许"),
        (status = 404, description = "订单不存在"),
        (status = 409, description = "订单不在 Chờ Xác Nhận 状态")
    )
)]
/// 修改桌号、状态与明细 (仅 Chờ Xác Nhận)
pub async fn update_order(
    staff_service: web::Data<StaffService>,
    lifecycle_service: web::Data<LifecycleService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: web::Json<UpdateOrderRequest>,
) -> Result<HttpResponse> {
    let actor = match current_actor(&req, &staff_service).await {
        Ok(actor) => actor,
        Err(e) => return Ok(e.error_response()),
    };

    match lifecycle_service
        .update_order(&actor, path.into_inner(), body.into_inner())
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    put,
    path = "/orders/{id}/status",
    tag = "order",
    params(
        ("id" = i64, Path, description = "订单ID")
    ),
    request_body = AdvanceStatusRequest,
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "已推进到下一状态", body = OrderResponse),
        (status = 400, description = "状态标签非法"),
        (status = 401, description = "未授权或角色不允许"),
        (status = 404, description = "订单不存在"),
        (status = 409, description = "状态已过期或订单已付款，返回当前状态")
    )
)]
pub async fn advance_status(
    staff_service: web::Data<StaffService>,
    lifecycle_service: web::Data<LifecycleService>,
    req: HttpRequest,
    path: web::Path<i64>,
    body: Option<web::Json<AdvanceStatusRequest>>,
) -> Result<HttpResponse> {
    let actor = match current_actor(&req, &staff_service).await {
        Ok(actor) => actor,
        Err(e) => return Ok(e.error_response()),
    };
    let request = body.map(web::Json::into_inner).unwrap_or_default();

    match lifecycle_service
        .advance_status(&actor, path.into_inner(), request)
        .await
    {
        Ok(order) => Ok(HttpResponse::Ok().json(ApiResponse::success(order))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn order_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(create_order))
            .route("", web::get().to(list_orders))
            .route("/{id}", web::get().to(get_order))
            .route("/{id}", web::put().to(update_order))
            .route("/{id}/status", web::put().to(advance_status)),
    );
}
