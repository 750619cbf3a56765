use super::current_actor;
use crate::models::*;
use crate::services::{BillingService, StaffService};
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/tables/{table_number}/settle",
    tag = "billing",
    params(
        ("table_number" = i32, Path, description = "桌号")
    ),
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "结账完成；无待结账订单时返回 0", body = TableSettlementResponse),
        (status = 400, description = "桌号非法"),
        (status = 401, description = "未授权或角色不允许")
    )
)]
/// 将该桌全部 Lên Món 订单结算为 Đã Thanh Toán，返回明细与总金额
pub async fn settle_table(
    staff_service: web::Data<StaffService>,
    billing_service: web::Data<BillingService>,
    req: HttpRequest,
    path: web::Path<i32>,
) -> Result<HttpResponse> {
    let actor = match current_actor(&req, &staff_service).await {
        Ok(actor) => actor,
        Err(e) => return Ok(e.error_response()),
    };

    match billing_service
        .settle_table(&actor, path.into_inner())
        .await
    {
        Ok(summary) => Ok(HttpResponse::Ok().json(ApiResponse::success(summary))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn table_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/tables").route("/{table_number}/settle", web::post().to(settle_table)));
}
