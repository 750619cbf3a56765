use super::get_subject_from_request;
use crate::models::*;
use crate::services::StaffService;
use actix_web::{HttpRequest, HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/staff/me",
    tag = "staff",
    security(
        ("bearer_auth" = [])
    ),
    responses(
        (status = 200, description = "当前员工信息", body = StaffResponse),
        (status = 401, description = "未授权"),
        (status = 404, description = "员工记录不存在")
    )
)]
pub async fn get_me(
    staff_service: web::Data<StaffService>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let subject = match get_subject_from_request(&req) {
        Ok(subject) => subject,
        Err(e) => return Ok(e.error_response()),
    };

    match staff_service.get_profile(&subject).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn staff_config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/staff").route("/me", web::get().to(get_me)));
}
