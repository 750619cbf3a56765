pub mod catalog;
pub mod order;
pub mod staff;
pub mod table;

pub use catalog::catalog_config;
pub use order::order_config;
pub use staff::staff_config;
pub use table::table_config;

use crate::error::{AppError, AppResult};
use crate::models::Actor;
use crate::services::StaffService;
use crate::utils::AuthenticatedSubject;
use actix_web::{HttpMessage, HttpRequest};

/// 从请求扩展中获取已认证主体（中间件在鉴权后注入）
fn get_subject_from_request(req: &HttpRequest) -> AppResult<AuthenticatedSubject> {
    req.extensions()
        .get::<AuthenticatedSubject>()
        .cloned()
        .ok_or_else(|| AppError::AuthError("Missing access token".to_string()))
}

/// 解析当前请求对应的员工
async fn current_actor(req: &HttpRequest, staff_service: &StaffService) -> AppResult<Actor> {
    let subject = get_subject_from_request(req)?;
    staff_service.resolve_actor(&subject).await
}
