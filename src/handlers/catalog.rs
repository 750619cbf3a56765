use crate::models::*;
use crate::services::CatalogService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/drinks",
    tag = "catalog",
    responses(
        (status = 200, description = "饮品列表", body = [DrinkResponse])
    )
)]
pub async fn list_drinks(service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match service.list_drinks().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/drinks/{id}",
    tag = "catalog",
    params(
        ("id" = i64, Path, description = "饮品ID")
    ),
    responses(
        (status = 200, description = "饮品详情", body = DrinkResponse),
        (status = 404, description = "饮品不存在")
    )
)]
pub async fn get_drink(
    service: web::Data<CatalogService>,
    path: web::Path<i64>,
) -> Result<HttpResponse> {
    match service.get_drink(path.into_inner()).await {
        Ok(drink) => Ok(HttpResponse::Ok().json(ApiResponse::success(drink))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/categories",
    tag = "catalog",
    responses(
        (status = 200, description = "饮品分类", body = [CategoryResponse])
    )
)]
pub async fn list_categories(service: web::Data<CatalogService>) -> Result<HttpResponse> {
    match service.list_categories().await {
        Ok(list) => Ok(HttpResponse::Ok().json(ApiResponse::success(list))),
        Err(e) => Ok(e.error_response()),
    }
}

/// 路由配置 (公开)
pub fn catalog_config(cfg: &mut web::ServiceConfig) {
    cfg.route("/drinks", web::get().to(list_drinks))
        .route("/drinks/{id}", web::get().to(get_drink))
        .route("/categories", web::get().to(list_categories));
}
