use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::OrderStatus;
use crate::handlers;
use crate::models::*;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::order::create_order,
        handlers::order::list_orders,
        handlers::order::get_order,
        handlers::order::update_order,
        handlers::order::advance_status,
        handlers::table::settle_table,
        handlers::catalog::list_drinks,
        handlers::catalog::get_drink,
        handlers::catalog::list_categories,
        handlers::staff::get_me,
    ),
    components(
        schemas(
            OrderStatus,
            OrderLineInput,
            CreateOrderRequest,
            CreateOrderResponse,
            OrderLineEdit,
            UpdateOrderRequest,
            AdvanceStatusRequest,
            DrinkSummary,
            OrderLineResponse,
            OrderResponse,
            TableSettlementResponse,
            DrinkResponse,
            CategoryResponse,
            StaffResponse,
            ApiError,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "order", description = "Order lifecycle API"),
        (name = "billing", description = "Table settlement API"),
        (name = "catalog", description = "Drink catalog API"),
        (name = "staff", description = "Staff directory API"),
    ),
    info(
        title = "Table Order API",
        version = "1.0.0",
        description = "Restaurant table order lifecycle REST API documentation"
    ),
    servers(
        (url = "/api/v1", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
