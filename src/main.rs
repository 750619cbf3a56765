use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use table_order_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::IdentityVerifier,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration file");
    let shift_window = config
        .business
        .shift_window()
        .expect("Invalid business shift window");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    let verifier = IdentityVerifier::new(&config.auth);

    // 创建服务
    let catalog_service = CatalogService::new(pool.clone());
    let staff_service = StaffService::new(pool.clone());
    let order_service = OrderService::new(pool.clone(), config.business.price_source);
    let lifecycle_service = LifecycleService::new(pool.clone(), order_service.clone());
    let query_service =
        OrderQueryService::new(pool.clone(), order_service.clone(), shift_window);
    let billing_service = BillingService::new(
        pool.clone(),
        order_service.clone(),
        lifecycle_service.clone(),
    );

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{} (price source: {:?})",
        config.server.host,
        config.server.port,
        config.business.price_source
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(verifier.clone()))
            .app_data(web::Data::new(catalog_service.clone()))
            .app_data(web::Data::new(staff_service.clone()))
            .app_data(web::Data::new(order_service.clone()))
            .app_data(web::Data::new(lifecycle_service.clone()))
            .app_data(web::Data::new(query_service.clone()))
            .app_data(web::Data::new(billing_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::order_config)
                    .configure(handlers::table_config)
                    .configure(handlers::catalog_config)
                    .configure(handlers::staff_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
