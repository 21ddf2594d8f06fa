//! Kaltura VPaaS 服务代理后端
//!
//! 基于 Actix-web 的 Open Service Broker API 服务

use actix_web::{App, HttpServer, middleware, web};
use migration::MigratorTrait;
use sea_orm::{Database, DbErr};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kaltura_vpaas_broker::auth::BasicAuth;
use kaltura_vpaas_broker::config::{AppConfig, DatabaseConfig};
use kaltura_vpaas_broker::configure_routes;
use kaltura_vpaas_broker::state::AppState;

/// 初始化数据库连接
async fn init_database(config: &DatabaseConfig) -> Result<sea_orm::DatabaseConnection, DbErr> {
    let mut opt = sea_orm::ConnectOptions::new(&config.url);
    opt.max_connections(config.max_connections);

    Database::connect(opt).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,kaltura_vpaas_broker=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Kaltura VPaaS 服务代理启动中...");

    // 加载配置
    let config = AppConfig::from_env()?;
    tracing::info!("配置加载完成");

    // 初始化数据库
    let db = init_database(&config.database).await?;
    tracing::info!("数据库连接成功");

    // 运行数据库迁移
    migration::Migrator::up(&db, None).await?;
    tracing::info!("数据库迁移完成");

    // 创建应用状态
    let state = AppState::new(db);
    let auth = config.auth.clone();

    // 启动服务器
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let workers = if config.server.workers == 0 {
        num_cpus::get()
    } else {
        config.server.workers
    };

    tracing::info!("服务器启动于 http://{bind_addr} (workers: {workers})");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(BasicAuth::new(auth.clone()))
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
