//! Kaltura VPaaS 服务代理
//!
//! 基于 Actix-web 的 Open Service Broker API 实现:
//! catalog / provision / deprovision / bind / unbind

pub mod auth;
pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod kaltura;
pub mod state;
pub mod store;

use actix_web::web;

use error::ApiError;

/// 配置路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
    );
    cfg.service(
        web::scope("/v2")
            .route("/catalog", web::get().to(handlers::catalog::get_catalog))
            .route(
                "/service_instances/{instance_id}",
                web::put().to(handlers::instance::provision),
            )
            .route(
                "/service_instances/{instance_id}",
                web::patch().to(handlers::instance::update),
            )
            .route(
                "/service_instances/{instance_id}",
                web::delete().to(handlers::instance::deprovision),
            )
            .route(
                "/service_instances/{instance_id}/last_operation",
                web::get().to(handlers::instance::last_operation),
            )
            .route(
                "/service_instances/{instance_id}/service_bindings/{binding_id}",
                web::put().to(handlers::binding::bind),
            )
            .route(
                "/service_instances/{instance_id}/service_bindings/{binding_id}",
                web::delete().to(handlers::binding::unbind),
            ),
    );
}
