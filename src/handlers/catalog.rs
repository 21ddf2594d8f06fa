//! Catalog 处理模块
//!
//! 纯静态描述，无副作用

use actix_web::HttpResponse;
use serde::Serialize;

// 平台会缓存 catalog，服务和计划 ID 必须保持稳定
const SERVICE_ID: &str = "8a2aa7b0-babd-4cd6-b29c-d84945a1d1c2";
const PLAN_ID: &str = "7c0fa018-7d33-4b0f-98a7-0d97c29fef43";

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub services: Vec<Service>,
}

#[derive(Debug, Serialize)]
pub struct Service {
    pub id: String,
    pub name: String,
    pub description: String,
    pub bindable: bool,
    pub metadata: ServiceMetadata,
    pub plans: Vec<ServicePlan>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMetadata {
    pub display_name: String,
    pub image_url: String,
    pub long_description: String,
    pub provider_display_name: String,
    pub documentation_url: String,
    pub support_url: String,
}

#[derive(Debug, Serialize)]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// 服务目录描述
pub fn catalog() -> CatalogResponse {
    CatalogResponse {
        services: vec![Service {
            id: SERVICE_ID.to_string(),
            name: "kaltura-vpaas".to_string(),
            description:
                "Use Kaltura to create Video Experiences and Workflows in your application"
                    .to_string(),
            bindable: true,
            metadata: ServiceMetadata {
                display_name: "Video Platform as a Service - Kaltura".to_string(),
                image_url: "https://vpaas.kaltura.com/images/VPaaS-logo-full.png".to_string(),
                long_description: "Kaltura VPaaS (Video Platform as a Service) allows you to \
                    build any video experience or workflow, and to integrate rich video \
                    experiences into existing applications, business workflows and environments. \
                    Kaltura VPaaS eliminates all complexities involved in handling video at \
                    scale: ingestion, transcoding, metadata, playback, distribution, analytics, \
                    accessibility, monetization, security, search, interactivity and more. \
                    Available as an open API, with a set of SDKs, developer tools and dozens of \
                    code recipes, we're making the video experience creation process as easy as \
                    it gets."
                    .to_string(),
                provider_display_name: "Kaltura Inc.".to_string(),
                documentation_url: "https://developer.kaltura.com".to_string(),
                support_url: "https://forum.kaltura.org".to_string(),
            },
            plans: vec![ServicePlan {
                id: PLAN_ID.to_string(),
                name: "default".to_string(),
                description: "Pay As You Go with base REE package. For more details see: \
                    https://vpaas.kaltura.com/pricing"
                    .to_string(),
            }],
        }],
    }
}

/// GET /v2/catalog
pub async fn get_catalog() -> HttpResponse {
    tracing::info!("收到 catalog 请求");
    HttpResponse::Ok().json(catalog())
}
