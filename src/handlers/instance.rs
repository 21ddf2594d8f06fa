//! 实例生命周期处理模块（provision / deprovision / update / last_operation）

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::kaltura::RegistrationRequest;
use crate::state::AppState;
use crate::store::InstanceRecord;

/// 开通后的管理控制台地址，对所有实例相同
const DASHBOARD_URL: &str = "https://kmc.kaltura.com/index.php/kmcng/login";

/// 开通请求参数，三个字段均为必填
#[derive(Debug, Deserialize)]
pub struct ProvisionParameters {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct ProvisionResponse {
    pub dashboard_url: String,
}

/// PUT /v2/service_instances/{instance_id}
///
/// 同步开通，忽略 accepts_incomplete
pub async fn provision(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Json<ProvisionParameters>,
) -> Result<HttpResponse, ApiError> {
    let instance_id = path.into_inner();
    tracing::info!("收到开通请求 instanceId: {instance_id}");

    let params = params.into_inner();
    validate_parameters(&params)?;

    let account = state
        .registrar
        .register(&RegistrationRequest {
            name: params.name,
            company: params.company,
            email: params.email,
            instance_id: instance_id.clone(),
        })
        .await?;
    tracing::info!("Partner 注册成功 partnerId: {}", account.partner_id);

    // 远端注册成功后才写库；写库失败不做远端补偿
    state
        .store
        .create(InstanceRecord {
            id: instance_id,
            partner_id: account.partner_id,
            admin_secret: account.admin_secret,
        })
        .await?;

    Ok(HttpResponse::Created().json(ProvisionResponse {
        dashboard_url: DASHBOARD_URL.to_string(),
    }))
}

fn validate_parameters(params: &ProvisionParameters) -> Result<(), ApiError> {
    let mut missing = Vec::new();
    if params.name.is_empty() {
        missing.push("name");
    }
    if params.company.is_empty() {
        missing.push("company");
    }
    if params.email.is_empty() {
        missing.push("email");
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(missing.join(", ")))
    }
}

/// DELETE /v2/service_instances/{instance_id}
pub async fn deprovision(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let instance_id = path.into_inner();
    tracing::info!("收到注销请求 instanceId: {instance_id}");

    if !state.store.delete(&instance_id).await? {
        return Err(ApiError::InstanceNotFound(instance_id));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({})))
}

/// PATCH /v2/service_instances/{instance_id}
///
/// 更新请求直接接受，不改变任何已存储状态
pub async fn update(path: web::Path<String>) -> HttpResponse {
    tracing::info!("收到更新请求 instanceId: {}", path.into_inner());
    HttpResponse::Ok().json(serde_json::json!({}))
}

/// GET /v2/service_instances/{instance_id}/last_operation
///
/// 不支持异步开通，轮询永远返回空结果
pub async fn last_operation(path: web::Path<String>) -> HttpResponse {
    tracing::debug!("收到 last_operation 轮询 instanceId: {}", path.into_inner());
    HttpResponse::Ok().json(serde_json::json!({}))
}
