//! 绑定处理模块（bind / unbind）
//!
//! 没有独立的绑定表，同一实例的所有绑定返回相同凭证，
//! 绑定无法单独吊销

use actix_web::{HttpResponse, web};
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct BindResponse {
    pub credentials: BindingCredentials,
}

/// 绑定凭证，字段与注册响应一一对应
#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BindingCredentials {
    pub admin_secret: String,
    pub partner_id: i32,
}

/// PUT /v2/service_instances/{instance_id}/service_bindings/{binding_id}
pub async fn bind(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse, ApiError> {
    let (instance_id, binding_id) = path.into_inner();
    tracing::info!("收到绑定请求 bindingId: {binding_id} instanceId: {instance_id}");

    let record = state
        .store
        .find(&instance_id)
        .await?
        .ok_or(ApiError::InstanceNotFound(instance_id))?;

    Ok(HttpResponse::Created().json(BindResponse {
        credentials: BindingCredentials {
            admin_secret: record.admin_secret,
            partner_id: record.partner_id,
        },
    }))
}

/// DELETE /v2/service_instances/{instance_id}/service_bindings/{binding_id}
///
/// 无操作，永远成功
pub async fn unbind(path: web::Path<(String, String)>) -> HttpResponse {
    let (instance_id, binding_id) = path.into_inner();
    tracing::info!("收到解绑请求 bindingId: {binding_id} instanceId: {instance_id}");
    HttpResponse::Ok().json(serde_json::json!({}))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use async_trait::async_trait;

    use super::*;
    use crate::configure_routes;
    use crate::kaltura::{PartnerAccount, PartnerRegistrar, RegistrationRequest};
    use crate::store::memory::MemoryInstanceStore;
    use crate::store::{InstanceRecord, InstanceStore};

    /// 绑定路径不应触发远端注册
    struct UnreachableRegistrar;

    #[async_trait]
    impl PartnerRegistrar for UnreachableRegistrar {
        async fn register(
            &self,
            _request: &RegistrationRequest,
        ) -> Result<PartnerAccount, ApiError> {
            Err(ApiError::Registration("不应触发远端注册".to_string()))
        }
    }

    async fn state_with_record(id: &str) -> (AppState, Arc<MemoryInstanceStore>) {
        let store = Arc::new(MemoryInstanceStore::default());
        store
            .create(InstanceRecord {
                id: id.to_string(),
                partner_id: 42,
                admin_secret: "s3cr3t".to_string(),
            })
            .await
            .unwrap();
        (
            AppState::with_components(store.clone(), Arc::new(UnreachableRegistrar)),
            store,
        )
    }

    #[actix_web::test]
    async fn test_bind_returns_same_credentials_for_any_binding_id() {
        let (state, _store) = state_with_record("instance-1").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        for binding_id in ["binding-a", "binding-b"] {
            let req = test::TestRequest::put()
                .uri(&format!(
                    "/v2/service_instances/instance-1/service_bindings/{binding_id}"
                ))
                .to_request();
            let resp = test::call_service(&app, req).await;

            assert_eq!(resp.status(), StatusCode::CREATED);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["credentials"]["adminSecret"], "s3cr3t");
            assert_eq!(body["credentials"]["partnerId"], 42);
        }
    }

    #[actix_web::test]
    async fn test_bind_unknown_instance_fails() {
        let (state, _store) = state_with_record("instance-1").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::put()
            .uri("/v2/service_instances/other-instance/service_bindings/binding-a")
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::GONE
        );
    }

    #[actix_web::test]
    async fn test_unbind_always_succeeds_without_state_change() {
        let (state, store) = state_with_record("instance-1").await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        // 存在与不存在的实例都返回 200
        for instance_id in ["instance-1", "no-such-instance"] {
            let req = test::TestRequest::delete()
                .uri(&format!(
                    "/v2/service_instances/{instance_id}/service_bindings/binding-a"
                ))
                .to_request();
            assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
        }

        assert!(store.find("instance-1").await.unwrap().is_some());
    }
}
