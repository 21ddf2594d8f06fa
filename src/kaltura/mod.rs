//! Kaltura Partner 注册客户端
//!
//! 向固定的注册接口提交表单 POST，解析 JSON 响应。
//! 不做超时、重试或幂等处理，重复开通会产生两次独立注册。

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::ApiError;

/// Kaltura API 地址
pub(crate) const KALTURA_API_BASE: &str = "https://www.kaltura.com";

const REGISTER_PATH: &str = "/api_v3/service/partner/action/register";

/// 远端异常响应的 objectType 哨兵值
const API_EXCEPTION: &str = "KalturaAPIException";

/// 注册请求参数
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub name: String,
    pub company: String,
    pub email: String,
    pub instance_id: String,
}

/// 注册成功后的 Partner 账户
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartnerAccount {
    pub partner_id: i32,
    pub admin_secret: String,
}

/// Partner 注册抽象 Trait
///
/// 测试可替换为 mock 实现
#[async_trait]
pub trait PartnerRegistrar: Send + Sync {
    /// 在 Kaltura 平台上注册一个 Partner 账户
    async fn register(&self, request: &RegistrationRequest) -> Result<PartnerAccount, ApiError>;
}

/// 注册接口响应
///
/// 异常响应不含 id/adminSecret，所以全部字段使用 default
#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    id: i32,
    #[serde(default, rename = "adminSecret")]
    admin_secret: String,
    #[serde(default, rename = "objectType")]
    object_type: String,
    #[serde(default)]
    message: String,
}

/// Kaltura 注册接口客户端
pub struct KalturaClient {
    client: Client,
    base_url: String,
}

impl KalturaClient {
    pub fn new() -> Self {
        Self::with_base_url(KALTURA_API_BASE.to_string())
    }

    /// 指定 API 地址（测试用）
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn build_form(request: &RegistrationRequest) -> Vec<(&'static str, String)> {
        vec![
            ("partner[objectType]", "KalturaPartner".to_string()),
            (
                "partner[description]",
                "SAP Cloud Platform provisioned".to_string(),
            ),
            ("partner[name]", request.company.clone()),
            ("partner[adminName]", request.name.clone()),
            ("partner[adminEmail]", request.email.clone()),
            ("partner[referenceId]", request.instance_id.clone()),
            ("format", "1".to_string()),
        ]
    }

    fn parse_response(text: &str) -> Result<PartnerAccount, ApiError> {
        let response: RegisterResponse = serde_json::from_str(text).map_err(|e| {
            tracing::error!("注册响应解析失败: {e}");
            tracing::error!("原始响应: {text}");
            ApiError::Registration(format!("响应解析失败: {e}"))
        })?;

        if response.object_type == API_EXCEPTION {
            return Err(ApiError::Registration(response.message));
        }

        Ok(PartnerAccount {
            partner_id: response.id,
            admin_secret: response.admin_secret,
        })
    }
}

impl Default for KalturaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PartnerRegistrar for KalturaClient {
    async fn register(&self, request: &RegistrationRequest) -> Result<PartnerAccount, ApiError> {
        let url = format!("{}{REGISTER_PATH}", self.base_url);
        tracing::debug!("POST {url} referenceId: {}", request.instance_id);

        let response = self
            .client
            .post(&url)
            .form(&Self::build_form(request))
            .send()
            .await
            .map_err(|e| ApiError::Registration(format!("请求发送失败: {e}")))?;

        let status = response.status();
        tracing::debug!("Response Status: {status}");

        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Registration(format!("读取响应失败: {e}")))?;
        tracing::debug!("Response Body: {text}");

        Self::parse_response(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> RegistrationRequest {
        RegistrationRequest {
            name: "Alice".to_string(),
            company: "ACME".to_string(),
            email: "alice@acme.example".to_string(),
            instance_id: "instance-1".to_string(),
        }
    }

    #[test]
    fn test_build_form_maps_parameters() {
        let form = KalturaClient::build_form(&request());

        let get = |key: &str| {
            form.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };

        assert_eq!(get("partner[objectType]"), "KalturaPartner");
        assert_eq!(get("partner[name]"), "ACME");
        assert_eq!(get("partner[adminName]"), "Alice");
        assert_eq!(get("partner[adminEmail]"), "alice@acme.example");
        assert_eq!(get("partner[referenceId]"), "instance-1");
        assert_eq!(get("format"), "1");
    }

    #[test]
    fn test_parse_successful_registration() {
        let account = KalturaClient::parse_response(
            r#"{"id": 42, "adminSecret": "s3cr3t", "objectType": "KalturaPartner"}"#,
        )
        .unwrap();

        assert_eq!(
            account,
            PartnerAccount {
                partner_id: 42,
                admin_secret: "s3cr3t".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_api_exception_surfaces_message() {
        let err = KalturaClient::parse_response(
            r#"{"objectType": "KalturaAPIException", "message": "quota exceeded"}"#,
        )
        .unwrap_err();

        match err {
            ApiError::Registration(message) => assert_eq!(message, "quota exceeded"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_invalid_body_is_registration_error() {
        let err = KalturaClient::parse_response("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, ApiError::Registration(_)));
    }
}
