//! 错误处理模块

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// API 错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("缺少必填参数: {0}")]
    Validation(String),

    #[error("Partner 注册失败: {0}")]
    Registration(String),

    #[error("实例未找到: {0}")]
    InstanceNotFound(String),

    #[error("数据库错误: {0}")]
    Database(String),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("认证失败")]
    Unauthorized,
}

/// 错误响应体
///
/// Service Broker 协议约定错误以 `{"description": "..."}` 返回
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub description: String,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Registration(_) => StatusCode::BAD_GATEWAY,
            Self::InstanceNotFound(_) => StatusCode::GONE,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if matches!(self, Self::Unauthorized) {
            builder.insert_header(("WWW-Authenticate", r#"Basic realm="service-broker""#));
        }
        builder.json(ErrorBody {
            description: self.to_string(),
        })
    }
}

impl From<sea_orm::DbErr> for ApiError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}
