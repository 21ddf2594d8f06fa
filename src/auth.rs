//! HTTP Basic Auth 中间件
//!
//! 整个 `/v2` 路由都要求 `BROKER_USER` / `BROKER_PASS` 凭证

use std::sync::Arc;

use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{Error, body::MessageBody};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use futures::future::{Either, Ready, ready};

use crate::config::AuthConfig;
use crate::error::ApiError;

/// Basic Auth 中间件工厂
#[derive(Clone)]
pub struct BasicAuth {
    credentials: Arc<AuthConfig>,
}

impl BasicAuth {
    pub fn new(credentials: AuthConfig) -> Self {
        Self {
            credentials: Arc::new(credentials),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = BasicAuthMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddleware {
            service,
            credentials: self.credentials.clone(),
        }))
    }
}

pub struct BasicAuthMiddleware<S> {
    service: S,
    credentials: Arc<AuthConfig>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Either<Ready<Result<Self::Response, Self::Error>>, S::Future>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorized = verify_basic_auth(
            req.headers().get(header::AUTHORIZATION),
            &self.credentials,
        );

        if authorized {
            Either::Right(self.service.call(req))
        } else {
            Either::Left(ready(Err(ApiError::Unauthorized.into())))
        }
    }
}

/// 校验 `Authorization: Basic base64(user:pass)` 头
fn verify_basic_auth(header: Option<&HeaderValue>, credentials: &AuthConfig) -> bool {
    let Some(value) = header.and_then(|h| h.to_str().ok()) else {
        return false;
    };
    let Some(encoded) = value.strip_prefix("Basic ") else {
        return false;
    };
    let Ok(decoded) = BASE64.decode(encoded.trim()) else {
        return false;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return false;
    };
    let Some((username, password)) = decoded.split_once(':') else {
        return false;
    };

    username == credentials.username && password == credentials.password
}
