//! 配置模块
//!
//! 全部配置来自环境变量:
//! - `BROKER_USER` / `BROKER_PASS`: Basic Auth 凭证（必填）
//! - `PORT`: 监听端口，默认 8080
//! - `WORKERS`: worker 数量，0 表示按 CPU 核数
//! - `VCAP_SERVICES`: Cloud Foundry 服务发现（postgresql 服务）
//! - `DATABASE_URL`: 无 `VCAP_SERVICES` 时的数据库连接串
//! - `DATABASE_MAX_CONNECTIONS`: 连接池上限，默认 5

use std::collections::HashMap;
use std::env;

use anyhow::{Context, bail};
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// 应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub database: DatabaseConfig,
}

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
}

/// Basic Auth 凭证
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

impl AppConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> anyhow::Result<Self> {
        let username = env::var("BROKER_USER").context("缺少环境变量 BROKER_USER")?;
        let password = env::var("BROKER_PASS").context("缺少环境变量 BROKER_PASS")?;

        let port = parse_port(env::var("PORT").ok().as_deref())?;
        let workers = env::var("WORKERS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0);

        let url = resolve_database_url(
            env::var("VCAP_SERVICES").ok().as_deref(),
            env::var("DATABASE_URL").ok(),
        )?;
        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        Ok(Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port,
                workers,
            },
            auth: AuthConfig { username, password },
            database: DatabaseConfig {
                url,
                max_connections,
            },
        })
    }
}

fn parse_port(raw: Option<&str>) -> anyhow::Result<u16> {
    match raw {
        None | Some("") => Ok(DEFAULT_PORT),
        Some(value) => value
            .parse()
            .with_context(|| format!("无效的 PORT: {value}")),
    }
}

/// 数据库连接优先走 `VCAP_SERVICES`，其次 `DATABASE_URL`
fn resolve_database_url(vcap: Option<&str>, fallback: Option<String>) -> anyhow::Result<String> {
    if let Some(raw) = vcap {
        return vcap_postgres_url(raw);
    }
    fallback.ok_or_else(|| anyhow::anyhow!("未找到数据库配置: 需要 VCAP_SERVICES 或 DATABASE_URL"))
}

#[derive(Debug, Deserialize)]
struct VcapService {
    credentials: VcapCredentials,
}

#[derive(Debug, Deserialize)]
struct VcapCredentials {
    hostname: String,
    /// CF 的 port 字段可能是数字也可能是字符串
    port: serde_json::Value,
    username: String,
    dbname: String,
    password: String,
}

/// 从 Cloud Foundry `VCAP_SERVICES` 中解析 postgresql 服务
fn vcap_postgres_url(raw: &str) -> anyhow::Result<String> {
    let services: HashMap<String, Vec<VcapService>> =
        serde_json::from_str(raw).context("VCAP_SERVICES 解析失败")?;

    let Some(pg_services) = services.get("postgresql") else {
        bail!("VCAP_SERVICES 中未找到 postgresql 服务");
    };
    if pg_services.len() != 1 {
        bail!(
            "期望恰好一个 postgresql 服务，实际 {} 个",
            pg_services.len()
        );
    }

    let creds = &pg_services[0].credentials;
    let port = match &creds.port {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => bail!("无效的 port 字段: {other}"),
    };

    Ok(format!(
        "postgres://{}:{}@{}:{}/{}?sslmode=disable",
        creds.username, creds.password, creds.hostname, port, creds.dbname
    ))
}
