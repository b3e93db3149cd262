//! # 系统信息处理器

use crate::management::response;
use axum::response::Response;
use chrono::Utc;
use serde::Serialize;
use serde_json::json;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    timestamp: chrono::DateTime<Utc>,
    environment: String,
}

/// 健康检查
pub async fn health_check() -> Response {
    response::success(HealthStatus {
        status: "ok",
        timestamp: Utc::now(),
        environment: std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string()),
    })
}

/// 存活探针
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// 根路径：API 信息页面
pub async fn root_handler() -> Response {
    response::success(json!({
        "name": "Error Tracker API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "errorLogs": "/api/error-logs",
            "analytics": "/api/error-logs/analytics",
            "health": "/api/health"
        }
    }))
}
