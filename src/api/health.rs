//! 端点索引和健康检查 API
//!
//! 包含 GET /, GET /health

use axum::{response::IntoResponse, routing::get, Json, Router};
use std::sync::Arc;

use crate::config::env::constants::VERSION;
use crate::services::metrics;
use crate::state::AppState;

/// 创建索引和健康检查路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

/// 端点索引
///
/// GET /
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "System Monitoring API",
        "version": VERSION,
        "endpoints": {
            "system": "/system",
            "cpu": "/cpu",
            "memory": "/memory",
            "disk": "/disk",
            "network": "/network",
            "processes": "/processes",
            "all": "/all",
            "health": "/health",
            "statistics": {
                "main": "/statistics/",
                "servers": "/statistics/servers",
                "uploads_by_date": "/statistics/uploads-by-date",
                "storage": "/statistics/storage"
            }
        }
    }))
}

/// 健康检查
///
/// GET /health
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Local::now().to_rfc3339(),
        "uptime": metrics::uptime_korean(),
    }))
}
