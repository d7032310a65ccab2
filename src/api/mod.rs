//! API 模块
//!
//! HTTP handlers 和路由组装

pub mod health;
pub mod statistics;
pub mod system;

use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// 构建完整的 API 路由
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Index & Health
        .merge(health::router())
        // System metrics
        .merge(system::router())
        // Document / server statistics
        .merge(statistics::router())
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(Arc::new(AppState::default()))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let (status, body) = get_json(test_app(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["endpoints"]["system"], "/system");
        assert_eq!(body["endpoints"]["statistics"]["servers"], "/statistics/servers");
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let (status, body) = get_json(test_app(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert!(body["uptime"].as_str().is_some_and(|s| !s.is_empty()));
    }

    #[tokio::test]
    async fn memory_snapshot_has_derived_fields() {
        let (status, body) = get_json(test_app(), "/memory").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["total"].as_u64().unwrap() > 0);
        assert!(body["total_gb"].as_f64().unwrap() > 0.0);
    }

    #[tokio::test]
    async fn server_statistics_restricted_without_admin_params() {
        let (status, body) = get_json(test_app(), "/statistics/servers").await;
        // 受限是正常响应，不是错误
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["access_level"], "restricted");
        assert!(body.get("web_server").is_none());
        assert!(body.get("ai_server").is_none());
        assert!(body.get("vector_store").is_none());
    }

    #[tokio::test]
    async fn storage_statistics_restricted_for_wrong_params() {
        // sosok=개발팀, site=본사
        let uri = "/statistics/storage?sosok=%EA%B0%9C%EB%B0%9C%ED%8C%80&site=%EB%B3%B8%EC%82%AC";
        let (status, body) = get_json(test_app(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["access_level"], "restricted");
    }

    #[tokio::test]
    async fn storage_statistics_full_for_admin() {
        let uri = "/statistics/storage?sosok=%EA%B4%80%EB%A6%AC%EC%9E%90&site=%EA%B4%80%EB%A6%AC%EC%9E%90";
        let (status, body) = get_json(test_app(), uri).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_size_gb"], 100.0);
        assert_eq!(body["file_count"], 15234);
    }

    #[tokio::test]
    async fn uploads_by_date_deterministic_series() {
        let (status, body) = get_json(test_app(), "/statistics/uploads-by-date?days=5").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total"], 130);
        assert_eq!(body["counts"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn document_statistics_include_recent_uploads() {
        let (status, body) = get_json(test_app(), "/statistics/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["total_documents"], 15234);
        assert_eq!(body["recent_uploads"].as_array().unwrap().len(), 10);
    }
}
