//! 文档统计 API（仪表盘对接）
//!
//! 包含 /statistics/, /statistics/uploads-by-date, /statistics/storage,
//! /statistics/servers
//!
//! storage 和 servers 为受限端点：sosok、site 两个查询参数同时等于
//! 管理员字面量才返回完整数据；否则返回携带 restricted 标记的正常响应

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::domain::{DocumentStatistics, ServerStatisticsResponse};
use crate::services::statistics::{
    ai_server_report, document_statistics_snapshot, is_admin, storage_statistics,
    uploads_by_date, vector_store_report, web_server_report, RESTRICTED_SERVERS_MESSAGE,
    RESTRICTED_STORAGE_MESSAGE,
};
use crate::state::AppState;

/// 创建统计路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/statistics/", get(get_statistics))
        .route("/statistics/uploads-by-date", get(get_uploads_by_date))
        .route("/statistics/storage", get(get_storage_statistics))
        .route("/statistics/servers", get(get_server_statistics))
}

/// 统计端点通用查询参数
#[derive(Debug, Deserialize)]
pub struct StatsQuery {
    pub sosok: Option<String>,
    pub site: Option<String>,
}

/// 按日期上传量查询参数
#[derive(Debug, Deserialize)]
pub struct UploadsByDateQuery {
    /// 天数，默认 30
    #[serde(default = "default_days")]
    pub days: u32,
    pub sosok: Option<String>,
    pub site: Option<String>,
}

fn default_days() -> u32 {
    30
}

/// 获取文档统计
///
/// GET /statistics/
/// 无需权限；mock 数据，recent_uploads 以当前时间为基准重新生成
async fn get_statistics(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StatsQuery>,
) -> Json<DocumentStatistics> {
    tracing::debug!(sosok = ?query.sosok, site = ?query.site, "Fetching document statistics");
    Json(document_statistics_snapshot(&state.document_stats))
}

/// 获取按日期的上传量序列
///
/// GET /statistics/uploads-by-date
async fn get_uploads_by_date(Query(query): Query<UploadsByDateQuery>) -> impl IntoResponse {
    let series = uploads_by_date(query.days);
    Json(serde_json::json!({
        "dates": series.dates,
        "counts": series.counts,
        "total": series.total,
    }))
}

/// 获取存储统计（仅管理员）
///
/// GET /statistics/storage
async fn get_storage_statistics(Query(query): Query<StatsQuery>) -> impl IntoResponse {
    if !is_admin(query.sosok.as_deref(), query.site.as_deref()) {
        return Json(serde_json::json!({
            "access_level": "restricted",
            "message": RESTRICTED_STORAGE_MESSAGE,
        }));
    }

    Json(storage_statistics())
}

/// 获取服务器统计（仅管理员）
///
/// GET /statistics/servers
///
/// 管理员时组装：WEB Server 实时报告（含约 1 秒 CPU 采样）、
/// AI Server mock 报告、Vector Store mock 报告
async fn get_server_statistics(
    Query(query): Query<StatsQuery>,
) -> Json<ServerStatisticsResponse> {
    if !is_admin(query.sosok.as_deref(), query.site.as_deref()) {
        return Json(ServerStatisticsResponse::restricted(
            RESTRICTED_SERVERS_MESSAGE,
        ));
    }

    let web_server = web_server_report().await;

    Json(ServerStatisticsResponse {
        access_level: None,
        message: None,
        ai_server: Some(ai_server_report()),
        web_server: Some(web_server),
        vector_store: Some(vector_store_report()),
    })
}
