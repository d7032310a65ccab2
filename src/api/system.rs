//! 系统指标 API
//!
//! 包含 /system, /cpu, /memory, /disk, /network, /processes, /all, /temperature
//!
//! 每个 handler 直接在请求任务上执行同步的 OS 查询；唯一的刻意阻塞点
//! 是 CPU 百分比的采样窗口（约 1 秒，影响 /cpu、/all 和服务器统计）

use axum::{
    extract::Query,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::env::constants::{DEFAULT_PROCESS_LIMIT, TOP_PROCESS_LIMIT};
use crate::domain::{CpuInfo, DiskInfo, MemoryInfo, NetworkInfo, ProcessInfo, SystemInfo};
use crate::error::ApiResult;
use crate::services::metrics;
use crate::services::uptime::parse_uptime_to_korean;
use crate::state::AppState;

/// 创建系统指标路由
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/system", get(get_system_info))
        .route("/cpu", get(get_cpu_info))
        .route("/memory", get(get_memory_info))
        .route("/disk", get(get_disk_info))
        .route("/network", get(get_network_info))
        .route("/processes", get(get_processes))
        .route("/all", get(get_all_stats))
        .route("/temperature", get(get_temperature))
}

/// 获取系统基础信息
///
/// GET /system
async fn get_system_info() -> ApiResult<Json<SystemInfo>> {
    let info = metrics::collect_system_info().inspect_err(|e| {
        tracing::error!(error = %e, "Error getting system info");
    })?;
    Ok(Json(info))
}

/// 获取 CPU 信息与使用率（约 1 秒采样窗口）
///
/// GET /cpu
async fn get_cpu_info() -> Json<CpuInfo> {
    Json(metrics::collect_cpu_info().await)
}

/// 获取内存使用情况
///
/// GET /memory
async fn get_memory_info() -> Json<MemoryInfo> {
    Json(metrics::collect_memory_info())
}

/// 获取所有挂载分区的磁盘使用情况
///
/// GET /disk
async fn get_disk_info() -> Json<Vec<DiskInfo>> {
    Json(metrics::collect_disk_info())
}

/// 获取网络 I/O 统计
///
/// GET /network
async fn get_network_info() -> Json<NetworkInfo> {
    Json(metrics::collect_network_info())
}

/// 进程列表查询参数
#[derive(Debug, Deserialize)]
pub struct ProcessQuery {
    /// 排序键：cpu_percent（默认）或 memory_percent
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    /// 返回条数，默认 10
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// CPU 使用率下限（与 min_memory 为 OR 关系）
    #[serde(default)]
    pub min_cpu: f64,
    /// 内存占比下限（与 min_cpu 为 OR 关系）
    #[serde(default)]
    pub min_memory: f64,
}

fn default_sort_by() -> String {
    "cpu_percent".to_string()
}

fn default_limit() -> usize {
    DEFAULT_PROCESS_LIMIT
}

/// 获取按 CPU 或内存排序的进程列表
///
/// GET /processes
async fn get_processes(Query(query): Query<ProcessQuery>) -> Json<Vec<ProcessInfo>> {
    tracing::debug!(
        sort_by = %query.sort_by,
        limit = query.limit,
        min_cpu = query.min_cpu,
        min_memory = query.min_memory,
        "Listing processes"
    );

    let processes = metrics::collect_processes(
        &query.sort_by,
        query.limit,
        query.min_cpu,
        query.min_memory,
    )
    .await;

    Json(processes)
}

/// 获取全部系统统计（system + cpu + memory + disk + network + top 5 进程）
///
/// GET /all
///
/// 各类指标按顺序采集（非并发）；uptime 经韩文重解析后输出
async fn get_all_stats() -> ApiResult<Json<serde_json::Value>> {
    let mut system = metrics::collect_system_info().inspect_err(|e| {
        tracing::error!(error = %e, "Error getting all stats");
    })?;
    let cpu = metrics::collect_cpu_info().await;
    let memory = metrics::collect_memory_info();
    let disk = metrics::collect_disk_info();
    let network = metrics::collect_network_info();
    let top_processes =
        metrics::collect_processes("cpu_percent", TOP_PROCESS_LIMIT, 0.0, 0.0).await;

    // 已是韩文格式时原样通过
    system.uptime = parse_uptime_to_korean(&system.uptime);

    Ok(Json(serde_json::json!({
        "system": system,
        "cpu": cpu,
        "memory": memory,
        "disk": disk,
        "network": network,
        "top_processes": top_processes,
    })))
}

/// 获取温度传感器读数
///
/// GET /temperature
///
/// 平台不支持时返回说明性消息，不是错误
async fn get_temperature() -> impl IntoResponse {
    match metrics::collect_temperatures() {
        Some(sensors) => Json(serde_json::json!(sensors)),
        None => Json(serde_json::json!({
            "message": "Temperature sensors not available on this system"
        })),
    }
}
