//! 文档仓库统计与服务器统计领域模型
//!
//! 文档统计为静态 mock 数据（recent_uploads 每次调用重新生成）；
//! 服务器统计中 WEB Server 为真实指标，AI Server / Vector Store 为固定 mock

use serde::Serialize;
use std::collections::BTreeMap;

/// 热门标签计数
#[derive(Clone, Debug, Serialize)]
pub struct TagCount {
    pub name: String,
    pub count: u64,
}

/// 最近上传的文档条目
#[derive(Clone, Debug, Serialize)]
pub struct RecentUpload {
    pub filename: String,
    pub sosok: String,
    pub site: String,
    /// `%Y%m%d` 형식
    pub upload_date: String,
    pub tags: String,
}

/// 文档仓库聚合统计（/statistics/ 响应体）
///
/// 基础表在进程启动时构建一次；`recent_uploads` 每次调用从副本重新生成，
/// 避免跨请求别名
#[derive(Clone, Debug, Serialize)]
pub struct DocumentStatistics {
    pub total_documents: u64,
    pub total_sections: u64,
    pub average_sections_per_document: f64,
    pub documents_by_type: BTreeMap<String, u64>,
    pub documents_by_sosok: BTreeMap<String, u64>,
    pub documents_by_site: BTreeMap<String, u64>,
    pub popular_tags: Vec<TagCount>,
    pub recent_uploads: Vec<RecentUpload>,
}

/// 服务器统计中的 CPU 摘要
#[derive(Clone, Debug, Serialize)]
pub struct ServerCpuInfo {
    pub percent: f64,
    pub count: usize,
    pub freq_current: Option<f64>,
}

/// 服务器统计中的内存摘要
#[derive(Clone, Debug, Serialize)]
pub struct ServerMemoryInfo {
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
}

/// 服务器统计中的磁盘摘要（仅主分区）
#[derive(Clone, Debug, Serialize)]
pub struct ServerDiskInfo {
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
}

/// 服务器统计中的网络摘要
#[derive(Clone, Debug, Serialize)]
pub struct ServerNetworkInfo {
    pub bytes_sent_mb: f64,
    pub bytes_recv_mb: f64,
}

/// 服务器统计中的进程摘要
#[derive(Clone, Debug, Serialize)]
pub struct ServerProcessInfo {
    pub name: String,
    pub cpu_percent: f64,
    pub memory_mb: f64,
}

/// WEB 服务器报告（实时指标）
#[derive(Clone, Debug, Serialize)]
pub struct WebServerInfo {
    pub name: String,
    pub status: String,
    pub hostname: String,
    pub ip_address: String,
    pub os_info: String,
    pub platform: String,
    pub uptime: String,
    pub cpu: ServerCpuInfo,
    pub memory: ServerMemoryInfo,
    pub disk: ServerDiskInfo,
    pub network: ServerNetworkInfo,
    pub top_processes: Vec<ServerProcessInfo>,
}

/// AI 服务器报告（完全 mock，含虚构 GPU 信息）
#[derive(Clone, Debug, Serialize)]
pub struct AiServerInfo {
    pub name: String,
    pub status: String,
    pub hostname: String,
    pub ip_address: String,
    pub platform: String,
    pub python_version: String,
    pub uptime: String,
    pub cpu: ServerCpuInfo,
    pub memory: ServerMemoryInfo,
    pub disk: ServerDiskInfo,
    pub network: ServerNetworkInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<serde_json::Value>,
    pub top_processes: Vec<ServerProcessInfo>,
}

/// 向量存储报告（固定 mock）
#[derive(Clone, Debug, Serialize)]
pub struct VectorStoreInfo {
    pub name: String,
    pub status: String,
    #[serde(rename = "type")]
    pub store_type: String,
    pub unique_documents: u64,
    pub total_vectors: u64,
    pub collection: String,
}

/// /statistics/servers 响应体
///
/// 管理员：三个嵌套报告；非管理员：仅 access_level + message
#[derive(Clone, Debug, Default, Serialize)]
pub struct ServerStatisticsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_server: Option<AiServerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web_server: Option<WebServerInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_store: Option<VectorStoreInfo>,
}

impl ServerStatisticsResponse {
    /// 非管理员的受限响应，除标记和消息外不填充任何字段
    pub fn restricted(message: impl Into<String>) -> Self {
        Self {
            access_level: Some("restricted".to_string()),
            message: Some(message.into()),
            ..Default::default()
        }
    }
}
