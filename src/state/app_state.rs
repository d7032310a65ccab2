//! 应用状态
//!
//! 请求之间唯一共享的数据：环境配置、启动时间和只读的文档统计基础表。
//! 全部在启动时构建完成，之后不再修改，并发读取无需加锁。

use chrono::{DateTime, Utc};

use crate::config::EnvConfig;
use crate::domain::DocumentStatistics;
use crate::services::statistics::base_document_statistics;

/// 应用状态
pub struct AppState {
    /// 环境配置
    pub config: EnvConfig,
    /// 服务启动时间
    pub started_at: DateTime<Utc>,
    /// 文档统计基础表（只读；recent_uploads 由各请求从副本填充）
    pub document_stats: DocumentStatistics,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(config: EnvConfig) -> Self {
        tracing::info!(port = config.port, "Loaded configuration");

        let document_stats = base_document_statistics();
        tracing::info!(
            total_documents = document_stats.total_documents,
            tag_count = document_stats.popular_tags.len(),
            "Initialized document statistics tables"
        );

        Self {
            config,
            started_at: Utc::now(),
            document_stats,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(EnvConfig::default())
    }
}
