//! 文档仓库统计与服务器统计组装
//!
//! 文档统计基础表在进程启动时构建一次，请求期间只读；
//! recent_uploads 每次调用从副本重新生成（copy-before-append），
//! 保证并发请求之间不存在共享可变状态。
//!
//! 服务器统计：WEB Server 为宿主机实时指标，AI Server 与 Vector Store
//! 为固定 mock（来自历史部署的前端契约，字段值不可随意更改）。

use chrono::{Days, Local};
use serde_json::json;
use std::collections::BTreeMap;

use crate::config::env::constants::{ADMIN_LITERAL, TOP_PROCESS_LIMIT};
use crate::domain::{
    AiServerInfo, DocumentStatistics, RecentUpload, ServerCpuInfo, ServerDiskInfo,
    ServerMemoryInfo, ServerNetworkInfo, ServerProcessInfo, TagCount, VectorStoreInfo,
    WebServerInfo,
};
use crate::services::metrics;
use crate::services::uptime::format_uptime_korean;

/// 非管理员访问 /statistics/servers 时的提示
pub const RESTRICTED_SERVERS_MESSAGE: &str = "서버 통계는 관리자만 볼 수 있습니다.";

/// 非管理员访问 /statistics/storage 时的提示
pub const RESTRICTED_STORAGE_MESSAGE: &str = "저장소 통계는 관리자만 볼 수 있습니다.";

/// 管理员判定：sosok 和 site 两个查询参数同时等于固定字面量
pub fn is_admin(sosok: Option<&str>, site: Option<&str>) -> bool {
    sosok == Some(ADMIN_LITERAL) && site == Some(ADMIN_LITERAL)
}

/// 构建文档统计基础表（recent_uploads 留空，由快照填充）
pub fn base_document_statistics() -> DocumentStatistics {
    let documents_by_type = BTreeMap::from([
        ("pdf".to_string(), 8234),
        ("hwp".to_string(), 4567),
        ("docx".to_string(), 1234),
        ("txt".to_string(), 890),
        ("pptx".to_string(), 309),
    ]);

    let documents_by_sosok = BTreeMap::from([
        ("관리자".to_string(), 5000),
        ("개발팀".to_string(), 3500),
        ("기획팀".to_string(), 2500),
        ("디자인팀".to_string(), 2234),
        ("운영팀".to_string(), 2000),
    ]);

    let documents_by_site = BTreeMap::from([
        ("본사".to_string(), 6000),
        ("지사1".to_string(), 3500),
        ("지사2".to_string(), 2734),
        ("연구소".to_string(), 1500),
        ("관리자".to_string(), 1500),
    ]);

    let popular_tags = vec![
        TagCount { name: "보고서".to_string(), count: 3456 },
        TagCount { name: "회의록".to_string(), count: 2345 },
        TagCount { name: "기획안".to_string(), count: 1234 },
        TagCount { name: "매뉴얼".to_string(), count: 890 },
        TagCount { name: "가이드".to_string(), count: 567 },
    ];

    DocumentStatistics {
        total_documents: 15234,
        total_sections: 45678,
        average_sections_per_document: 3.0,
        documents_by_type,
        documents_by_sosok,
        documents_by_site,
        popular_tags,
        recent_uploads: Vec::new(),
    }
}

/// 以当前日期为基准生成最近上传列表（偏移 i 天的确定性模式）
pub fn generate_recent_uploads(count: usize) -> Vec<RecentUpload> {
    let now = Local::now().date_naive();

    (0..count)
        .map(|i| {
            let upload_date = now
                .checked_sub_days(Days::new(i as u64))
                .unwrap_or(now)
                .format("%Y%m%d")
                .to_string();
            RecentUpload {
                filename: format!("문서_{}.pdf", i + 1),
                sosok: if i % 3 == 0 { "관리자" } else { "개발팀" }.to_string(),
                site: if i % 2 == 0 { "본사" } else { "지사1" }.to_string(),
                upload_date,
                tags: if i % 2 == 0 { "보고서,기획안" } else { "회의록" }.to_string(),
            }
        })
        .collect()
}

/// 从基础表构建请求级快照：先复制再追加，绝不原地修改基础表
pub fn document_statistics_snapshot(base: &DocumentStatistics) -> DocumentStatistics {
    let mut stats = base.clone();
    stats.recent_uploads = generate_recent_uploads(10);
    stats
}

/// 按日期的上传量合成序列
#[derive(Clone, Debug)]
pub struct UploadSeries {
    /// `%Y%m%d`，升序，最后一项为今天
    pub dates: Vec<String>,
    pub counts: Vec<u64>,
    pub total: u64,
}

/// 生成确定性的按日期上传量序列
///
/// 偏移 i 天（从今天往回数）的计数为 20 + (i mod 10) * 3，最旧日期在前
pub fn uploads_by_date(days: u32) -> UploadSeries {
    let today = Local::now().date_naive();

    let mut dates = Vec::with_capacity(days as usize);
    let mut counts = Vec::with_capacity(days as usize);
    let mut total = 0u64;

    for i in 0..days {
        let date = today
            .checked_sub_days(Days::new(i as u64))
            .unwrap_or(today)
            .format("%Y%m%d")
            .to_string();
        let count = 20 + (i as u64 % 10) * 3;
        dates.push(date);
        counts.push(count);
        total += count;
    }

    dates.reverse();
    counts.reverse();

    UploadSeries { dates, counts, total }
}

/// 存储统计（仅管理员），固定数据
pub fn storage_statistics() -> serde_json::Value {
    json!({
        "total_size": 107_374_182_400u64, // 100 GB
        "total_size_gb": 100.0,
        "file_count": 15234,
        "average_file_size": 7_048_576, // 约 7 MB
        "size_by_type_mb": {
            "pdf": 45678.5,
            "hwp": 23456.7,
            "docx": 12345.8,
            "pptx": 8901.2,
            "txt": 3456.9,
            "others": 6160.9
        }
    })
}

/// AI 服务器 mock 运行时长：固定 10일 5시간 30분 45초
const AI_UPTIME_SECS: u64 = 10 * 86400 + 5 * 3600 + 30 * 60 + 45;

/// 组装 AI 服务器报告（完全 mock）
pub fn ai_server_report() -> AiServerInfo {
    AiServerInfo {
        name: "AI Server".to_string(),
        status: "online".to_string(),
        hostname: "ai-server".to_string(),
        ip_address: "192.168.1.101".to_string(),
        platform: "Linux".to_string(),
        python_version: "3.11.5".to_string(),
        uptime: format_uptime_korean(AI_UPTIME_SECS),
        cpu: ServerCpuInfo {
            percent: 35.5,
            count: 8,
            freq_current: Some(2400.0),
        },
        memory: ServerMemoryInfo {
            percent: 62.3,
            total_gb: 32.0,
            used_gb: 19.9,
        },
        disk: ServerDiskInfo {
            percent: 45.8,
            total_gb: 500.0,
            used_gb: 229.0,
        },
        network: ServerNetworkInfo {
            bytes_sent_mb: 1024.5,
            bytes_recv_mb: 2048.7,
        },
        gpu: Some(json!({
            "available": true,
            "count": 1,
            "devices": [{
                "index": 0,
                "name": "NVIDIA GeForce RTX 3090",
                "utilization": 85,
                "memory": {
                    "total": 24576,
                    "used": 18432,
                    "free": 6144,
                    "percent": 75.0
                },
                "temperature": 72,
                "power": {
                    "draw": 320.5,
                    "limit": 350.0
                }
            }]
        })),
        top_processes: vec![
            ServerProcessInfo { name: "python".to_string(), cpu_percent: 25.5, memory_mb: 2048.0 },
            ServerProcessInfo { name: "uvicorn".to_string(), cpu_percent: 8.2, memory_mb: 512.0 },
            ServerProcessInfo { name: "chromadb".to_string(), cpu_percent: 5.1, memory_mb: 1024.0 },
        ],
    }
}

/// 组装向量存储报告（固定 mock）
pub fn vector_store_report() -> VectorStoreInfo {
    VectorStoreInfo {
        name: "Vector Store".to_string(),
        status: "online".to_string(),
        store_type: "ChromaDB".to_string(),
        unique_documents: 15234,
        total_vectors: 45678,
        collection: "documents".to_string(),
    }
}

/// 组装 WEB 服务器报告（宿主机实时指标 + top 5 活跃进程）
///
/// 含约 1 秒的 CPU 采样窗口
pub async fn web_server_report() -> WebServerInfo {
    let cpu = metrics::collect_cpu_info().await;
    let memory = metrics::collect_memory_info();
    let disk = metrics::collect_main_disk_usage();
    let network = metrics::collect_network_info();
    let top_processes = metrics::collect_top_processes(TOP_PROCESS_LIMIT).await;

    // 物理核心数不可用时回退到逻辑核心数
    let cpu_count = if cpu.count > 0 { cpu.count } else { cpu.count_logical };

    WebServerInfo {
        name: "WEB Server".to_string(),
        status: "online".to_string(),
        hostname: sysinfo::System::host_name().unwrap_or_else(|| "unknown".to_string()),
        ip_address: metrics::detect_ip_address(),
        os_info: metrics::os_pretty_name(),
        platform: metrics::platform_string(),
        uptime: metrics::uptime_korean(),
        cpu: ServerCpuInfo {
            percent: cpu.percent,
            count: cpu_count,
            freq_current: cpu.freq_current,
        },
        memory: ServerMemoryInfo {
            percent: memory.percent,
            total_gb: memory.total_gb,
            used_gb: memory.used_gb,
        },
        disk,
        network: ServerNetworkInfo {
            bytes_sent_mb: network.bytes_sent_mb,
            bytes_recv_mb: network.bytes_recv_mb,
        },
        top_processes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_gate() {
        assert!(is_admin(Some("관리자"), Some("관리자")));
        assert!(!is_admin(Some("관리자"), Some("본사")));
        assert!(!is_admin(Some("개발팀"), Some("관리자")));
        assert!(!is_admin(None, Some("관리자")));
        assert!(!is_admin(None, None));
        assert!(!is_admin(Some(""), Some("")));
    }

    #[test]
    fn test_uploads_by_date_series() {
        let series = uploads_by_date(5);
        assert_eq!(series.dates.len(), 5);
        assert_eq!(series.counts.len(), 5);
        // 偏移 4..0 天 → 升序后计数为 [32, 29, 26, 23, 20]
        assert_eq!(series.counts, vec![32, 29, 26, 23, 20]);
        assert_eq!(series.total, 130);
        // 日期升序，最后一项为今天
        let mut sorted = series.dates.clone();
        sorted.sort();
        assert_eq!(sorted, series.dates);
        let today = Local::now().date_naive().format("%Y%m%d").to_string();
        assert_eq!(series.dates.last(), Some(&today));
    }

    #[test]
    fn test_uploads_by_date_count_formula_wraps() {
        let series = uploads_by_date(12);
        // 升序后序列为 [23, 20, 47, 44, ..., 23, 20]：偏移 11、10 天
        // 的计数回绕到 23、20，最后一项（今天，偏移 0）为 20
        assert_eq!(series.counts[0], 23);
        assert_eq!(series.counts[1], 20);
        assert_eq!(series.counts[2], 47);
        assert_eq!(series.counts[11], 20);
    }

    #[test]
    fn test_snapshot_copies_before_append() {
        let base = base_document_statistics();
        let snapshot = document_statistics_snapshot(&base);
        assert_eq!(snapshot.recent_uploads.len(), 10);
        // 基础表保持不变
        assert!(base.recent_uploads.is_empty());
    }

    #[test]
    fn test_recent_uploads_pattern() {
        let uploads = generate_recent_uploads(10);
        assert_eq!(uploads[0].filename, "문서_1.pdf");
        assert_eq!(uploads[0].sosok, "관리자");
        assert_eq!(uploads[0].site, "본사");
        assert_eq!(uploads[0].tags, "보고서,기획안");
        assert_eq!(uploads[1].sosok, "개발팀");
        assert_eq!(uploads[1].site, "지사1");
        assert_eq!(uploads[1].tags, "회의록");
        assert_eq!(uploads[3].sosok, "관리자");
    }

    #[test]
    fn test_base_tables_fixed_values() {
        let base = base_document_statistics();
        assert_eq!(base.total_documents, 15234);
        assert_eq!(base.documents_by_type.get("pdf"), Some(&8234));
        assert_eq!(base.documents_by_sosok.get("관리자"), Some(&5000));
        assert_eq!(base.documents_by_site.get("본사"), Some(&6000));
        assert_eq!(base.popular_tags.first().map(|t| t.count), Some(3456));
    }

    #[test]
    fn test_ai_server_mock_uptime() {
        let ai = ai_server_report();
        assert_eq!(ai.uptime, "10일 5시간 30분 45초");
        assert_eq!(ai.hostname, "ai-server");
        assert!(ai.gpu.is_some());
    }

    #[test]
    fn test_vector_store_fixed() {
        let vs = vector_store_report();
        assert_eq!(vs.store_type, "ChromaDB");
        assert_eq!(vs.unique_documents, 15234);
        assert_eq!(vs.total_vectors, 45678);
    }
}
