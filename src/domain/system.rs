//! 系统指标领域模型
//!
//! 每个请求新建一份快照 DTO，不跨请求共享

use serde::Serialize;

/// 系统基础信息（静态标识 + 当前时间）
#[derive(Clone, Debug, Serialize)]
pub struct SystemInfo {
    pub hostname: String,
    pub ip_address: String,
    pub platform: String,
    pub platform_release: String,
    pub platform_version: String,
    pub architecture: String,
    pub processor: String,
    pub agent_version: String,
    /// RFC 3339 格式的开机时间
    pub boot_time: String,
    /// 韩文格式运行时长（如 "3일 2시간 5분 10초"）
    pub uptime: String,
    pub current_time: String,
}

/// CPU 瞬时快照
///
/// 聚合百分比和单核百分比来自同一次采样窗口
#[derive(Clone, Debug, Serialize)]
pub struct CpuInfo {
    /// 物理核心数
    pub count: usize,
    /// 逻辑核心数
    pub count_logical: usize,
    pub percent: f64,
    /// 每个逻辑核心的使用率，长度等于 count_logical
    pub percent_per_cpu: Vec<f64>,
    /// 当前频率 (MHz)，平台不支持时为 null
    pub freq_current: Option<f64>,
    pub freq_min: Option<f64>,
    pub freq_max: Option<f64>,
}

/// 虚拟内存快照
#[derive(Clone, Debug, Serialize)]
pub struct MemoryInfo {
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
    pub available_gb: f64,
    pub free_gb: f64,
}

/// 单个挂载分区的使用情况
#[derive(Clone, Debug, Serialize)]
pub struct DiskInfo {
    pub device: String,
    pub mountpoint: String,
    pub fstype: String,
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub percent: f64,
    pub total_gb: f64,
    pub used_gb: f64,
    pub free_gb: f64,
}

/// 开机以来的网络累计计数器
#[derive(Clone, Debug, Serialize)]
pub struct NetworkInfo {
    pub bytes_sent: u64,
    pub bytes_recv: u64,
    pub packets_sent: u64,
    pub packets_recv: u64,
    pub errin: u64,
    pub errout: u64,
    /// 后端不提供丢包计数，恒为 0（保持响应 schema 兼容）
    pub dropin: u64,
    pub dropout: u64,
    pub bytes_sent_mb: f64,
    pub bytes_recv_mb: f64,
    pub bytes_sent_gb: f64,
    pub bytes_recv_gb: f64,
}

/// 单个进程的快照
#[derive(Clone, Debug, Serialize)]
pub struct ProcessInfo {
    pub pid: u32,
    pub name: String,
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub memory_mb: f64,
    pub status: String,
    /// RFC 3339 格式的进程创建时间
    pub create_time: String,
}

/// 单个温度传感器读数
#[derive(Clone, Debug, Serialize)]
pub struct SensorReading {
    pub label: String,
    pub current: f64,
    pub high: Option<f64>,
    pub critical: Option<f64>,
}
