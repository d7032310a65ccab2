//! 领域模型模块
//!
//! 纯数据结构（响应 DTO），不依赖 axum/tokio

pub mod statistics;
pub mod system;

// Re-exports for convenience
pub use statistics::{
    AiServerInfo, DocumentStatistics, RecentUpload, ServerCpuInfo, ServerDiskInfo,
    ServerMemoryInfo, ServerNetworkInfo, ServerProcessInfo, ServerStatisticsResponse, TagCount,
    VectorStoreInfo, WebServerInfo,
};
pub use system::{
    CpuInfo, DiskInfo, MemoryInfo, NetworkInfo, ProcessInfo, SensorReading, SystemInfo,
};
