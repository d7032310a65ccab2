//! 服务层模块
//!
//! 指标采集、时长格式化与统计组装

pub mod metrics;
pub mod statistics;
pub mod uptime;
