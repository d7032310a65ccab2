//! Sysmon Agent - 实时系统监控与文档统计 API
//!
//! 面向仪表盘的只读指标聚合层：按请求查询宿主机 OS 指标
//! （CPU/内存/磁盘/网络/进程/温度），并提供一组 mock 的文档仓库统计端点

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::config::env::constants::VERSION;
use crate::config::EnvConfig;
use crate::state::AppState;

/// 命令行覆盖的运行时配置
#[derive(Clone, Debug, Default)]
pub struct RuntimeConfig {
    /// 覆盖监听端口
    pub port_override: Option<u16>,
}

/// 初始化日志、状态和 HTTP 服务并运行至收到退出信号
pub async fn init_and_run(runtime: RuntimeConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut config = EnvConfig::from_env();
    if let Some(port) = runtime.port_override {
        config.port = port;
    }

    let state = Arc::new(AppState::new(config));
    let app = api::router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    tracing::info!(version = VERSION, %addr, "Starting sysmon-agent");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listen address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("HTTP server error");

    tracing::info!("sysmon-agent stopped");
}

/// 等待 Ctrl-C 退出信号
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
