//! 环境变量配置加载

use std::env;

/// 环境配置
#[derive(Clone, Debug)]
pub struct EnvConfig {
    /// 服务监听端口
    pub port: u16,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> Self {
        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(constants::DEFAULT_PORT);

        Self { port }
    }
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            port: constants::DEFAULT_PORT,
        }
    }
}

/// 常量
pub mod constants {
    /// 默认监听端口
    pub const DEFAULT_PORT: u16 = 8000;

    /// CPU 使用率采样窗口（毫秒）
    ///
    /// 聚合和单核百分比从同一次采样快照读取，保证两者窗口一致
    pub const CPU_SAMPLE_MILLIS: u64 = 1000;

    /// 进程 CPU 使用率采样间隔（毫秒）
    ///
    /// 两次 refresh 之间的最小间隔，首次采样为 0 的问题由此消除
    pub const PROCESS_SAMPLE_MILLIS: u64 = 200;

    /// /processes 默认返回条数
    pub const DEFAULT_PROCESS_LIMIT: usize = 10;

    /// /all 和服务器统计中的 top 进程条数
    pub const TOP_PROCESS_LIMIT: usize = 5;

    /// 管理员判定用的查询参数字面量（sosok 和 site 必须同时等于该值）
    pub const ADMIN_LITERAL: &str = "관리자";

    /// 版本号
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_port() {
        let config = EnvConfig::default();
        assert_eq!(config.port, 8000);
    }
}
