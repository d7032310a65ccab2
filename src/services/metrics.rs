//! 系统指标采集
//!
//! 基于 sysinfo 的指标采集层：每次调用创建新的 System 实例读取即时快照，
//! 不做缓存。CPU 使用率需要两次刷新之间的采样窗口（阻塞点），
//! 聚合与单核百分比从同一快照读取以保证窗口一致。

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::net::{ToSocketAddrs, UdpSocket};
use std::time::Duration;

use chrono::{Local, TimeZone};
use sysinfo::{
    Components, CpuRefreshKind, Disks, MemoryRefreshKind, Networks, ProcessRefreshKind,
    ProcessesToUpdate, RefreshKind, System,
};

use crate::config::env::constants::{CPU_SAMPLE_MILLIS, PROCESS_SAMPLE_MILLIS, VERSION};
use crate::domain::{
    CpuInfo, DiskInfo, MemoryInfo, NetworkInfo, ProcessInfo, SensorReading, ServerDiskInfo,
    ServerProcessInfo, SystemInfo,
};
use crate::error::{ApiError, ApiResult};
use crate::services::uptime::format_uptime_korean;

/// 保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 字节 → GB，保留两位小数
pub fn bytes_to_gb(bytes: u64) -> f64 {
    round2(bytes as f64 / 1024f64.powi(3))
}

/// 字节 → MB，保留两位小数
pub fn bytes_to_mb(bytes: u64) -> f64 {
    round2(bytes as f64 / 1024f64.powi(2))
}

/// 探测对外 IP 地址
///
/// 通过 UDP socket connect 到公网地址读取本地端点（不实际发包），
/// 失败时回退到主机名解析，再回退到回环地址
pub fn detect_ip_address() -> String {
    if let Ok(socket) = UdpSocket::bind("0.0.0.0:0") {
        if socket.connect("8.8.8.8:80").is_ok() {
            if let Ok(addr) = socket.local_addr() {
                return addr.ip().to_string();
            }
        }
    }

    if let Ok(host) = hostname::get() {
        let host = host.to_string_lossy();
        if let Ok(mut addrs) = format!("{}:0", host).to_socket_addrs() {
            if let Some(addr) = addrs.next() {
                return addr.ip().to_string();
            }
        }
    }

    "127.0.0.1".to_string()
}

/// 获取操作系统的可读名称
///
/// Linux 优先读取 /etc/os-release 的 PRETTY_NAME，失败时回退为 "<OS> <版本>"
pub fn os_pretty_name() -> String {
    if let Ok(content) = std::fs::read_to_string("/etc/os-release") {
        for line in content.lines() {
            if let Some(value) = line.strip_prefix("PRETTY_NAME=") {
                return value.trim().trim_matches('"').to_string();
            }
        }
    }

    format!(
        "{} {}",
        System::name().unwrap_or_else(|| "unknown".to_string()),
        System::os_version().unwrap_or_else(|| "unknown".to_string())
    )
}

/// 当前系统运行时长（韩文格式）
pub fn uptime_korean() -> String {
    format_uptime_korean(System::uptime())
}

/// "<OS 名> <内核版本>" 形式的平台字符串
pub fn platform_string() -> String {
    format!(
        "{} {}",
        System::name().unwrap_or_else(|| "unknown".to_string()),
        System::kernel_version().unwrap_or_else(|| "unknown".to_string())
    )
}

/// 采集系统基础信息
pub fn collect_system_info() -> ApiResult<SystemInfo> {
    let sys = System::new_with_specifics(
        RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
    );

    let processor = sys
        .cpus()
        .first()
        .map(|c| c.brand().to_string())
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    let boot_time = Local
        .timestamp_opt(System::boot_time() as i64, 0)
        .single()
        .ok_or_else(|| ApiError::internal("invalid boot time from OS"))?;

    Ok(SystemInfo {
        hostname: System::host_name().unwrap_or_else(|| "unknown".to_string()),
        ip_address: detect_ip_address(),
        platform: System::name().unwrap_or_else(|| "unknown".to_string()),
        platform_release: System::kernel_version().unwrap_or_else(|| "unknown".to_string()),
        platform_version: System::os_version().unwrap_or_else(|| "unknown".to_string()),
        architecture: std::env::consts::ARCH.to_string(),
        processor,
        agent_version: VERSION.to_string(),
        boot_time: boot_time.to_rfc3339(),
        uptime: uptime_korean(),
        current_time: Local::now().to_rfc3339(),
    })
}

/// 采集 CPU 快照
///
/// 阻塞约 1 秒：两次 refresh 之间的采样窗口。
/// 聚合百分比取单核平均值，与 percent_per_cpu 来自同一快照
pub async fn collect_cpu_info() -> CpuInfo {
    let mut sys = System::new_with_specifics(
        RefreshKind::new().with_cpu(CpuRefreshKind::everything()),
    );
    sys.refresh_cpu_all();
    tokio::time::sleep(Duration::from_millis(CPU_SAMPLE_MILLIS)).await;
    sys.refresh_cpu_all();

    let percent_per_cpu: Vec<f64> = sys
        .cpus()
        .iter()
        .map(|c| round2(c.cpu_usage() as f64))
        .collect();

    let percent = if percent_per_cpu.is_empty() {
        0.0
    } else {
        round2(percent_per_cpu.iter().sum::<f64>() / percent_per_cpu.len() as f64)
    };

    // 频率仅部分平台可用，0 视为不可用
    let freq = sys.cpus().first().map(|c| c.frequency()).unwrap_or(0);

    CpuInfo {
        count: sys.physical_core_count().unwrap_or(0),
        count_logical: sys.cpus().len(),
        percent,
        percent_per_cpu,
        freq_current: (freq > 0).then_some(freq as f64),
        freq_min: None,
        freq_max: None,
    }
}

/// 内存使用百分比：(total - available) / total
///
/// Linux 上 used 不含可回收的 cache/buffers，按 available 计算才与
/// 常见监控工具的口径一致
pub fn memory_percent(total: u64, available: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round2(total.saturating_sub(available) as f64 / total as f64 * 100.0)
}

/// 采集内存快照
pub fn collect_memory_info() -> MemoryInfo {
    let sys = System::new_with_specifics(
        RefreshKind::new().with_memory(MemoryRefreshKind::everything()),
    );

    let total = sys.total_memory();
    let used = sys.used_memory();

    MemoryInfo {
        total,
        available: sys.available_memory(),
        used,
        free: sys.free_memory(),
        percent: memory_percent(total, sys.available_memory()),
        total_gb: bytes_to_gb(total),
        used_gb: bytes_to_gb(used),
        available_gb: bytes_to_gb(sys.available_memory()),
        free_gb: bytes_to_gb(sys.free_memory()),
    }
}

/// 采集所有可枚举挂载分区的使用情况
///
/// 不可访问的分区由枚举层直接省略；total 为 0 的伪文件系统条目跳过
pub fn collect_disk_info() -> Vec<DiskInfo> {
    let disks = Disks::new_with_refreshed_list();

    disks
        .iter()
        .filter(|disk| disk.total_space() > 0)
        .map(|disk| {
            let total = disk.total_space();
            let free = disk.available_space();
            let used = total.saturating_sub(free);
            DiskInfo {
                device: disk.name().to_string_lossy().to_string(),
                mountpoint: disk.mount_point().to_string_lossy().to_string(),
                fstype: disk.file_system().to_string_lossy().to_string(),
                total,
                used,
                free,
                percent: round2(used as f64 / total as f64 * 100.0),
                total_gb: bytes_to_gb(total),
                used_gb: bytes_to_gb(used),
                free_gb: bytes_to_gb(free),
            }
        })
        .collect()
}

/// 采集开机以来的网络累计计数器（所有接口求和）
pub fn collect_network_info() -> NetworkInfo {
    let networks = Networks::new_with_refreshed_list();

    let mut bytes_sent = 0u64;
    let mut bytes_recv = 0u64;
    let mut packets_sent = 0u64;
    let mut packets_recv = 0u64;
    let mut errin = 0u64;
    let mut errout = 0u64;

    for (_name, data) in networks.list() {
        bytes_sent += data.total_transmitted();
        bytes_recv += data.total_received();
        packets_sent += data.total_packets_transmitted();
        packets_recv += data.total_packets_received();
        errin += data.total_errors_on_received();
        errout += data.total_errors_on_transmitted();
    }

    NetworkInfo {
        bytes_sent,
        bytes_recv,
        packets_sent,
        packets_recv,
        errin,
        errout,
        dropin: 0,
        dropout: 0,
        bytes_sent_mb: bytes_to_mb(bytes_sent),
        bytes_recv_mb: bytes_to_mb(bytes_recv),
        bytes_sent_gb: bytes_to_gb(bytes_sent),
        bytes_recv_gb: bytes_to_gb(bytes_recv),
    }
}

/// 进程过滤：CPU 或内存任一达到阈值即通过（inclusive-OR）
pub fn passes_threshold(cpu_percent: f64, memory_percent: f64, min_cpu: f64, min_memory: f64) -> bool {
    cpu_percent >= min_cpu || memory_percent >= min_memory
}

/// 按指定键降序排序后截断到 limit
///
/// 未识别的 sort_by 回退为 cpu_percent；截断在排序之后进行
pub fn sort_and_truncate(mut processes: Vec<ProcessInfo>, sort_by: &str, limit: usize) -> Vec<ProcessInfo> {
    if sort_by == "memory_percent" {
        processes.sort_by(|a, b| {
            b.memory_percent
                .partial_cmp(&a.memory_percent)
                .unwrap_or(Ordering::Equal)
        });
    } else {
        processes.sort_by(|a, b| {
            b.cpu_percent
                .partial_cmp(&a.cpu_percent)
                .unwrap_or(Ordering::Equal)
        });
    }
    processes.truncate(limit);
    processes
}

/// 刷新两次进程表以获得非零的 CPU 使用率
///
/// 首次采样 CPU 使用率恒为 0，隔 PROCESS_SAMPLE_MILLIS 再刷新一次
async fn refreshed_process_table() -> System {
    let mut sys = System::new_with_specifics(
        RefreshKind::new()
            .with_processes(ProcessRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything()),
    );
    tokio::time::sleep(Duration::from_millis(PROCESS_SAMPLE_MILLIS)).await;
    sys.refresh_processes(ProcessesToUpdate::All);
    sys
}

/// 采集进程列表
///
/// 过滤（OR 阈值）→ 降序排序 → 截断。中途消失或不可访问的进程由
/// 进程表枚举层直接省略
pub async fn collect_processes(
    sort_by: &str,
    limit: usize,
    min_cpu: f64,
    min_memory: f64,
) -> Vec<ProcessInfo> {
    let sys = refreshed_process_table().await;
    let total_memory = sys.total_memory();

    let processes: Vec<ProcessInfo> = sys
        .processes()
        .iter()
        .filter_map(|(pid, proc)| {
            let cpu_percent = round2(proc.cpu_usage() as f64);
            let memory_percent = if total_memory > 0 {
                round2(proc.memory() as f64 / total_memory as f64 * 100.0)
            } else {
                0.0
            };

            if !passes_threshold(cpu_percent, memory_percent, min_cpu, min_memory) {
                return None;
            }

            let create_time = Local
                .timestamp_opt(proc.start_time() as i64, 0)
                .single()
                .map(|t| t.to_rfc3339())
                .unwrap_or_default();

            Some(ProcessInfo {
                pid: pid.as_u32(),
                name: proc.name().to_string_lossy().to_string(),
                cpu_percent,
                memory_percent,
                memory_mb: bytes_to_mb(proc.memory()),
                status: proc.status().to_string(),
                create_time,
            })
        })
        .collect();

    sort_and_truncate(processes, sort_by, limit)
}

/// 采集 CPU 占用最高的活跃进程（cpu% > 0），用于服务器统计和 /all
pub async fn collect_top_processes(limit: usize) -> Vec<ServerProcessInfo> {
    let sys = refreshed_process_table().await;

    let mut processes: Vec<ServerProcessInfo> = sys
        .processes()
        .values()
        .filter(|proc| proc.cpu_usage() > 0.0)
        .map(|proc| ServerProcessInfo {
            name: proc.name().to_string_lossy().to_string(),
            cpu_percent: round2(proc.cpu_usage() as f64),
            memory_mb: bytes_to_mb(proc.memory()),
        })
        .collect();

    processes.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(Ordering::Equal)
    });
    processes.truncate(limit);
    processes
}

/// 采集根分区使用情况
///
/// 与 collect_disk_info 的错误策略不同：任何失败都返回全零占位而不报错
pub fn collect_main_disk_usage() -> ServerDiskInfo {
    let disks = Disks::new_with_refreshed_list();

    let root = disks
        .iter()
        .find(|d| d.mount_point().to_string_lossy() == "/")
        .or_else(|| disks.iter().max_by_key(|d| d.total_space()));

    match root {
        Some(disk) if disk.total_space() > 0 => {
            let total = disk.total_space();
            let used = total.saturating_sub(disk.available_space());
            ServerDiskInfo {
                percent: round2(used as f64 / total as f64 * 100.0),
                total_gb: bytes_to_gb(total),
                used_gb: bytes_to_gb(used),
            }
        }
        _ => ServerDiskInfo {
            percent: 0.0,
            total_gb: 0.0,
            used_gb: 0.0,
        },
    }
}

/// 采集温度传感器读数，按芯片名分组
///
/// 平台无传感器时返回 None（由 handler 转为说明性消息，不是错误）
pub fn collect_temperatures() -> Option<BTreeMap<String, Vec<SensorReading>>> {
    let components = Components::new_with_refreshed_list();
    if components.list().is_empty() {
        return None;
    }

    let mut result: BTreeMap<String, Vec<SensorReading>> = BTreeMap::new();
    for component in components.list() {
        let label = component.label().trim();
        // label 形如 "coretemp Core 0"，第一个 token 作为芯片名
        let (chip, sensor) = match label.split_once(' ') {
            Some((chip, rest)) => (chip.to_string(), rest.trim().to_string()),
            None if !label.is_empty() => (label.to_string(), "Unknown".to_string()),
            None => ("unknown".to_string(), "Unknown".to_string()),
        };

        let high = component.max();
        result.entry(chip).or_default().push(SensorReading {
            label: sensor,
            current: round2(component.temperature() as f64),
            high: (high > 0.0).then(|| round2(high as f64)),
            critical: component.critical().map(|c| round2(c as f64)),
        });
    }

    Some(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proc_info(pid: u32, cpu: f64, mem: f64) -> ProcessInfo {
        ProcessInfo {
            pid,
            name: format!("proc-{}", pid),
            cpu_percent: cpu,
            memory_percent: mem,
            memory_mb: 0.0,
            status: "Run".to_string(),
            create_time: String::new(),
        }
    }

    #[test]
    fn test_bytes_to_gb() {
        assert_eq!(bytes_to_gb(1024 * 1024 * 1024), 1.0);
        assert_eq!(bytes_to_gb(1536 * 1024 * 1024), 1.5);
        // round(107374182400 / 1024^3, 2) = 100.0
        assert_eq!(bytes_to_gb(107_374_182_400), 100.0);
    }

    #[test]
    fn test_bytes_to_mb() {
        assert_eq!(bytes_to_mb(1024 * 1024), 1.0);
        assert_eq!(bytes_to_mb(5 * 1024 * 1024 + 512 * 1024), 5.5);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(99.999), 100.0);
    }

    #[test]
    fn test_threshold_is_inclusive_or() {
        // cpu 为 0 但内存达标 → 通过
        assert!(passes_threshold(0.0, 50.0, 10.0, 5.0));
        // 内存为 0 但 cpu 达标 → 通过
        assert!(passes_threshold(20.0, 0.0, 10.0, 5.0));
        // 两者都低于阈值 → 拒绝
        assert!(!passes_threshold(0.0, 0.0, 10.0, 5.0));
        // 阈值默认 0.0 时全部通过
        assert!(passes_threshold(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_sort_by_cpu_descending() {
        let procs = vec![proc_info(1, 5.0, 0.0), proc_info(2, 50.0, 0.0), proc_info(3, 20.0, 0.0)];
        let sorted = sort_and_truncate(procs, "cpu_percent", 10);
        let pids: Vec<u32> = sorted.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn test_sort_by_memory_descending() {
        let procs = vec![proc_info(1, 0.0, 1.0), proc_info(2, 0.0, 9.0), proc_info(3, 0.0, 4.0)];
        let sorted = sort_and_truncate(procs, "memory_percent", 10);
        let pids: Vec<u32> = sorted.iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2, 3, 1]);
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_cpu() {
        let procs = vec![proc_info(1, 1.0, 9.0), proc_info(2, 2.0, 1.0)];
        let sorted = sort_and_truncate(procs, "nonsense", 10);
        assert_eq!(sorted[0].pid, 2);
    }

    #[test]
    fn test_truncate_after_sort() {
        let procs = vec![proc_info(1, 1.0, 0.0), proc_info(2, 3.0, 0.0), proc_info(3, 2.0, 0.0)];
        let sorted = sort_and_truncate(procs, "cpu_percent", 2);
        let pids: Vec<u32> = sorted.iter().map(|p| p.pid).collect();
        // 截断发生在排序之后，保留的是 cpu 最高的两个
        assert_eq!(pids, vec![2, 3]);
    }

    #[test]
    fn test_detect_ip_never_empty() {
        let ip = detect_ip_address();
        assert!(!ip.is_empty());
    }

    #[test]
    fn test_memory_percent_uses_available() {
        // 16 GB 总量，12 GB 可用（含可回收 cache）→ 25%
        assert_eq!(memory_percent(16, 12), 25.0);
        assert_eq!(memory_percent(100, 0), 100.0);
        assert_eq!(memory_percent(0, 0), 0.0);
        // available 异常大于 total 时饱和为 0
        assert_eq!(memory_percent(4, 8), 0.0);
    }

    #[tokio::test]
    async fn test_collect_processes_respects_limit() {
        let procs = collect_processes("cpu_percent", 3, 0.0, 0.0).await;
        assert!(procs.len() <= 3);
        // 降序排序
        for pair in procs.windows(2) {
            assert!(pair[0].cpu_percent >= pair[1].cpu_percent);
        }
    }

    #[tokio::test]
    async fn test_collect_top_processes_only_active() {
        let procs = collect_top_processes(5).await;
        assert!(procs.len() <= 5);
        for p in &procs {
            assert!(p.cpu_percent > 0.0);
        }
    }
}
