//! Sysmon Agent - 实时系统监控与文档统计 API
//!
//! Usage:
//! - Normal mode: `sysmon-agent`
//! - With custom port: `sysmon-agent --port 8000`

use sysmon_agent::RuntimeConfig;

/// 解析命令行参数
fn parse_args() -> RuntimeConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = RuntimeConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--port" if i + 1 < args.len() => {
                config.port_override = args[i + 1].parse().ok();
                i += 2;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                i += 1;
            }
        }
    }

    config
}

fn print_help() {
    println!("Sysmon Agent - 实时系统监控与文档统计 API");
    println!();
    println!("USAGE:");
    println!("    sysmon-agent [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    --port <PORT>    Override the listening port (default: 8000, or PORT env)");
    println!("    -h, --help       Print help information");
    println!();
    println!("EXAMPLES:");
    println!("    sysmon-agent                  # Listen on 0.0.0.0:8000");
    println!("    sysmon-agent --port 9000      # Custom port");
}

fn main() {
    let config = parse_args();

    let rt = tokio::runtime::Runtime::new().expect("Failed to create runtime");
    rt.block_on(async {
        sysmon_agent::init_and_run(config).await;
    });
}
