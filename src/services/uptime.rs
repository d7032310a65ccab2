//! 韩文运行时长格式化
//!
//! 将秒数分解为 일/시간/분/초，只输出非零的高位单位；
//! 秒位仅在非零或前面没有任何输出时追加（保证结果非空）。
//! 另提供对外部英文格式（"N days, HH:MM:SS" 等）的重解析。

use regex::Regex;
use std::sync::OnceLock;

/// 将四元组渲染为韩文时长字符串
///
/// 规则：天/时/分 仅在 > 0 时输出；秒在 > 0 或此前无任何输出时输出。
/// 例："1일"（1d0h0m0s）、"0초"（全零）
fn render_korean(days: u64, hours: u64, minutes: u64, seconds: u64) -> String {
    let mut result = String::new();
    if days > 0 {
        result.push_str(&format!("{}일 ", days));
    }
    if hours > 0 {
        result.push_str(&format!("{}시간 ", hours));
    }
    if minutes > 0 {
        result.push_str(&format!("{}분 ", minutes));
    }
    if seconds > 0 || result.is_empty() {
        result.push_str(&format!("{}초", seconds));
    }
    result.trim_end().to_string()
}

/// 将总秒数格式化为韩文时长
pub fn format_uptime_korean(total_secs: u64) -> String {
    let days = total_secs / 86400;
    let hours = (total_secs % 86400) / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    render_korean(days, hours, minutes, seconds)
}

fn days_hms_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s*days?,\s*(\d+):(\d+):(\d+)").unwrap())
}

fn hms_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+):(\d+):(\d+)").unwrap())
}

fn digits_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)").unwrap())
}

/// 将外部时长文本重格式化为韩文布局
///
/// - 空输入 → "-"
/// - 已含韩文单位 → 原样返回
/// - "N day(s), HH:MM:SS" 及其变体 → 韩文格式
/// - 无法解析 → 原样返回（不报错）
pub fn parse_uptime_to_korean(uptime_str: &str) -> String {
    if uptime_str.is_empty() {
        return "-".to_string();
    }

    // 已经是韩文格式
    if uptime_str.contains('일') || uptime_str.contains("시간") {
        return uptime_str.to_string();
    }

    if let Some(caps) = days_hms_regex().captures(uptime_str) {
        let days: u64 = caps[1].parse().unwrap_or(0);
        let hours: u64 = caps[2].parse().unwrap_or(0);
        let minutes: u64 = caps[3].parse().unwrap_or(0);
        let seconds: u64 = caps[4].parse().unwrap_or(0);
        return render_korean(days, hours, minutes, seconds);
    }

    // timedelta 风格："N day, H:MM:SS" 或无天数的 "H:MM:SS"
    if uptime_str.contains("day") {
        let mut days: u64 = 0;
        let mut time_part = uptime_str;

        if let Some((days_part, rest)) = uptime_str.split_once(',') {
            if let Some(caps) = digits_regex().captures(days_part) {
                days = caps[1].parse().unwrap_or(0);
            }
            time_part = rest.trim();
        }

        if let Some(caps) = hms_regex().captures(time_part) {
            let hours: u64 = caps[1].parse().unwrap_or(0);
            let minutes: u64 = caps[2].parse().unwrap_or(0);
            let seconds: u64 = caps[3].parse().unwrap_or(0);
            return render_korean(days, hours, minutes, seconds);
        }
    }

    // 解析失败时原样返回
    uptime_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_duration() {
        assert_eq!(format_uptime_korean(0), "0초");
    }

    #[test]
    fn test_seconds_only() {
        assert_eq!(format_uptime_korean(45), "45초");
    }

    #[test]
    fn test_exact_minute_omits_zero_seconds() {
        assert_eq!(format_uptime_korean(60), "1분");
    }

    #[test]
    fn test_exact_hour() {
        assert_eq!(format_uptime_korean(3600), "1시간");
    }

    #[test]
    fn test_exact_day_omits_lower_zeros() {
        // 秒位为 0 且已有高位输出，因此被省略
        assert_eq!(format_uptime_korean(86400), "1일");
    }

    #[test]
    fn test_full_components() {
        let secs = 86400 + 2 * 3600 + 3 * 60 + 4;
        assert_eq!(format_uptime_korean(secs), "1일 2시간 3분 4초");
    }

    #[test]
    fn test_parse_days_hms() {
        assert_eq!(parse_uptime_to_korean("10 days, 5:30:45"), "10일 5시간 30분 45초");
        assert_eq!(parse_uptime_to_korean("1 day, 0:00:30"), "1일 30초");
    }

    #[test]
    fn test_parse_korean_passthrough() {
        assert_eq!(parse_uptime_to_korean("3일 2시간"), "3일 2시간");
        assert_eq!(parse_uptime_to_korean("5시간 1분"), "5시간 1분");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse_uptime_to_korean(""), "-");
    }

    #[test]
    fn test_parse_garbage_passthrough() {
        assert_eq!(parse_uptime_to_korean("up since tuesday"), "up since tuesday");
    }
}
