//! 时间工具函数
//!
//! 元数据时间戳统一为 RFC 3339 字符串 (UTC)，
//! 排序比较在 handler / report 层转换为 Unix millis。

use chrono::{DateTime, SecondsFormat, Utc};

/// 当前时间的 RFC 3339 字符串 (毫秒精度, UTC)
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 当前日期 (YYYY-MM-DD)，用于导出文件名
pub fn date_stamp() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

/// RFC 3339 字符串 → Unix millis
///
/// 解析失败返回 0 (epoch)，降序排序时排在最后。
pub fn parse_millis(value: &str) -> i64 {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.timestamp_millis())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_millis_roundtrips_rfc3339() {
        let now = now_iso();
        assert!(parse_millis(&now) > 0);
    }

    #[test]
    fn parse_millis_falls_back_to_epoch() {
        assert_eq!(parse_millis(""), 0);
        assert_eq!(parse_millis("not a date"), 0);
        assert_eq!(parse_millis("2024-13-99"), 0);
    }

    #[test]
    fn date_stamp_is_iso_date() {
        let stamp = date_stamp();
        assert_eq!(stamp.len(), 10);
        assert_eq!(stamp.as_bytes()[4], b'-');
        assert_eq!(stamp.as_bytes()[7], b'-');
    }
}
