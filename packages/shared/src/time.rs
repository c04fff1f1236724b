//! Time-related utilities.
//!
//! All timestamps in Kokuban are Unix milliseconds in JST. Chat timestamps are
//! produced by the sender's own clock and relayed uninterpreted, so these
//! helpers are only authoritative for server-side bookkeeping (meeting
//! creation, join times).

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let jst_offset = FixedOffset::east_opt(9 * 3600).unwrap(); // JST is UTC+9
    let now_utc = Utc::now();
    let now_jst: DateTime<FixedOffset> = now_utc.with_timezone(&jst_offset);
    now_jst.timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to JST RFC 3339 format
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let jst_offset = FixedOffset::east_opt(9 * 3600).unwrap(); // JST is UTC+9
    let seconds = timestamp_millis / 1000;
    let nanos = ((timestamp_millis % 1000) * 1_000_000) as u32;
    let dt = jst_offset.timestamp_opt(seconds, nanos).unwrap();
    dt.to_rfc3339()
}

/// Convert Unix timestamp (milliseconds) to a short `HH:MM` display form (JST)
pub fn timestamp_to_jst_hhmm(timestamp_millis: i64) -> String {
    let jst_offset = FixedOffset::east_opt(9 * 3600).unwrap();
    let seconds = timestamp_millis / 1000;
    let dt = jst_offset.timestamp_opt(seconds, 0).unwrap();
    dt.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_jst_timestamp_returns_positive_value() {
        // テスト項目: get_jst_timestamp が正の値を返す
        // given (前提条件):

        // when (操作):
        let timestamp = get_jst_timestamp();

        // then (期待する結果):
        assert!(timestamp > 0);
    }

    #[test]
    fn test_timestamp_to_jst_rfc3339_format() {
        // テスト項目: タイムスタンプが正しく RFC 3339 形式に変換される
        // given (前提条件):
        // 2023-01-01 00:00:00 JST in milliseconds
        let timestamp = 1672498800000;

        // when (操作):
        let result = timestamp_to_jst_rfc3339(timestamp);

        // then (期待する結果):
        assert!(result.starts_with("2023-01-01T00:00:00"));
        assert!(result.contains("+09:00"));
    }

    #[test]
    fn test_timestamp_to_jst_hhmm() {
        // テスト項目: タイムスタンプが HH:MM 形式に変換される
        // given (前提条件):
        // 2023-01-01 09:30:00 JST in milliseconds
        let timestamp = 1672498800000 + (9 * 3600 + 30 * 60) * 1000;

        // when (操作):
        let result = timestamp_to_jst_hhmm(timestamp);

        // then (期待する結果):
        assert_eq!(result, "09:30");
    }
}
