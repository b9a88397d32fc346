use chrono::{DateTime, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

    pub fn now_timestamp_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    /// Used for display purposes; invalid timestamps render as an empty string.
    pub fn format_timestamp_ms(epoch_ms: i64) -> String {
        DateTime::from_timestamp_millis(epoch_ms)
            .map(|dt| dt.format(Self::STANDARD_TIME_FORMAT).to_string())
            .unwrap_or_default()
    }
}
