use chrono::{DateTime, Utc};

/// Convert a unix timestamp to a UTC datetime. Zero means the field was absent.
pub(crate) fn to_datetime(secs: i64) -> Option<DateTime<Utc>> {
    if secs == 0 {
        return None;
    }
    DateTime::from_timestamp(secs, 0)
}
