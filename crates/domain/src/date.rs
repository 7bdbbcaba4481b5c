use chrono::prelude::*;

/// Formats a timestamp in millis as the UTC calendar date it falls on,
/// e.g. `2021-02-21`. Used to decide whether a new digest day has started.
pub fn calendar_date(timestamp_millis: i64) -> String {
    let secs = timestamp_millis.div_euclid(1000);
    let dt = Utc.timestamp(secs, 0);
    dt.format("%Y-%m-%d").to_string()
}
