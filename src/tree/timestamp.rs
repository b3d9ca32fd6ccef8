//! Timestamp text formats used by stored nodes and rendered lines

use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};

/// Format of `modif_date` as stored in the tree and in JSON.
pub const STORED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format of dates in rendered lines.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

/// DOS epoch, used for archive members that carry no timestamp.
const DOS_EPOCH: &str = "1980-01-01 00:00:00";

/// Format a filesystem modification time in local time.
pub fn from_system_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(STORED_FORMAT)
        .to_string()
}

/// Format an archive member's DOS date-time as-is, without timezone handling.
pub fn from_zip(time: Option<zip::DateTime>) -> String {
    match time {
        Some(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        None => DOS_EPOCH.to_string(),
    }
}

/// Reformat a stored timestamp for display, falling back to the raw text.
pub fn to_display(stored: &str) -> String {
    NaiveDateTime::parse_from_str(stored, STORED_FORMAT)
        .map(|dt| dt.format(DISPLAY_FORMAT).to_string())
        .unwrap_or_else(|_| stored.to_string())
}
