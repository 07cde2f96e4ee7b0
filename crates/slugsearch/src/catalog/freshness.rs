use chrono::{DateTime, Utc};

/// Sentinel rendered when no usable last-update stamp exists.
pub const INVALID_DATE: &str = "Invalid date";

/// Relative "time ago" string for a last-update stamp. A missing stamp renders
/// the sentinel; a stamp from the future renders as zero seconds.
pub fn time_ago(last_update: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    let Some(last_update) = last_update else {
        return INVALID_DATE.to_string();
    };
    let elapsed = (now - last_update).num_seconds().max(0);
    if elapsed < 60 {
        format!("{elapsed}s ago")
    } else if elapsed < 3600 {
        format!("{}m ago", elapsed / 60)
    } else if elapsed < 86400 {
        format!("{}h ago", elapsed / 3600)
    } else {
        format!("{}d ago", elapsed / 86400)
    }
}
