//! Human-readable renderings for timestamps and folder paths.

use crate::identity::parse_timestamp;
use chrono::{DateTime, TimeDelta, Utc};

/// Relative age of a wire timestamp as seen from `now`.
///
/// Unparseable input is returned as-is.
pub fn format_modified(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(at) = parse_timestamp(timestamp) else {
        return timestamp.to_string();
    };

    let age = now.signed_duration_since(at);
    if age < TimeDelta::hours(1) {
        return "Just now".to_string();
    }
    if age < TimeDelta::days(7) {
        let formatter = timeago::Formatter::new();
        return formatter.convert(age.to_std().unwrap_or_default());
    }
    at.format("%Y-%m-%d").to_string()
}

/// Breadcrumb for a folder path; the root is `Home`.
pub fn format_path<S: AsRef<str>>(names: &[S]) -> String {
    let parts: Vec<&str> = names
        .iter()
        .map(|s| s.as_ref())
        .filter(|s| !s.is_empty())
        .collect();
    if parts.is_empty() {
        return "Home".to_string();
    }
    parts.join(" > ")
}
