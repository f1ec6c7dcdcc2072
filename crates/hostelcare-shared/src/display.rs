//! Small text helpers for front-ends.

use chrono::{DateTime, Utc};

/// `28 Nov 2025`
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Relative time for recent dates, falling back to [`format_date`] after a
/// week.
pub fn format_time_ago(date: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = (now - date).num_seconds();
    if secs < 60 {
        return "Just now".to_string();
    }

    let minutes = secs / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 7 {
        return plural(days, "day");
    }

    format_date(date)
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{n} {unit}s ago")
    }
}

/// Cut `s` to `max_len` characters, appending `...` when shortened.
pub fn truncate_text(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max_len).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn base() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 28, 12, 0, 0).unwrap()
    }

    #[test]
    fn date_format() {
        assert_eq!(format_date(base()), "28 Nov 2025");
        let early = Utc.with_ymd_and_hms(2025, 3, 4, 0, 0, 0).unwrap();
        assert_eq!(format_date(early), "4 Mar 2025");
    }

    #[test]
    fn time_ago_buckets() {
        let now = base();
        assert_eq!(format_time_ago(now - Duration::seconds(30), now), "Just now");
        assert_eq!(format_time_ago(now - Duration::minutes(1), now), "1 minute ago");
        assert_eq!(format_time_ago(now - Duration::minutes(5), now), "5 minutes ago");
        assert_eq!(format_time_ago(now - Duration::hours(1), now), "1 hour ago");
        assert_eq!(format_time_ago(now - Duration::days(3), now), "3 days ago");
        assert_eq!(
            format_time_ago(now - Duration::days(10), now),
            "18 Nov 2025"
        );
    }

    #[test]
    fn truncation() {
        assert_eq!(truncate_text("This is a long text", 10), "This is a ...");
        assert_eq!(truncate_text("short", 10), "short");
    }
}
