use chrono::{DateTime, SecondsFormat, Utc};

/// RFC 3339 with millisecond precision and a `Z` suffix.
pub(crate) fn iso(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn now_iso() -> String {
    iso(Utc::now())
}

/// `now` minus a number of minutes, formatted.
pub(crate) fn minutes_ago(now: DateTime<Utc>, minutes: i64) -> String {
    iso(now - chrono::Duration::minutes(minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn iso_uses_millis_and_z() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 8, 30, 0).unwrap();
        assert_eq!(iso(ts), "2024-01-15T08:30:00.000Z");
        assert_eq!(minutes_ago(ts, 30), "2024-01-15T08:00:00.000Z");
    }
}
