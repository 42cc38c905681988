//! Decision-date normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use tracing::warn;

/// Normalize the raw decision-date string produced by extraction.
///
/// Absence is not an error. An unparseable value logs a warning and
/// degrades to `None`: a case record may legitimately carry every other
/// field with a null decision date.
pub fn normalize_decision_date(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match parse_timestamp(raw) {
        Some(ts) => Some(ts),
        None => {
            warn!(value = raw, "Could not parse decision date");
            None
        }
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&dt));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn absent_date_is_none() {
        assert!(normalize_decision_date(None).is_none());
        assert!(normalize_decision_date(Some("")).is_none());
        assert!(normalize_decision_date(Some("   ")).is_none());
    }

    #[test]
    fn plain_iso_date_becomes_midnight_utc() {
        let ts = normalize_decision_date(Some("2024-03-01")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2024-03-01T00:00:00+00:00");
    }

    #[test]
    fn rfc3339_round_trips_to_the_same_instant() {
        let ts = normalize_decision_date(Some("2024-01-30T12:30:00+02:00")).unwrap();
        assert_eq!(ts, "2024-01-30T10:30:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn naive_datetime_is_accepted() {
        let ts = normalize_decision_date(Some("2023-11-02T09:15:00")).unwrap();
        assert_eq!(ts.year(), 2023);
        assert_eq!(ts.day(), 2);
    }

    #[test]
    fn garbage_degrades_to_none_without_error() {
        assert!(normalize_decision_date(Some("not a date")).is_none());
        assert!(normalize_decision_date(Some("31/02/2024")).is_none());
        assert!(normalize_decision_date(Some("2024-13-45")).is_none());
    }
}
