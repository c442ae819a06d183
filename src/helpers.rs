use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

const DATETIME_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";
const TIME_FORMAT: &str = "%-I:%M:%S %p";
const INVALID_DATE: &str = "Invalid Date";

/// Zone used when rendering timestamps for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayZone {
    #[default]
    Local,
    Utc,
}

impl DisplayZone {
    /// Renders an ISO-8601 timestamp as `M/D/YYYY, h:mm:ss AM` in this zone.
    pub fn datetime(self, raw: Option<&str>) -> String {
        let Some(utc) = raw.and_then(|s| self.parse(s.trim())) else {
            return INVALID_DATE.to_string();
        };
        match self {
            DisplayZone::Local => utc.with_timezone(&Local).format(DATETIME_FORMAT).to_string(),
            DisplayZone::Utc => utc.format(DATETIME_FORMAT).to_string(),
        }
    }

    pub fn time_of_day(self, at: DateTime<Utc>) -> String {
        match self {
            DisplayZone::Local => at.with_timezone(&Local).format(TIME_FORMAT).to_string(),
            DisplayZone::Utc => at.format(TIME_FORMAT).to_string(),
        }
    }

    fn parse(self, s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.to_utc());
        }

        // Date-only strings are UTC midnight; date-times without an offset
        // are wall-clock time in the display zone.
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|n| n.and_utc());
        }

        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
            .ok()?;

        match self {
            DisplayZone::Local => Local
                .from_local_datetime(&naive)
                .earliest()
                .map(|dt| dt.to_utc()),
            DisplayZone::Utc => Some(Utc.from_utc_datetime(&naive)),
        }
    }
}

/// Scales a ratio in `[0, 1]` to a percentage with one decimal digit.
/// Ties round up (`12.25` shows as `12.3`); `{:.1}` alone rounds them to even.
pub fn percent(ratio: f64) -> String {
    let scaled = ratio * 100.0;
    format!("{:.1}%", (scaled * 10.0).round() / 10.0)
}

/// Treats empty strings the way the dashboard always has: as missing.
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_one_decimal() {
        assert_eq!(percent(0.823), "82.3%");
        assert_eq!(percent(0.15), "15.0%");
        assert_eq!(percent(0.0), "0.0%");
        assert_eq!(percent(1.0), "100.0%");
    }

    #[test]
    fn test_percent_ties_round_up() {
        assert_eq!(percent(0.0025), "0.3%");
        assert_eq!(percent(0.1225), "12.3%");
        assert_eq!(percent(0.4625), "46.3%");
    }

    #[test]
    fn test_datetime_rfc3339() {
        assert_eq!(
            DisplayZone::Utc.datetime(Some("2024-01-15T10:00:00Z")),
            "1/15/2024, 10:00:00 AM"
        );
        assert_eq!(
            DisplayZone::Utc.datetime(Some("2024-01-15T23:30:05+02:00")),
            "1/15/2024, 9:30:05 PM"
        );
    }

    #[test]
    fn test_datetime_naive_isoformat() {
        assert_eq!(
            DisplayZone::Utc.datetime(Some("2024-03-02T14:07:09.123456")),
            "3/2/2024, 2:07:09 PM"
        );
    }

    #[test]
    fn test_datetime_date_only_is_utc_midnight() {
        assert_eq!(
            DisplayZone::Utc.datetime(Some("2024-01-15")),
            "1/15/2024, 12:00:00 AM"
        );
    }

    #[test]
    fn test_datetime_invalid_or_missing() {
        assert_eq!(DisplayZone::Utc.datetime(None), "Invalid Date");
        assert_eq!(DisplayZone::Utc.datetime(Some("yesterday")), "Invalid Date");
        assert_eq!(DisplayZone::Local.datetime(Some("")), "Invalid Date");
    }

    #[test]
    fn test_local_zone_renders_something() {
        let rendered = DisplayZone::Local.datetime(Some("2024-06-01T12:00:00Z"));
        assert!(rendered.contains("2024"));
        assert!(rendered.ends_with("AM") || rendered.ends_with("PM"));
    }

    #[test]
    fn test_time_of_day() {
        let at = Utc.with_ymd_and_hms(2024, 1, 15, 0, 5, 9).unwrap();
        assert_eq!(DisplayZone::Utc.time_of_day(at), "12:05:09 AM");
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("x")), Some("x"));
        assert_eq!(non_empty(Some("")), None);
        assert_eq!(non_empty(None), None);
    }
}
