//! Target date selection.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Duration, Utc, Weekday};

use crate::error::CrewError;

/// Header date format, e.g. `Fri, Jan 05`.
pub const REPORT_DATE_FORMAT: &str = "%a, %b %d";

/// Which day the roster is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    /// The day of the input instant.
    Current,
    /// The next business day. Friday rolls to Monday; holidays are not considered.
    Next,
}

impl Timeframe {
    /// Configuration spelling, also used as the report label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Current => "Current",
            Self::Next => "Next",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = CrewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Current" => Ok(Self::Current),
            "Next" => Ok(Self::Next),
            other => Err(CrewError::InvalidTimeframe(other.to_string())),
        }
    }
}

/// Compute the instant the schedule is queried for.
#[must_use]
pub fn resolve_target_date(now: DateTime<Utc>, timeframe: Timeframe) -> DateTime<Utc> {
    match timeframe {
        Timeframe::Current => now,
        Timeframe::Next => {
            let days = if now.weekday() == Weekday::Fri { 3 } else { 1 };
            now + Duration::days(days)
        }
    }
}

/// Format a target date for report headers.
#[must_use]
pub fn format_report_date(date: DateTime<Utc>) -> String {
    date.format(REPORT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_current_is_unchanged() {
        // Thursday 2024-01-04
        let now = day(2024, 1, 4);
        assert_eq!(resolve_target_date(now, Timeframe::Current), now);
    }

    #[test]
    fn test_next_from_thursday_is_friday() {
        let next = resolve_target_date(day(2024, 1, 4), Timeframe::Next);
        assert_eq!(next, day(2024, 1, 5));
        assert_eq!(next.weekday(), Weekday::Fri);
    }

    #[test]
    fn test_next_from_friday_is_monday() {
        let next = resolve_target_date(day(2024, 1, 5), Timeframe::Next);
        assert_eq!(next, day(2024, 1, 8));
        assert_eq!(next.weekday(), Weekday::Mon);
    }

    #[test]
    fn test_next_from_saturday_adds_one_day() {
        let next = resolve_target_date(day(2024, 1, 6), Timeframe::Next);
        assert_eq!(next.weekday(), Weekday::Sun);
    }

    #[test]
    fn test_next_keeps_time_of_day() {
        let now = Utc.with_ymd_and_hms(2024, 1, 4, 23, 45, 12).unwrap();
        let next = resolve_target_date(now, Timeframe::Next);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 5, 23, 45, 12).unwrap());
    }

    #[test]
    fn test_parse_timeframe() {
        assert_eq!("Current".parse::<Timeframe>().unwrap(), Timeframe::Current);
        assert_eq!("Next".parse::<Timeframe>().unwrap(), Timeframe::Next);

        let err = "Tomorrow".parse::<Timeframe>().unwrap_err();
        assert!(matches!(err, CrewError::InvalidTimeframe(ref v) if v == "Tomorrow"));
        assert!("current".parse::<Timeframe>().is_err());
    }

    #[test]
    fn test_format_report_date() {
        assert_eq!(format_report_date(day(2024, 1, 5)), "Fri, Jan 05");
    }
}
