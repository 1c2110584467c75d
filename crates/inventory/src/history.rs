use chrono::{DateTime, Duration, Utc};
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use siteerp_core::DomainError;

/// Look-back window for movement history, relative to the evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryWindow {
    Day,
    Week,
    Month,
}

impl HistoryWindow {
    pub fn days(self) -> i64 {
        match self {
            HistoryWindow::Day => 1,
            HistoryWindow::Week => 7,
            HistoryWindow::Month => 30,
        }
    }

    pub fn duration(self) -> Duration {
        Duration::days(self.days())
    }

    /// `now - window <= at <= now`, both ends inclusive.
    pub fn contains(self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        at <= now && now - at <= self.duration()
    }
}

impl FromStr for HistoryWindow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" | "1d" => Ok(HistoryWindow::Day),
            "week" | "7d" => Ok(HistoryWindow::Week),
            "month" | "30d" => Ok(HistoryWindow::Month),
            other => Err(DomainError::validation(format!(
                "history window must be one of: day, week, month (got {other:?})"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 17, 12, 0, 0).unwrap()
    }

    #[test]
    fn boundary_is_inclusive() {
        assert!(HistoryWindow::Week.contains(now(), now() - Duration::days(7)));
        assert!(HistoryWindow::Week.contains(now(), now()));
    }

    #[test]
    fn just_outside_is_excluded() {
        let at = now() - Duration::days(7) - Duration::seconds(1);
        assert!(!HistoryWindow::Week.contains(now(), at));
    }

    #[test]
    fn future_timestamps_are_excluded() {
        assert!(!HistoryWindow::Month.contains(now(), now() + Duration::seconds(1)));
    }

    #[test]
    fn parses_names_and_shorthands() {
        assert_eq!("7d".parse::<HistoryWindow>().unwrap(), HistoryWindow::Week);
        assert_eq!("Month".parse::<HistoryWindow>().unwrap(), HistoryWindow::Month);
        assert!("year".parse::<HistoryWindow>().is_err());
    }
}
