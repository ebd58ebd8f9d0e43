use serde::Serialize;

use crate::frequency::FrequencyTable;
use crate::normalize::RegistrationTimestamp;
use crate::plural::pluralize;

/// Registration-time accumulators for one run: hour of day and weekday name.
#[derive(Debug, Clone, Default)]
pub struct RegistrationStats {
    pub hours: FrequencyTable<u32>,
    pub days: FrequencyTable<String>,
}

impl RegistrationStats {
    pub fn from_timestamps<I>(timestamps: I) -> Self
    where
        I: IntoIterator<Item = RegistrationTimestamp>,
    {
        timestamps
            .into_iter()
            .fold(Self::default(), |stats, ts| stats.record(&ts))
    }

    /// Folds one registration into both tables.
    pub fn record(self, ts: &RegistrationTimestamp) -> Self {
        Self {
            hours: self.hours.record(ts.hour()),
            days: self.days.record(ts.weekday_name()),
        }
    }

    pub fn merge(self, other: RegistrationStats) -> Self {
        Self {
            hours: self.hours.merge(other.hours),
            days: self.days.merge(other.days),
        }
    }

    /// Number of registrations recorded.
    pub fn observations(&self) -> usize {
        self.hours.total()
    }

    /// Peak hours and days, or `None` when nothing was recorded.
    pub fn summary(&self) -> Option<Summary> {
        if self.hours.is_empty() {
            return None;
        }
        Some(Summary {
            peak_hours: self.hours.peak_values(),
            peak_days: self.days.peak_values(),
        })
    }
}

/// Most frequent registration hour(s) and weekday(s).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub peak_hours: Vec<u32>,
    pub peak_days: Vec<String>,
}

impl Summary {
    pub fn hour_line(&self) -> String {
        let (suffix, joined) = pluralize(&self.peak_hours).unwrap_or_default();
        format!("Most people registered in the hour{suffix} of {joined}.")
    }

    pub fn day_line(&self) -> String {
        let (suffix, joined) = pluralize(&self.peak_days).unwrap_or_default();
        format!("Most people registered on the day{suffix} of {joined}.")
    }

    pub fn lines(&self) -> [String; 2] {
        [self.hour_line(), self.day_line()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::parse_registration_datetime;

    fn ts(raw: &str) -> RegistrationTimestamp {
        parse_registration_datetime(raw).unwrap()
    }

    #[test]
    fn test_empty_stats_have_no_summary() {
        let stats = RegistrationStats::default();
        assert_eq!(stats.observations(), 0);
        assert!(stats.summary().is_none());
    }

    #[test]
    fn test_single_peak_lines() {
        // 2024-03-04 is a Monday, 2024-03-05 a Tuesday
        let stats = RegistrationStats::from_timestamps([
            ts("3/4/24 9:15"),
            ts("3/4/24 9:45"),
            ts("3/5/24 10:00"),
        ]);

        let summary = stats.summary().unwrap();
        assert_eq!(summary.hour_line(), "Most people registered in the hour of 9.");
        assert_eq!(summary.day_line(), "Most people registered on the day of Monday.");
    }

    #[test]
    fn test_tied_peaks_are_listed() {
        let stats = RegistrationStats::from_timestamps([ts("3/4/24 9:15"), ts("3/5/24 10:00")]);

        let summary = stats.summary().unwrap();
        assert_eq!(summary.peak_hours, vec![9, 10]);
        assert_eq!(
            summary.hour_line(),
            "Most people registered in the hours of 9, 10."
        );
        assert_eq!(
            summary.day_line(),
            "Most people registered on the days of Monday, Tuesday."
        );
    }

    #[test]
    fn test_merge_matches_single_fold() {
        let all = [ts("3/4/24 9:15"), ts("3/5/24 10:00"), ts("3/5/24 10:30")];
        let whole = RegistrationStats::from_timestamps(all);
        let merged = RegistrationStats::from_timestamps(all[..1].iter().copied())
            .merge(RegistrationStats::from_timestamps(all[1..].iter().copied()));

        assert_eq!(merged.observations(), 3);
        assert_eq!(merged.summary(), whole.summary());
    }
}
