//! The seven-day scheduling strip.

use chrono::{Datelike, Duration, NaiveDate};

/// Days shown on the schedule screen.
pub const WEEK_LEN: usize = 7;

/// One selectable day: its date and whether a puzzle is already published.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBlob {
    pub date: NaiveDate,
    pub done: bool,
}

impl DayBlob {
    /// `YYYY-MM-DD`, the identity used on the upload wire.
    pub fn id(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Uppercase three-letter weekday label.
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string().to_uppercase()
    }

    /// Day-of-month label.
    pub fn day_label(&self) -> String {
        format!("{}", self.date.day())
    }

    /// Uppercase three-letter month label.
    pub fn month_label(&self) -> String {
        self.date.format("%b").to_string().to_uppercase()
    }
}

/// The week starting from a given day (usually today).
#[derive(Debug, Clone)]
pub struct WeekStrip {
    days: Vec<DayBlob>,
}

impl WeekStrip {
    pub fn starting(start: NaiveDate) -> Self {
        let days = (0..WEEK_LEN as i64)
            .map(|i| DayBlob {
                date: start + Duration::days(i),
                done: false,
            })
            .collect();
        Self { days }
    }

    pub fn days(&self) -> &[DayBlob] {
        &self.days
    }

    pub fn start(&self) -> NaiveDate {
        self.days[0].date
    }

    pub fn get(&self, index: usize) -> Option<&DayBlob> {
        self.days.get(index)
    }

    /// Mark the given dates as already published; dates outside the strip
    /// are ignored.
    pub fn mark_done(&mut self, dates: &[NaiveDate]) {
        for day in &mut self.days {
            day.done = dates.contains(&day.date);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 3).unwrap()
    }

    #[test]
    fn test_week_has_seven_consecutive_days() {
        let strip = WeekStrip::starting(monday());
        assert_eq!(strip.days().len(), WEEK_LEN);
        assert_eq!(strip.start(), monday());
        for (i, day) in strip.days().iter().enumerate() {
            assert_eq!(day.date, monday() + Duration::days(i as i64));
            assert!(!day.done);
        }
    }

    #[test]
    fn test_day_labels() {
        let strip = WeekStrip::starting(monday());
        let first = strip.get(0).unwrap();
        assert_eq!(first.id(), "2025-11-03");
        assert_eq!(first.weekday_label(), "MON");
        assert_eq!(first.day_label(), "3");
        assert_eq!(first.month_label(), "NOV");
    }

    #[test]
    fn test_mark_done() {
        let mut strip = WeekStrip::starting(monday());
        let published = vec![
            monday() + Duration::days(1),
            monday() + Duration::days(4),
            // A date outside the strip is ignored
            monday() + Duration::days(30),
        ];
        strip.mark_done(&published);

        let done: Vec<bool> = strip.days().iter().map(|d| d.done).collect();
        assert_eq!(done, vec![false, true, false, false, true, false, false]);
    }

    #[test]
    fn test_mark_done_replaces_previous_marks() {
        let mut strip = WeekStrip::starting(monday());
        strip.mark_done(&[monday()]);
        strip.mark_done(&[monday() + Duration::days(2)]);

        assert!(!strip.get(0).unwrap().done);
        assert!(strip.get(2).unwrap().done);
    }

    #[test]
    fn test_week_spanning_month_end() {
        let strip = WeekStrip::starting(NaiveDate::from_ymd_opt(2025, 11, 28).unwrap());
        let last = strip.get(6).unwrap();
        assert_eq!(last.id(), "2025-12-04");
        assert_eq!(last.month_label(), "DEC");
    }
}
