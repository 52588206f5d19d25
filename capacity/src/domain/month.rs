use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::ValidationError;

/// A calendar month, `month` in 1..=12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MonthYear {
    pub month: u8,
    pub year: i32,
}

impl MonthYear {
    pub fn new(month: u8, year: i32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(month.into()));
        }

        Ok(Self { month, year })
    }

    pub fn from_date(date: Date) -> Self {
        Self {
            month: date.month().into(),
            year: date.year(),
        }
    }

    /// The month containing today's date (UTC).
    pub fn current() -> Self {
        Self::from_date(OffsetDateTime::now_utc().date())
    }

    /// The following calendar month, rolling over into the next year.
    /// `None` past December of `i32::MAX`.
    pub fn next(self) -> Option<Self> {
        if self.month >= 12 {
            Some(Self {
                month: 1,
                year: self.year.checked_add(1)?,
            })
        } else {
            Some(Self {
                month: self.month + 1,
                year: self.year,
            })
        }
    }
}

impl std::fmt::Display for MonthYear {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Ordered sequence of months over which hours are aggregated.
///
/// Order is whatever the caller built; nothing in this crate sorts it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Window(Vec<MonthYear>);

impl Window {
    pub fn new(months: Vec<MonthYear>) -> Self {
        Self(months)
    }

    /// `len` consecutive months starting at `start`.
    pub fn rolling(start: MonthYear, len: usize) -> Result<Self, ValidationError> {
        let months: Vec<MonthYear> = std::iter::successors(Some(start), |m| m.next())
            .take(len)
            .collect();

        if months.len() < len {
            return Err(ValidationError::YearOutOfRange(start.year));
        }
        Ok(Self(months))
    }

    pub fn months(&self) -> &[MonthYear] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MonthYear> {
        self.0.iter()
    }

    pub fn contains(&self, month: &MonthYear) -> bool {
        self.0.contains(month)
    }

    pub fn position(&self, month: &MonthYear) -> Option<usize> {
        self.0.iter().position(|m| m == month)
    }
}

impl From<Vec<MonthYear>> for Window {
    fn from(months: Vec<MonthYear>) -> Self {
        Self(months)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::Month;

    fn my(month: u8, year: i32) -> MonthYear {
        MonthYear::new(month, year).unwrap()
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert_eq!(
            MonthYear::new(0, 2025).unwrap_err(),
            ValidationError::InvalidMonth(0)
        );
        assert!(MonthYear::new(13, 2025).is_err());
    }

    #[test]
    fn rolling_window_crosses_year_boundary() {
        let window = Window::rolling(my(11, 2025), 3).unwrap();
        assert_eq!(window.months(), &[my(11, 2025), my(12, 2025), my(1, 2026)]);
    }

    #[test]
    fn rolling_window_stops_at_the_last_year() {
        let last = my(12, i32::MAX);

        assert_eq!(last.next(), None);
        assert_eq!(Window::rolling(last, 1).unwrap().months(), &[last]);
        assert_eq!(
            Window::rolling(last, 2).unwrap_err(),
            ValidationError::YearOutOfRange(i32::MAX)
        );
        assert_eq!(
            Window::rolling(my(11, i32::MAX), 3).unwrap_err(),
            ValidationError::YearOutOfRange(i32::MAX)
        );
    }

    #[test]
    fn from_date_uses_calendar_month() {
        let date = Date::from_calendar_date(2025, Month::March, 14).unwrap();
        assert_eq!(MonthYear::from_date(date), my(3, 2025));
    }

    #[test]
    fn position_follows_caller_order() {
        let window = Window::new(vec![my(5, 2025), my(2, 2025)]);
        assert_eq!(window.position(&my(2, 2025)), Some(1));
        assert_eq!(window.position(&my(3, 2025)), None);
    }
}
