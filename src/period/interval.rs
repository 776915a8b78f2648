use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, Result};

/// Display and record date format (`DD.MM.YYYY`).
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn from_index(index: u32) -> Option<Self> {
        match index {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    pub fn first_month(self) -> u32 {
        (self.index() - 1) * 3 + 1
    }

    pub fn last_month(self) -> u32 {
        self.index() * 3
    }
}

/// A closed calendar interval; `start <= end` always holds.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
pub struct DateInterval {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if end < start {
            return Err(ReportError::InvalidInterval(format!(
                "end {} is before start {}",
                end, start
            )));
        }
        Ok(Self { start, end })
    }

    /// First to last calendar day of `month` in `year`.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?)?;
        Some(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Self {
        let start = date - Duration::days(date.day0() as i64);
        let end = start
            .checked_add_signed(Duration::days(31))
            .map(|next| next - Duration::days(next.day() as i64))
            .unwrap_or(NaiveDate::MAX);
        Self { start, end }
    }

    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    pub fn quarter(year: i32, quarter: Quarter) -> Option<Self> {
        let first = Self::month(year, quarter.first_month())?;
        let last = Self::month(year, quarter.last_month())?;
        Some(Self {
            start: first.start,
            end: last.end,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    pub fn start_label(&self) -> String {
        self.start.format(DISPLAY_FORMAT).to_string()
    }

    pub fn end_label(&self) -> String {
        self.end.format(DISPLAY_FORMAT).to_string()
    }
}

/// Number of days in `month` of `year`, accounting for leap years.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    if month == 12 {
        return NaiveDate::from_ymd_opt(year, 12, 31).map(|_| 31);
    }
    let first_next = NaiveDate::from_ymd_opt(year, month + 1, 1)?;
    Some((first_next - Duration::days(1)).day())
}
