use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    interval::{DateInterval, DISPLAY_FORMAT},
    selector::PeriodSelector,
};

/// ISO format produced by HTML date inputs.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Raw period inputs as they arrive from a query string. Empty strings count as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeriodRequest {
    #[serde(default)]
    pub selector: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl PeriodRequest {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: Some(selector.into()),
            ..Self::default()
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year.to_string());
        self
    }

    pub fn with_month(mut self, month: u32) -> Self {
        self.month = Some(month.to_string());
        self
    }

    pub fn with_range(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }
}

/// The interval actually used together with the selector, year, and month it was computed from.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct ResolvedPeriod {
    pub selector: PeriodSelector,
    pub year: i32,
    pub month: u32,
    pub interval: DateInterval,
}

impl ResolvedPeriod {
    pub fn start(&self) -> NaiveDate {
        self.interval.start()
    }

    pub fn end(&self) -> NaiveDate {
        self.interval.end()
    }
}

/// Turns a [`PeriodRequest`] into a validated [`ResolvedPeriod`].
#[derive(Debug, Clone)]
pub struct PeriodResolver {
    date_formats: Vec<String>,
}

impl Default for PeriodResolver {
    fn default() -> Self {
        Self {
            date_formats: vec![DISPLAY_FORMAT.to_string(), ISO_FORMAT.to_string()],
        }
    }
}

impl PeriodResolver {
    pub fn with_formats<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            date_formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        let raw = raw.trim();
        self.date_formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(raw, format).ok())
    }

    /// Resolves the request against `today`. Never fails: invalid input falls back to a month.
    pub fn resolve(&self, request: &PeriodRequest, today: NaiveDate) -> ResolvedPeriod {
        let raw_selector = present(&request.selector).unwrap_or("month");
        let Some(selector) = PeriodSelector::parse(raw_selector) else {
            debug!(selector = raw_selector, "unrecognized period selector, using current month");
            return current_month(today);
        };

        let year = present(&request.year)
            .and_then(|raw| raw.trim().parse::<i32>().ok())
            .filter(|year| DateInterval::year(*year).is_some())
            .unwrap_or_else(|| today.year());
        let month = present(&request.month)
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|month| (1..=12).contains(month))
            .unwrap_or_else(|| today.month());

        let bounds = match selector {
            PeriodSelector::Month => DateInterval::month(year, month).map(|i| (i.start(), i.end())),
            PeriodSelector::Year => DateInterval::year(year).map(|i| (i.start(), i.end())),
            PeriodSelector::Quarter(quarter) => {
                DateInterval::quarter(year, quarter).map(|i| (i.start(), i.end()))
            }
            PeriodSelector::Custom => {
                let start = present(&request.start).map_or(Some(today), |raw| self.parse_date(raw));
                let end = present(&request.end).map_or(Some(today), |raw| self.parse_date(raw));
                start.zip(end)
            }
        };

        // Single repair step: anything unparsable or inverted becomes the month interval.
        match bounds.and_then(|(start, end)| DateInterval::new(start, end).ok()) {
            Some(interval) => ResolvedPeriod {
                selector,
                year,
                month,
                interval,
            },
            None => {
                debug!(
                    selector = selector.as_str(),
                    start = ?request.start,
                    end = ?request.end,
                    "invalid period bounds, falling back to month"
                );
                month_period(year, month, today)
            }
        }
    }
}

/// Resolves a period with the default date formats.
pub fn resolve_period(request: &PeriodRequest, today: NaiveDate) -> ResolvedPeriod {
    PeriodResolver::default().resolve(request, today)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|raw| !raw.trim().is_empty())
}

fn month_period(year: i32, month: u32, today: NaiveDate) -> ResolvedPeriod {
    match DateInterval::month(year, month) {
        Some(interval) => ResolvedPeriod {
            selector: PeriodSelector::Month,
            year,
            month,
            interval,
        },
        None => current_month(today),
    }
}

fn current_month(today: NaiveDate) -> ResolvedPeriod {
    ResolvedPeriod {
        selector: PeriodSelector::Month,
        year: today.year(),
        month: today.month(),
        interval: DateInterval::month_of(today),
    }
}
