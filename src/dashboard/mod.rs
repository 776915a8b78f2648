//! Dashboard view model: the resolved period plus the aggregated report, ready for rendering.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::{
    config::ReportConfig,
    errors::Result,
    period::{PeriodRequest, PeriodResolver, PeriodSelector},
    records::RawRecord,
    report::{Aggregator, ReportPayload, Visibility},
    storage::RecordSource,
};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardView {
    /// Selector actually applied, after any fallback.
    pub filter: PeriodSelector,
    pub year: i32,
    pub month: u32,
    /// Interval bounds as `DD.MM.YYYY`.
    pub start: String,
    pub end: String,
    /// Years offered for selection.
    pub years: Vec<i32>,
    pub report: ReportPayload,
}

pub struct DashboardService;

impl DashboardService {
    /// Resolves the period and aggregates `records`. The monthly trend follows the effective year.
    pub fn build(
        config: &ReportConfig,
        request: &PeriodRequest,
        visibility: &Visibility,
        records: &[RawRecord],
        today: NaiveDate,
    ) -> Result<DashboardView> {
        let period = PeriodResolver::default().resolve(request, today);
        let report = Aggregator::new(config.locations.iter().cloned()).aggregate(
            &period.interval,
            visibility,
            records,
            period.year,
        )?;
        info!(
            filter = period.selector.as_str(),
            start = %period.start(),
            end = %period.end(),
            grand_total = report.grand_total,
            "built dashboard"
        );
        Ok(DashboardView {
            filter: period.selector,
            year: period.year,
            month: period.month,
            start: period.interval.start_label(),
            end: period.interval.end_label(),
            years: config.year_options.years(),
            report,
        })
    }

    /// Loads a fresh snapshot from `source` and builds the view from it.
    pub fn load_and_build(
        config: &ReportConfig,
        source: &dyn RecordSource,
        request: &PeriodRequest,
        visibility: &Visibility,
        today: NaiveDate,
    ) -> Result<DashboardView> {
        let records = source.load()?;
        Self::build(config, request, visibility, &records, today)
    }
}

/// Builds the dashboard view with the default resolver and an aggregator over `config.locations`.
pub fn build_dashboard(
    config: &ReportConfig,
    request: &PeriodRequest,
    visibility: &Visibility,
    records: &[RawRecord],
    today: NaiveDate,
) -> Result<DashboardView> {
    DashboardService::build(config, request, visibility, records, today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReportError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 25).unwrap()
    }

    #[test]
    fn fallback_is_reflected_in_view() {
        let config = ReportConfig::with_locations(["A"]);
        let request = PeriodRequest::new("custom")
            .with_year(2024)
            .with_month(3)
            .with_range("nope", "01.03.2024");
        let view =
            DashboardService::build(&config, &request, &Visibility::AllLocations, &[], today())
                .unwrap();
        assert_eq!(view.filter, PeriodSelector::Month);
        assert_eq!((view.start.as_str(), view.end.as_str()), ("01.03.2024", "31.03.2024"));
        assert_eq!(view.years.first(), Some(&2023));
        assert_eq!(view.years.last(), Some(&2030));
    }

    #[test]
    fn duplicated_locations_fail_instead_of_double_counting() {
        let config = ReportConfig::with_locations(["A", "A"]);
        let err = build_dashboard(
            &config,
            &PeriodRequest::new("month").with_year(2024).with_month(3),
            &Visibility::AllLocations,
            &[RawRecord::new("A", "15.03.2024", 100.0)],
            today(),
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn serializes_selector_as_external_name() {
        let config = ReportConfig::with_locations(["A"]);
        let view = build_dashboard(
            &config,
            &PeriodRequest::new("quartal2").with_year(2024),
            &Visibility::AllLocations,
            &[RawRecord::new("A", "02.04.2024", 12.5)],
            today(),
        )
        .unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["filter"], "quartal2");
        assert_eq!(json["report"]["grand_total"], 12.5);
        assert_eq!(json["report"]["monthly_totals"]["A"][3], 12.5);
    }

    #[test]
    fn load_and_build_reads_the_source() {
        let config = ReportConfig::with_locations(["A", "B"]);
        let source = vec![RawRecord::new("B", "10.03.2024", 4.0)];
        let view = DashboardService::load_and_build(
            &config,
            &source,
            &PeriodRequest::default(),
            &Visibility::only("B"),
            today(),
        )
        .unwrap();
        assert_eq!(view.report.locations().collect::<Vec<_>>(), vec!["B"]);
        assert_eq!(view.report.grand_total, 4.0);
    }
}
