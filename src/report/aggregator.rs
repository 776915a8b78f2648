use chrono::Datelike;
use tracing::{debug, instrument};

use crate::{
    config::validate_locations,
    errors::Result,
    period::DateInterval,
    records::{LocationIndex, RawRecord, RecordSet, TransactionRecord},
    utils::round2,
};

use super::{
    payload::{LastEntry, LocationTotal, ReportPayload},
    visibility::Visibility,
};

/// Computes period totals, last entries, and monthly trends for a fixed location list.
#[derive(Debug, Clone)]
pub struct Aggregator {
    locations: Vec<String>,
}

impl Aggregator {
    pub fn new<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
        }
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Parses `records` once and aggregates them. See [`Aggregator::aggregate_parsed`].
    pub fn aggregate(
        &self,
        interval: &DateInterval,
        visibility: &Visibility,
        records: &[RawRecord],
        trend_year: i32,
    ) -> Result<ReportPayload> {
        let set = RecordSet::parse(records);
        self.aggregate_parsed(interval, visibility, &set, trend_year)
    }

    /// Aggregates already parsed records. Fails only on a malformed location list or
    /// when `visibility` names an unknown location.
    #[instrument(level = "debug", skip(self, set), fields(records = set.len()))]
    pub fn aggregate_parsed(
        &self,
        interval: &DateInterval,
        visibility: &Visibility,
        set: &RecordSet,
        trend_year: i32,
    ) -> Result<ReportPayload> {
        validate_locations(&self.locations)?;
        visibility.validate(&self.locations)?;
        let index = LocationIndex::build(set);
        let trend_window = DateInterval::year(trend_year);

        let mut payload = ReportPayload::default();
        for location in self.locations.iter().filter(|l| visibility.allows(l)) {
            let records = index.records_for(location);

            payload.per_location_totals.push(LocationTotal {
                location: location.clone(),
                total: period_total(records, interval),
            });
            payload
                .last_entries
                .push(last_entry(location, records).unwrap_or_else(|| LastEntry::empty(location)));
            payload.monthly_totals.insert(
                location.clone(),
                trend_window
                    .map(|window| monthly_totals(records, &window))
                    .unwrap_or([0.0; 12]),
            );
        }

        payload.grand_total = round2(payload.per_location_totals.iter().map(|row| row.total).sum());
        debug!(
            locations = payload.per_location_totals.len(),
            grand_total = payload.grand_total,
            "aggregated report"
        );
        Ok(payload)
    }
}

/// Aggregates `records` for the given interval and visibility.
pub fn aggregate(
    interval: &DateInterval,
    locations: &[String],
    visibility: &Visibility,
    records: &[RawRecord],
    trend_year: i32,
) -> Result<ReportPayload> {
    Aggregator::new(locations.iter().cloned()).aggregate(interval, visibility, records, trend_year)
}

fn period_total(records: &[&TransactionRecord], interval: &DateInterval) -> f64 {
    round2(
        records
            .iter()
            .filter(|r| interval.contains(r.date))
            .map(|r| r.amount)
            .sum(),
    )
}

/// Latest record over the whole history; on equal dates the later input row wins.
fn last_entry(location: &str, records: &[&TransactionRecord]) -> Option<LastEntry> {
    let latest = records
        .iter()
        .copied()
        .fold(None::<&TransactionRecord>, |best, record| match best {
            Some(best) if record.date < best.date => Some(best),
            _ => Some(record),
        })?;
    Some(LastEntry {
        location: location.to_string(),
        date: latest.raw_date.clone(),
        amount: latest.amount,
    })
}

fn monthly_totals(records: &[&TransactionRecord], year: &DateInterval) -> [f64; 12] {
    let mut months = [0.0; 12];
    for record in records.iter().filter(|r| year.contains(r.date)) {
        months[record.date.month0() as usize] += record.amount;
    }
    months.map(round2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReportError;

    fn locations() -> Vec<String> {
        vec!["A".into(), "B".into()]
    }

    fn march_2024() -> DateInterval {
        DateInterval::month(2024, 3).unwrap()
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            RawRecord::new("A", "15.03.2024", 100.0),
            RawRecord::new("A", "20.03.2024", 50.0),
            RawRecord::new("B", "01.01.2024", 10.0),
        ]
    }

    #[test]
    fn totals_cover_the_closed_interval() {
        let records = vec![
            RawRecord::new("A", "01.03.2024", 1.0),
            RawRecord::new("A", "31.03.2024", 2.0),
            RawRecord::new("A", "29.02.2024", 4.0),
            RawRecord::new("A", "01.04.2024", 8.0),
        ];
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2024)
                .unwrap();
        assert_eq!(payload.total_for("A"), Some(3.0));
        assert_eq!(payload.total_for("B"), Some(0.0));
    }

    #[test]
    fn last_entry_scans_full_history() {
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &sample(), 2024)
                .unwrap();
        let b = payload.last_entry_for("B").unwrap();
        assert_eq!((b.date.as_str(), b.amount), ("01.01.2024", 10.0));
    }

    #[test]
    fn last_entry_tie_prefers_later_row() {
        let records = vec![
            RawRecord::new("A", "05.05.2024", 1.0),
            RawRecord::new("A", "05.05.2024", 2.0),
            RawRecord::new("A", "01.05.2024", 3.0),
        ];
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2024)
                .unwrap();
        assert_eq!(payload.last_entry_for("A").unwrap().amount, 2.0);
    }

    #[test]
    fn missing_location_gets_sentinel() {
        let records = vec![RawRecord::new("A", "05.05.2024", 1.0)];
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2024)
                .unwrap();
        let b = payload.last_entry_for("B").unwrap();
        assert_eq!((b.date.as_str(), b.amount), ("-", 0.0));
        assert_eq!(payload.monthly_for("B"), Some(&[0.0; 12]));
    }

    #[test]
    fn monthly_trend_ignores_other_years_and_leap_day_counts() {
        let records = vec![
            RawRecord::new("A", "29.02.2024", 7.5),
            RawRecord::new("A", "01.02.2024", 2.5),
            RawRecord::new("A", "31.12.2024", 1.0),
            RawRecord::new("A", "01.01.2025", 100.0),
            RawRecord::new("A", "31.12.2023", 100.0),
        ];
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2024)
                .unwrap();
        let months = payload.monthly_for("A").unwrap();
        assert_eq!(months[1], 10.0);
        assert_eq!(months[11], 1.0);
        assert_eq!(months.iter().sum::<f64>(), 11.0);
    }

    #[test]
    fn trend_year_is_independent_of_interval() {
        let records = vec![RawRecord::new("A", "10.06.2023", 40.0)];
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2023)
                .unwrap();
        assert_eq!(payload.total_for("A"), Some(0.0));
        assert_eq!(payload.monthly_for("A").unwrap()[5], 40.0);
    }

    #[test]
    fn totals_are_rounded_to_cents() {
        let records = vec![
            RawRecord::new("A", "01.03.2024", 0.1),
            RawRecord::new("A", "02.03.2024", 0.2),
            RawRecord::new("B", "03.03.2024", 1.005),
        ];
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2024)
                .unwrap();
        assert_eq!(payload.total_for("A"), Some(0.3));
        let sum: f64 = payload.per_location_totals.iter().map(|r| r.total).sum();
        assert_eq!(payload.grand_total, round2(sum));
    }

    #[test]
    fn duplicate_locations_are_rejected() {
        let records = vec![RawRecord::new("A", "15.03.2024", 100.0)];
        let duplicated = vec!["A".to_string(), "A".to_string()];
        let err = aggregate(&march_2024(), &duplicated, &Visibility::AllLocations, &records, 2024)
            .unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));

        let blank = vec!["A".to_string(), String::new()];
        let err = aggregate(&march_2024(), &blank, &Visibility::AllLocations, &records, 2024)
            .unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
    }

    #[test]
    fn unknown_visibility_fails_loudly() {
        let err = aggregate(
            &march_2024(),
            &locations(),
            &Visibility::only("Nowhere"),
            &sample(),
            2024,
        )
        .unwrap_err();
        assert!(matches!(err, ReportError::UnknownLocation(_)));
    }

    #[test]
    fn records_for_unconfigured_locations_are_ignored() {
        let mut records = sample();
        records.push(RawRecord::new("C", "10.03.2024", 999.0));
        let payload =
            aggregate(&march_2024(), &locations(), &Visibility::AllLocations, &records, 2024)
                .unwrap();
        assert_eq!(payload.grand_total, 150.0);
        assert!(payload.monthly_for("C").is_none());
    }
}
