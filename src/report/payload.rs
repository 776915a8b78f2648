use std::collections::BTreeMap;

use serde::Serialize;

/// Date shown for a location that has no records at all.
pub const NO_DATA: &str = "-";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LocationTotal {
    pub location: String,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LastEntry {
    pub location: String,
    /// Stored date text of the latest record, or [`NO_DATA`].
    pub date: String,
    pub amount: f64,
}

impl LastEntry {
    pub fn empty(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            date: NO_DATA.to_string(),
            amount: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ReportPayload {
    pub per_location_totals: Vec<LocationTotal>,
    pub grand_total: f64,
    pub last_entries: Vec<LastEntry>,
    /// Twelve monthly totals (January first) per visible location.
    pub monthly_totals: BTreeMap<String, [f64; 12]>,
}

impl ReportPayload {
    pub fn total_for(&self, location: &str) -> Option<f64> {
        self.per_location_totals
            .iter()
            .find(|row| row.location == location)
            .map(|row| row.total)
    }

    pub fn last_entry_for(&self, location: &str) -> Option<&LastEntry> {
        self.last_entries.iter().find(|row| row.location == location)
    }

    pub fn monthly_for(&self, location: &str) -> Option<&[f64; 12]> {
        self.monthly_totals.get(location)
    }

    pub fn locations(&self) -> impl Iterator<Item = &str> {
        self.per_location_totals.iter().map(|row| row.location.as_str())
    }
}
