use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::period::DISPLAY_FORMAT;

/// One row of the transaction log as the store hands it over.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawRecord {
    pub location: String,
    pub date: String,
    pub amount: f64,
}

impl RawRecord {
    pub fn new(location: impl Into<String>, date: impl Into<String>, amount: f64) -> Self {
        Self {
            location: location.into(),
            date: date.into(),
            amount,
        }
    }
}

/// A record whose date parsed successfully.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TransactionRecord {
    pub location: String,
    pub date: NaiveDate,
    /// Date text exactly as stored, used for display.
    pub raw_date: String,
    pub amount: f64,
}

impl TransactionRecord {
    pub fn parse(raw: &RawRecord) -> Option<Self> {
        let date = NaiveDate::parse_from_str(raw.date.trim(), DISPLAY_FORMAT).ok()?;
        Some(Self {
            location: raw.location.clone(),
            date,
            raw_date: raw.date.clone(),
            amount: raw.amount,
        })
    }
}

/// Records with parsed dates, in input order. Rows with malformed dates are dropped here
/// and nowhere else.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    records: Vec<TransactionRecord>,
    dropped: usize,
}

impl RecordSet {
    pub fn parse(raw: &[RawRecord]) -> Self {
        let mut records = Vec::with_capacity(raw.len());
        let mut dropped = 0;
        for row in raw {
            match TransactionRecord::parse(row) {
                Some(record) => records.push(record),
                None => {
                    debug!(location = %row.location, date = %row.date, "dropping record with malformed date");
                    dropped += 1;
                }
            }
        }
        if dropped > 0 {
            warn!(dropped, total = raw.len(), "ignored records with malformed dates");
        }
        Self { records, dropped }
    }

    pub fn records(&self) -> &[TransactionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of input rows rejected for an unparsable date.
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}
