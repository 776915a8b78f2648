use std::collections::HashMap;

use super::record::{RecordSet, TransactionRecord};

/// Parsed records grouped by location in one pass. Input order is preserved per location.
#[derive(Debug, Default)]
pub struct LocationIndex<'a> {
    by_location: HashMap<&'a str, Vec<&'a TransactionRecord>>,
}

impl<'a> LocationIndex<'a> {
    pub fn build(set: &'a RecordSet) -> Self {
        let mut by_location: HashMap<&'a str, Vec<&'a TransactionRecord>> = HashMap::new();
        for record in set.records() {
            by_location
                .entry(record.location.as_str())
                .or_default()
                .push(record);
        }
        Self { by_location }
    }

    pub fn records_for(&self, location: &str) -> &[&'a TransactionRecord] {
        self.by_location
            .get(location)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
