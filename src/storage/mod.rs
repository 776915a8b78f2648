pub mod json_backend;

use crate::{errors::Result, records::RawRecord};

/// Supplies a snapshot of the transaction log for one report.
pub trait RecordSource: Send + Sync {
    fn load(&self) -> Result<Vec<RawRecord>>;
}

impl RecordSource for Vec<RawRecord> {
    fn load(&self) -> Result<Vec<RawRecord>> {
        Ok(self.clone())
    }
}

pub use json_backend::JsonRecordFile;
