use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{errors::Result, records::RawRecord};

use super::RecordSource;

/// Transaction log stored as a JSON array of `{location, date, amount}` rows.
#[derive(Debug, Clone)]
pub struct JsonRecordFile {
    path: PathBuf,
}

impl JsonRecordFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes rows atomically by staging to a temporary file.
    pub fn save(&self, records: &[RawRecord]) -> Result<()> {
        let tmp = self.path.with_extension("tmp");
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&tmp, json)?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

impl RecordSource for JsonRecordFile {
    fn load(&self) -> Result<Vec<RawRecord>> {
        let data = fs::read_to_string(&self.path)?;
        let rows: Vec<RawRecord> = serde_json::from_str(&data)?;
        debug!(path = %self.path.display(), rows = rows.len(), "loaded transaction log");
        Ok(rows)
    }
}
