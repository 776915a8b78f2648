//! Transaction log rows, date parsing, and per-location grouping.

pub mod index;
pub mod record;

pub use index::LocationIndex;
pub use record::{RawRecord, RecordSet, TransactionRecord};
