//! Per-location revenue aggregation over a resolved interval.

pub mod aggregator;
pub mod payload;
pub mod visibility;

pub use aggregator::{aggregate, Aggregator};
pub use payload::{LastEntry, LocationTotal, ReportPayload, NO_DATA};
pub use visibility::Visibility;
