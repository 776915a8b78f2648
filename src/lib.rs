#![doc(test(attr(deny(warnings))))]

//! Revenue Core resolves reporting periods and aggregates per-location revenue
//! from a transaction log for dashboard display.

pub mod config;
pub mod dashboard;
pub mod errors;
pub mod period;
pub mod records;
pub mod report;
pub mod storage;
pub mod utils;

pub use dashboard::build_dashboard;
pub use errors::{ReportError, Result};
pub use period::resolve_period;
pub use report::aggregate;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Revenue Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
