//! Reporting period selection: selectors, closed date intervals, and the resolver
//! that turns loose query input into a validated interval.

pub mod interval;
pub mod resolver;
pub mod selector;

pub use interval::{days_in_month, DateInterval, Quarter, DISPLAY_FORMAT};
pub use resolver::{resolve_period, PeriodRequest, PeriodResolver, ResolvedPeriod, ISO_FORMAT};
pub use selector::PeriodSelector;
