use std::fmt;

use serde::{Serialize, Serializer};

use super::interval::Quarter;

/// Reporting period kind chosen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PeriodSelector {
    #[default]
    Month,
    Year,
    Quarter(Quarter),
    Custom,
}

impl PeriodSelector {
    /// Every selector in the order a selection UI lists them.
    pub const ALL: [PeriodSelector; 7] = [
        PeriodSelector::Month,
        PeriodSelector::Year,
        PeriodSelector::Quarter(Quarter::Q1),
        PeriodSelector::Quarter(Quarter::Q2),
        PeriodSelector::Quarter(Quarter::Q3),
        PeriodSelector::Quarter(Quarter::Q4),
        PeriodSelector::Custom,
    ];

    /// Parses the external selector vocabulary. Returns `None` for anything unrecognized.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_ascii_lowercase();
        let selector = match normalized.as_str() {
            "month" | "monat" => PeriodSelector::Month,
            "jahres" | "year" => PeriodSelector::Year,
            "custom" => PeriodSelector::Custom,
            other => {
                let index = other
                    .strip_prefix("quartal")
                    .or_else(|| other.strip_prefix("quarter"))?;
                let quarter = index.parse::<u32>().ok().and_then(Quarter::from_index)?;
                PeriodSelector::Quarter(quarter)
            }
        };
        Some(selector)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodSelector::Month => "month",
            PeriodSelector::Year => "jahres",
            PeriodSelector::Quarter(Quarter::Q1) => "quartal1",
            PeriodSelector::Quarter(Quarter::Q2) => "quartal2",
            PeriodSelector::Quarter(Quarter::Q3) => "quartal3",
            PeriodSelector::Quarter(Quarter::Q4) => "quartal4",
            PeriodSelector::Custom => "custom",
        }
    }
}

impl fmt::Display for PeriodSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PeriodSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
