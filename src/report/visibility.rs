use serde::{Deserialize, Serialize};

use crate::errors::{ReportError, Result};

/// Which locations a caller may see.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    AllLocations,
    OnlyLocation(String),
}

impl Visibility {
    pub fn only(location: impl Into<String>) -> Self {
        Visibility::OnlyLocation(location.into())
    }

    pub fn allows(&self, location: &str) -> bool {
        match self {
            Visibility::AllLocations => true,
            Visibility::OnlyLocation(only) => only == location,
        }
    }

    /// Restricting to a location outside the configured set is a caller bug.
    pub fn validate(&self, known: &[String]) -> Result<()> {
        match self {
            Visibility::OnlyLocation(only) if !known.iter().any(|l| l == only) => {
                Err(ReportError::UnknownLocation(only.clone()))
            }
            _ => Ok(()),
        }
    }
}
