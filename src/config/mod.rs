use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::{info, warn};

use crate::errors::{ReportError, Result};

const DEFAULT_DIR_NAME: &str = ".revenue_core";
const CONFIG_FILE: &str = "config.json";
const HOME_ENV: &str = "REVENUE_CORE_HOME";
const TMP_SUFFIX: &str = "tmp";

/// Inclusive span of years offered by selection UIs. Display only; aggregation accepts any year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct YearRange {
    pub first: i32,
    pub last: i32,
}

impl Default for YearRange {
    fn default() -> Self {
        Self {
            first: 2023,
            last: 2030,
        }
    }
}

impl YearRange {
    pub fn years(&self) -> Vec<i32> {
        (self.first..=self.last).collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportConfig {
    /// Known locations in display order.
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub year_options: YearRange,
    /// JSON file holding the transaction log, relative to the config directory when not absolute.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub records_file: Option<PathBuf>,
}

impl ReportConfig {
    pub fn with_locations<I, S>(locations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_locations(&self.locations)?;
        if self.year_options.first > self.year_options.last {
            return Err(ReportError::Config(format!(
                "year range {}..{} is inverted",
                self.year_options.first, self.year_options.last
            )));
        }
        Ok(())
    }
}

/// Locations form a set: names must be non-empty and unique.
pub fn validate_locations(locations: &[String]) -> Result<()> {
    let mut seen = HashSet::new();
    for location in locations {
        if location.trim().is_empty() {
            return Err(ReportError::Config("location names must not be empty".into()));
        }
        if !seen.insert(location.as_str()) {
            return Err(ReportError::Config(format!(
                "location `{}` is listed twice",
                location
            )));
        }
    }
    Ok(())
}

/// Loads and saves [`ReportConfig`] under the application directory.
pub struct ConfigManager {
    base: PathBuf,
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `$REVENUE_CORE_HOME`, falling back to `~/.revenue_core`.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: base.join(CONFIG_FILE),
            base,
        })
    }

    /// Reads a config from an explicit file instead of the application directory.
    pub fn load_from(path: &Path) -> Result<ReportConfig> {
        let data = fs::read_to_string(path)?;
        let config: ReportConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(&self) -> Result<ReportConfig> {
        if self.path.exists() {
            let config = Self::load_from(&self.path)?;
            info!(path = %self.path.display(), locations = config.locations.len(), "loaded configuration");
            Ok(config)
        } else {
            warn!(path = %self.path.display(), "no configuration found, using defaults");
            Ok(ReportConfig::default())
        }
    }

    pub fn save(&self, config: &ReportConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Resolves the configured records file against the base directory.
    pub fn records_path(&self, config: &ReportConfig) -> Option<PathBuf> {
        config.records_file.as_ref().map(|file| {
            if file.is_absolute() {
                file.clone()
            } else {
                self.base.join(file)
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Application data directory, overridable through `REVENUE_CORE_HOME`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
