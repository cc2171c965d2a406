use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::model::parse_weekday;
use crate::error::ExploreError;
use crate::input::title_case;

/// Environment variable naming an optional JSON configuration file.
pub const CONFIG_ENV: &str = "BIKESHARE_CONFIG";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "BIKESHARE_DATA_DIR";

// ---------------------------------------------------------------------------
// City sources
// ---------------------------------------------------------------------------

/// One selectable city and the file holding its trips.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CitySource {
    pub name: String,
    pub file: PathBuf,
}

impl CitySource {
    fn new(name: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            file: PathBuf::from(file),
        }
    }
}

// ---------------------------------------------------------------------------
// ExplorerConfig
// ---------------------------------------------------------------------------

/// Everything the prompts, loader and browser need to know about the
/// available datasets. Defaults reproduce the three US bikeshare files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Directory the city files are resolved against.
    pub data_dir: PathBuf,
    /// Selectable cities, in prompt order.
    pub cities: Vec<CitySource>,
    /// Month names; a month's filter number is its 1-based position.
    pub months: Vec<String>,
    /// Weekday names offered at the day prompt.
    pub days: Vec<String>,
    /// Rows per raw-data page.
    pub page_size: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            cities: vec![
                CitySource::new("Chicago", "chicago.csv"),
                CitySource::new("New York City", "new_york_city.csv"),
                CitySource::new("Washington", "washington.csv"),
            ],
            months: ["January", "February", "March", "April", "May", "June"]
                .map(String::from)
                .to_vec(),
            days: [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ]
            .map(String::from)
            .to_vec(),
            page_size: 5,
        }
    }
}

impl ExplorerConfig {
    /// Build the configuration from the process environment.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
        Self::load_from(config_path.as_deref(), data_dir)
    }

    /// Read an optional JSON file, apply an optional data directory override
    /// and validate the result.
    pub fn load_from(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config {}", path.display()))?;
                log::info!("Using configuration from {}", path.display());
                Self::from_json(&text)
                    .with_context(|| format!("parsing config {}", path.display()))?
            }
            None => Self::default(),
        };
        if let Some(dir) = data_dir {
            config.data_dir = dir;
        }
        config.validate()?;
        log::debug!(
            "Data directory {}, {} cities, page size {}",
            config.data_dir.display(),
            config.cities.len(),
            config.page_size
        );
        Ok(config)
    }

    /// Parse a JSON document; absent fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn validate(&self) -> Result<(), ExploreError> {
        if self.cities.is_empty() {
            return Err(ExploreError::Config("no cities configured".into()));
        }
        if self.months.is_empty() || self.months.len() > 12 {
            return Err(ExploreError::Config(format!(
                "expected 1 to 12 months, got {}",
                self.months.len()
            )));
        }
        // Prompt answers come back title-cased, so names must already be.
        for name in self.cities.iter().map(|c| &c.name).chain(&self.months) {
            if title_case(name) != *name {
                return Err(ExploreError::Config(format!(
                    "'{name}' must be title-cased as '{}'",
                    title_case(name)
                )));
            }
        }
        if self.page_size == 0 {
            return Err(ExploreError::Config("page_size must be positive".into()));
        }
        for day in &self.days {
            parse_weekday(day).ok_or_else(|| ExploreError::UnknownDay(day.clone()))?;
        }
        Ok(())
    }

    pub fn city_names(&self) -> Vec<String> {
        self.cities.iter().map(|c| c.name.clone()).collect()
    }

    /// Full path of a city's source file.
    pub fn city_path(&self, city: &str) -> Result<PathBuf, ExploreError> {
        self.cities
            .iter()
            .find(|c| c.name == city)
            .map(|c| self.data_dir.join(&c.file))
            .ok_or_else(|| ExploreError::UnknownCity(city.to_string()))
    }

    /// 1-based calendar number of a configured month.
    pub fn month_number(&self, month: &str) -> Option<u32> {
        self.months
            .iter()
            .position(|m| m == month)
            .map(|i| i as u32 + 1)
    }

    /// Display name for a calendar month number, preferring the configured
    /// list and falling back to the English month name.
    pub fn month_name(&self, number: u32) -> String {
        let configured = (number as usize)
            .checked_sub(1)
            .and_then(|i| self.months.get(i));
        match configured {
            Some(name) => name.clone(),
            None => u8::try_from(number)
                .ok()
                .and_then(|n| chrono::Month::try_from(n).ok())
                .map(|m| m.name().to_string())
                .unwrap_or_else(|| number.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_bikeshare_files() {
        let config = ExplorerConfig::default();
        assert_eq!(
            config.city_names(),
            vec!["Chicago", "New York City", "Washington"]
        );
        assert_eq!(
            config.city_path("New York City").unwrap(),
            PathBuf::from("./new_york_city.csv")
        );
        assert_eq!(config.months.len(), 6);
        assert_eq!(config.days.len(), 7);
        assert_eq!(config.page_size, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_city_is_an_error() {
        let config = ExplorerConfig::default();
        assert!(matches!(
            config.city_path("chicago"),
            Err(ExploreError::UnknownCity(_))
        ));
    }

    #[test]
    fn test_month_number_is_one_based_position() {
        let config = ExplorerConfig::default();
        assert_eq!(config.month_number("January"), Some(1));
        assert_eq!(config.month_number("June"), Some(6));
        assert_eq!(config.month_number("July"), None);
    }

    #[test]
    fn test_month_name_falls_back_to_calendar() {
        let config = ExplorerConfig::default();
        assert_eq!(config.month_name(3), "March");
        assert_eq!(config.month_name(7), "July");
        assert_eq!(config.month_name(0), "0");
        assert_eq!(config.month_name(13), "13");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ExplorerConfig::from_json(
            r#"{ "cities": [{ "name": "Boston", "file": "boston.parquet" }], "page_size": 10 }"#,
        )
        .unwrap();
        assert_eq!(config.city_names(), vec!["Boston"]);
        assert_eq!(config.page_size, 10);
        assert_eq!(config.months, ExplorerConfig::default().months);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ExplorerConfig::default();
        config.page_size = 0;
        assert!(config.validate().is_err());

        let mut config = ExplorerConfig::default();
        config.days.push("Caturday".to_string());
        assert!(matches!(
            config.validate(),
            Err(ExploreError::UnknownDay(d)) if d == "Caturday"
        ));

        let mut config = ExplorerConfig::default();
        config.cities.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_names_that_are_not_title_cased() {
        let config = ExplorerConfig::from_json(r#"{ "months": ["january", "february"] }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ExploreError::Config(msg)) if msg.contains("'january'")
        ));

        let config = ExplorerConfig::from_json(
            r#"{ "cities": [{ "name": "new york city", "file": "nyc.csv" }] }"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = ExplorerConfig::from_json(r#"{ "months": ["March", "April"] }"#).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_rejects_lowercase_months() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.json");
        std::fs::write(&path, r#"{ "months": ["january", "february"] }"#).unwrap();
        assert!(ExplorerConfig::load_from(Some(&path), None).is_err());
    }

    #[test]
    fn test_load_from_file_with_data_dir_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.json");
        std::fs::write(&path, r#"{ "data_dir": "/srv/trips", "page_size": 3 }"#).unwrap();

        let config = ExplorerConfig::load_from(Some(&path), None).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/trips"));
        assert_eq!(config.page_size, 3);

        let config =
            ExplorerConfig::load_from(Some(&path), Some(PathBuf::from("/tmp/other"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/other"));
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        assert!(ExplorerConfig::load_from(Some(&missing), None).is_err());
    }
}
