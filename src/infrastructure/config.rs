//! Configuration management

use crate::domain::date;
use crate::error::{MoodjourError, Result};
use chrono::NaiveTime;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "moodjour.toml";

pub const DEFAULT_CSV: &str = "HowWeFeelEmotions.csv";
pub const DEFAULT_ENTRIES: &str = "AppleJournalEntries/Entries";
pub const DEFAULT_TIME: &str = "12:00 PM";
pub const DEFAULT_MOODS_FILE: &str = "moods.txt";
pub const DEFAULT_LLM_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_LLM_ENDPOINT: &str = "https://api.openai.com/v1/responses";

/// Keys accepted in the TOML config file. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub csv: Option<PathBuf>,
    pub entries: Option<PathBuf>,
    pub time: Option<String>,
    pub moods_file: Option<PathBuf>,
    pub llm_model: Option<String>,
    pub llm_endpoint: Option<String>,
    pub llm_off: Option<bool>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    /// Load a config file from an explicit path
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                MoodjourError::Config(format!("Config file not found: {}", path.display()))
            } else {
                MoodjourError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Load the explicit config, else the default file if present, else nothing
    pub fn discover(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
        if default_path.is_file() {
            let config = Self::load(&default_path)?;
            return Ok((config, Some(default_path)));
        }

        Ok((FileConfig::default(), None))
    }
}

/// Values given on the command line; they win over the config file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub csv: Option<PathBuf>,
    pub entries: Option<PathBuf>,
    pub time: Option<String>,
    pub moods_file: Option<PathBuf>,
    pub llm_model: Option<String>,
    pub llm_endpoint: Option<String>,
    pub llm_off: bool,
    pub jobs: Option<usize>,
}

/// Fully resolved run settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub csv_path: PathBuf,
    pub entries_dir: PathBuf,
    pub record_time: NaiveTime,
    pub moods_file: PathBuf,
    pub llm_model: String,
    pub llm_endpoint: String,
    pub llm_off: bool,
    pub jobs: Option<usize>,
}

impl Settings {
    /// Merge command line, config file and defaults, in that order
    pub fn resolve(file: FileConfig, overrides: Overrides) -> Result<Self> {
        let time = overrides
            .time
            .or(file.time)
            .unwrap_or_else(|| DEFAULT_TIME.to_string());
        let record_time = date::parse_time_of_day(&time)?;

        let jobs = overrides.jobs.or(file.jobs);
        if jobs == Some(0) {
            return Err(MoodjourError::Config(
                "jobs must be at least 1".to_string(),
            ));
        }

        Ok(Settings {
            csv_path: overrides
                .csv
                .or(file.csv)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CSV)),
            entries_dir: overrides
                .entries
                .or(file.entries)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ENTRIES)),
            record_time,
            moods_file: overrides
                .moods_file
                .or(file.moods_file)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_MOODS_FILE)),
            llm_model: overrides
                .llm_model
                .or(file.llm_model)
                .unwrap_or_else(|| DEFAULT_LLM_MODEL.to_string()),
            llm_endpoint: overrides
                .llm_endpoint
                .or(file.llm_endpoint)
                .unwrap_or_else(|| DEFAULT_LLM_ENDPOINT.to_string()),
            llm_off: overrides.llm_off || file.llm_off.unwrap_or(false),
            jobs,
        })
    }
}
