//! Configuration management for taskflow.
//!
//! Settings live in `config.json` inside the per-user data directory
//! resolved by [`DataStorage`]. A missing file is not an error: every key
//! has a default, so the application runs without any setup.
//!
//! ## Keys
//!
//! - **`database`**: explicit database file path. `TASKFLOW_DB` (also read
//!   from a `.env` file) takes precedence over it.
//! - **`report.cutoff`**: wall-clock time (`HH:MM`) used as the inferred end
//!   of open intervals in reports.
//! - **`report.clamp_negative`**: clamp inferred durations below zero to zero.
//! - **`report.done_status`**: status value the pending selection excludes.
//! - **`report.default_status`**: status given to tasks created without one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::libs::config::Config;
//!
//! let config = Config::read()?;
//! let policy = config.report.open_interval_policy()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::interval::OpenIntervalPolicy;
use crate::libs::report::ReportOptions;
use anyhow::{Context, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DB_FILE_NAME: &str = "taskflow.db";
pub const DB_ENV_VAR: &str = "TASKFLOW_DB";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Inferred end of open intervals, `HH:MM` on the start's calendar day.
    pub cutoff: String,

    pub clamp_negative: bool,

    pub done_status: String,

    pub default_status: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            cutoff: "20:00".to_string(),
            clamp_negative: false,
            done_status: "Done".to_string(),
            default_status: "Pending".to_string(),
        }
    }
}

impl ReportConfig {
    pub fn open_interval_policy(&self) -> Result<OpenIntervalPolicy> {
        let cutoff = NaiveTime::parse_from_str(&self.cutoff, "%H:%M").with_context(|| format!("invalid report cutoff '{}'", self.cutoff))?;

        Ok(OpenIntervalPolicy {
            cutoff,
            clamp_negative: self.clamp_negative,
        })
    }

    pub fn report_options(&self) -> Result<ReportOptions> {
        Ok(ReportOptions {
            policy: self.open_interval_policy()?,
            done_status: self.done_status.clone(),
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,

    pub report: ReportConfig,
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(&config_file_path)?;
        let config: Config = serde_json::from_str(&config_str).with_context(|| format!("failed to parse {}", config_file_path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<PathBuf> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<PathBuf> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(&config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(config_file_path)
    }

    /// Database location: `TASKFLOW_DB`, then `database`, then the data directory.
    pub fn db_path(&self) -> Result<PathBuf> {
        if let Ok(path) = env::var(DB_ENV_VAR) {
            if !path.trim().is_empty() {
                return Ok(PathBuf::from(path));
            }
        }
        match &self.database {
            Some(path) => Ok(path.clone()),
            None => DataStorage::new().get_path(DB_FILE_NAME),
        }
    }
}
