//! Core configuration loaded from JSON.
//!
//! # Responsibility
//! - Describe where the database lives, how to log and which Post rules apply.
//! - Turn a configuration into an open connection and running logger.
//!
//! # Invariants
//! - Every key is optional; absent keys fall back to built-in defaults.
//! - A validated config never carries an empty phrase or category list.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::validation::PostRules;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{key}`: {message}")]
    InvalidValue { key: &'static str, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// SQLite file; `None` opens a private in-memory database.
    pub database_path: Option<PathBuf>,
    /// Falls back to `default_log_level()`.
    pub log_level: Option<String>,
    /// Logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub post_rules: PostRules,
}

impl CoreConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let rules = &self.post_rules;
        if rules.clickbait_phrases.is_empty()
            || rules.clickbait_phrases.iter().any(String::is_empty)
        {
            return Err(ConfigError::InvalidValue {
                key: "post_rules.clickbait_phrases",
                message: "phrases must be non-empty and at least one is required".to_string(),
            });
        }
        if rules.categories.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "post_rules.categories",
                message: "at least one category is required".to_string(),
            });
        }
        if matches!(&self.database_path, Some(path) if path.as_os_str().is_empty()) {
            return Err(ConfigError::InvalidValue {
                key: "database_path",
                message: "path cannot be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(default_log_level())
    }

    /// Opens the configured database with migrations applied.
    pub fn open_db(&self) -> DbResult<Connection> {
        match &self.database_path {
            Some(path) => open_db(path),
            None => open_db_in_memory(),
        }
    }

    /// Starts file logging when `log_dir` is set; otherwise does nothing.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(self.log_level(), dir),
            None => Ok(()),
        }
    }
}
