//! Planner configuration from environment variables.

use std::env;
use std::path::PathBuf;
use thiserror::Error;

use crate::generator::DEFAULT_RECIPE_COUNT;

pub const DATA_DIR_VAR: &str = "PLATEMATE_DATA_DIR";
pub const RECIPE_COUNT_VAR: &str = "PLATEMATE_RECIPE_COUNT";
pub const SEED_VAR: &str = "PLATEMATE_SEED";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Directory of the file-backed record store.
    pub data_dir: PathBuf,
    /// Recipes per generation batch.
    pub recipe_count: usize,
    /// Seed for reproducible generation. Random when absent.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            recipe_count: DEFAULT_RECIPE_COUNT,
            seed: None,
        }
    }
}

impl PlannerConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `PLATEMATE_DATA_DIR`: Record store directory (default: "~/.platemate/data")
    /// - `PLATEMATE_RECIPE_COUNT`: Recipes per batch (default: 5)
    /// - `PLATEMATE_SEED`: RNG seed for reproducible output
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Like [`from_env`](Self::from_env) but reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = lookup(DATA_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_data_dir);

        let recipe_count = match lookup(RECIPE_COUNT_VAR) {
            Some(value) => parse_var(RECIPE_COUNT_VAR, &value)?,
            None => DEFAULT_RECIPE_COUNT,
        };

        let seed = lookup(SEED_VAR)
            .map(|value| parse_var(SEED_VAR, &value))
            .transpose()?;

        Ok(Self {
            data_dir,
            recipe_count,
            seed,
        })
    }

    /// Get the default data directory: ~/.platemate/data
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .map(|h| h.join(".platemate").join("data"))
            .unwrap_or_else(|| PathBuf::from("data/platemate"))
    }
}

fn parse_var<T: std::str::FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        var: var.to_string(),
        value: value.to_string(),
    })
}
