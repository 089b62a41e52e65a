//! Session configuration.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::sequence::Value;
use crate::step::Direction;

/// Parameters for a sorting session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Number of values in the sequence
    pub length: usize,
    /// Smallest value that may be generated
    pub min_value: Value,
    /// Largest value that may be generated
    pub max_value: Value,
    /// Seed for reproducible sequences; entropy when `None`
    pub seed: Option<u64>,
    /// Algorithm selected at startup (display name or key)
    pub algorithm: String,
    /// Direction selected at startup
    pub direction: Direction,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            length: 100,
            min_value: 0,
            max_value: 250,
            seed: None,
            algorithm: "Bubble Sort".to_string(),
            direction: Direction::Ascending,
        }
    }
}

impl SessionConfig {
    /// Read overrides from `SORTSCOPE_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, starting from defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(length) = parse_var(&lookup, "SORTSCOPE_LENGTH")? {
            config.length = length;
        }
        if let Some(min) = parse_var(&lookup, "SORTSCOPE_MIN")? {
            config.min_value = min;
        }
        if let Some(max) = parse_var(&lookup, "SORTSCOPE_MAX")? {
            config.max_value = max;
        }
        config.seed = parse_var(&lookup, "SORTSCOPE_SEED")?;
        if let Some(algorithm) = lookup("SORTSCOPE_ALGORITHM") {
            config.algorithm = algorithm;
        }
        if let Some(direction) = parse_var(&lookup, "SORTSCOPE_DIRECTION")? {
            config.direction = direction;
        }

        config.validate()?;
        Ok(config)
    }

    /// Reject configurations no sequence can be generated from.
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 {
            return Err(Error::Configuration("length must be positive".into()));
        }
        if self.min_value > self.max_value {
            return Err(Error::Configuration(format!(
                "min_value {} exceeds max_value {}",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| Error::Configuration(format!("invalid {key}={raw:?}: {e}"))),
    }
}
