//! Host configuration.

use std::time::Duration;

use crate::error::{Error, Result};

/// Configuration for the visualization server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisConfig {
    /// HTTP listen port
    pub port: u16,
    /// Session ticks per second; one algorithm step per tick
    pub ticks_per_second: u32,
}

impl Default for VisConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            ticks_per_second: 60,
        }
    }
}

impl VisConfig {
    /// Create config from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("SORTSCOPE_PORT") {
            config.port = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("invalid SORTSCOPE_PORT={raw:?}: {e}")))?;
        }
        if let Some(raw) = lookup("SORTSCOPE_TPS") {
            config.ticks_per_second = raw
                .trim()
                .parse()
                .map_err(|e| Error::Config(format!("invalid SORTSCOPE_TPS={raw:?}: {e}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.ticks_per_second == 0 {
            return Err(Error::Config("ticks_per_second must be positive".into()));
        }
        if self.tick_period().is_zero() {
            return Err(Error::Config(format!(
                "ticks_per_second {} exceeds one tick per nanosecond",
                self.ticks_per_second
            )));
        }
        Ok(())
    }

    /// Time between session ticks.
    pub fn tick_period(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = VisConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.ticks_per_second, 60);
        assert_eq!(config.tick_period(), Duration::from_secs(1) / 60);
    }

    #[test]
    fn env_overrides() {
        let config = VisConfig::from_lookup(|key| match key {
            "SORTSCOPE_PORT" => Some("8080".into()),
            "SORTSCOPE_TPS" => Some("120".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.ticks_per_second, 120);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(VisConfig::from_lookup(|key| (key == "SORTSCOPE_PORT").then(|| "x".into())).is_err());
        assert!(VisConfig::from_lookup(|key| (key == "SORTSCOPE_TPS").then(|| "0".into())).is_err());
        assert!(VisConfig::from_lookup(|key| (key == "SORTSCOPE_TPS").then(|| "2000000000".into())).is_err());
    }

    #[test]
    fn accepted_rates_have_nonzero_period() {
        let fastest = VisConfig {
            ticks_per_second: 1_000_000_000,
            ..Default::default()
        };
        assert!(fastest.validate().is_ok());
        assert_eq!(fastest.tick_period(), Duration::from_nanos(1));

        let too_fast = VisConfig {
            ticks_per_second: 1_000_000_001,
            ..Default::default()
        };
        assert!(too_fast.validate().is_err());
    }
}
