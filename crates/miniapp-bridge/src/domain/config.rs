//! Bridge configuration with validation.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bridge configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Timeout applied to every bridge action. Models human confirmation
    /// latency in the host wallet, hence the tens-of-seconds default.
    #[serde(with = "humantime_serde")]
    pub action_timeout: Duration,
    /// Interval between expiry sweeps of the correlation table.
    #[serde(with = "humantime_serde")]
    pub sweep_interval: Duration,
    /// Minimum length of an authenticate nonce, when one is supplied.
    pub min_nonce_len: usize,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            action_timeout: Duration::from_secs(30),
            sweep_interval: Duration::from_secs(10),
            min_nonce_len: 8,
        }
    }
}

impl BridgeConfig {
    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.action_timeout.as_millis() == 0 {
            return Err(ConfigError::InvalidTimeout(
                "action_timeout cannot be 0".into(),
            ));
        }

        if self.sweep_interval.as_millis() == 0 {
            return Err(ConfigError::InvalidTimeout(
                "sweep_interval cannot be 0".into(),
            ));
        }

        if self.min_nonce_len == 0 {
            return Err(ConfigError::InvalidLimit(
                "min_nonce_len cannot be 0".into(),
            ));
        }

        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// Invalid timeout value
    #[error("invalid timeout: {0}")]
    InvalidTimeout(String),
    /// Invalid size or count limit
    #[error("invalid limit: {0}")]
    InvalidLimit(String),
}

/// Humantime serde module for Duration serialization
mod humantime_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{}s", duration.as_secs()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_duration(&s).map_err(serde::de::Error::custom)
    }

    fn parse_duration(s: &str) -> Result<Duration, &'static str> {
        let s = s.trim();
        if let Some(ms) = s.strip_suffix("ms") {
            ms.trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|_| "invalid milliseconds")
        } else if let Some(secs) = s.strip_suffix('s') {
            secs.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid seconds")
        } else if let Some(mins) = s.strip_suffix('m') {
            mins.trim()
                .parse::<u64>()
                .map(|m| Duration::from_secs(m * 60))
                .map_err(|_| "invalid minutes")
        } else {
            // Try parsing as plain seconds
            s.parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| "invalid duration format")
        }
    }
}
