//! Bracket configuration: pool size bounds and default pool size.
//!
//! Read once at startup from the JSON file named by `BRACKET_CONFIG`:
//!
//! ```json
//! { "minSize": 2, "maxSize": 64, "size": 8 }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest pool the bracket supports.
pub const MAX_POOL_SIZE: usize = 64;

/// Env var naming the JSON config file.
pub const CONFIG_ENV: &str = "BRACKET_CONFIG";

/// Errors raised while loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    /// `maxSize` above [`MAX_POOL_SIZE`].
    MaxSizeTooLarge { max_size: usize },
    /// `maxSize` below the effective minimum.
    EmptyRange { min_size: usize, max_size: usize },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Cannot read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Invalid config JSON: {}", e),
            ConfigError::MaxSizeTooLarge { max_size } => {
                write!(f, "maxSize {} exceeds {}", max_size, MAX_POOL_SIZE)
            }
            ConfigError::EmptyRange { min_size, max_size } => {
                write!(f, "maxSize {} is below minSize {}", max_size, min_size)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BracketConfig {
    pub min_size: usize,
    pub max_size: usize,
    /// Pool size used when no count is requested.
    pub size: usize,
    /// Fixed RNG seed for reproducible brackets. Entropy when absent.
    pub seed: Option<u64>,
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            min_size: 2,
            max_size: MAX_POOL_SIZE,
            size: 8,
            seed: None,
        }
    }
}

impl BracketConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load from `BRACKET_CONFIG` when set, defaults otherwise.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) => {
                log::info!("Loading bracket config from {}", path);
                Self::load(path)
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size > MAX_POOL_SIZE {
            return Err(ConfigError::MaxSizeTooLarge {
                max_size: self.max_size,
            });
        }
        if self.max_size < self.floor() {
            return Err(ConfigError::EmptyRange {
                min_size: self.min_size,
                max_size: self.max_size,
            });
        }
        Ok(())
    }

    /// Smallest pool actually produced: `minSize`, or 1 when `minSize` is 0.
    pub fn floor(&self) -> usize {
        self.min_size.max(1)
    }

    /// Pool size for a requested count. Absent or zero means the default size; the
    /// result is clamped into `[floor, maxSize]`, with `maxSize` taking precedence.
    pub fn clamp_size(&self, requested: Option<i64>) -> usize {
        let n = requested
            .filter(|&n| n != 0)
            .unwrap_or(self.size as i64);
        let n = if n <= self.min_size as i64 {
            self.floor() as i64
        } else {
            n
        };
        n.min(self.max_size as i64).max(0) as usize
    }
}
