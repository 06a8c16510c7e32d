//! Engine tunables, loaded from an optional TOML file.

use std::path::Path;
use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_GRACE_SECS: u64 = 10;
pub const DEFAULT_STALE_SECS: u64 = 12;
pub const DEFAULT_STABILITY_THRESHOLD: u32 = 1;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 2000;
pub const MIN_POLL_INTERVAL_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// What counts as text typed at a prompt when a window is seen for the
/// first time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptPolicy {
    /// Any non-whitespace after the prompt glyph.
    #[default]
    AnyText,
    /// At least one letter or digit after the prompt glyph.
    Alphanumeric,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// How long a window stays active after its last confirmed active cycle.
    pub grace_secs: u64,
    /// How long an unchanged active line beside a visible prompt is trusted.
    pub stale_secs: u64,
    /// Consecutive cycles a new label must hold before it is applied.
    pub stability_threshold: u32,
    pub poll_interval_ms: u64,
    pub prompt_policy: PromptPolicy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grace_secs: DEFAULT_GRACE_SECS,
            stale_secs: DEFAULT_STALE_SECS,
            stability_threshold: DEFAULT_STABILITY_THRESHOLD,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            prompt_policy: PromptPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stability_threshold == 0 {
            return Err(ConfigError::Invalid("stability_threshold must be at least 1".to_string()));
        }
        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(ConfigError::Invalid(format!(
                "poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS}, got {}",
                self.poll_interval_ms
            )));
        }
        Ok(())
    }

    pub fn grace(&self) -> TimeDelta {
        secs_delta(self.grace_secs)
    }

    pub fn stale(&self) -> TimeDelta {
        secs_delta(self.stale_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

fn secs_delta(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}
