//! Configuration for Intake

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IntakeConfig {
    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IntakeConfig {
    pub fn from_file(path: &str) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| crate::Error::InternalError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();

        if let Ok(prefix) = std::env::var("INTAKE_STORAGE_PREFIX") {
            config.storage.prefix = prefix;
        }
        if let Ok(policy) = std::env::var("INTAKE_PREFIX_POLICY") {
            config.storage.prefix_policy = policy.parse()?;
        }
        if let Ok(level) = std::env::var("INTAKE_LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Ok(format) = std::env::var("INTAKE_LOG_FORMAT") {
            config.logging.format = format;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> crate::Result<()> {
        self.logging.validate()
    }
}

/// Storage key layout used to derive content ids
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key prefix stripped from every storage key to obtain the content id
    #[serde(default)]
    pub prefix: String,

    /// What to do with keys outside the prefix
    #[serde(default)]
    pub prefix_policy: PrefixPolicy,
}

/// Handling of storage keys that do not start with the configured prefix
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixPolicy {
    /// Fail the whole batch
    #[default]
    Reject,
    /// Drop the offending record and keep the rest of the batch
    SkipRecord,
    /// Use the full decoded key as the content id
    KeepFullKey,
}

impl PrefixPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrefixPolicy::Reject => "reject",
            PrefixPolicy::SkipRecord => "skip_record",
            PrefixPolicy::KeepFullKey => "keep_full_key",
        }
    }
}

impl FromStr for PrefixPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reject" => Ok(PrefixPolicy::Reject),
            "skip_record" | "skip" => Ok(PrefixPolicy::SkipRecord),
            "keep_full_key" | "keep" => Ok(PrefixPolicy::KeepFullKey),
            other => Err(crate::Error::InvalidArgument(format!(
                "Unknown prefix policy: {}",
                other
            ))),
        }
    }
}

impl std::fmt::Display for PrefixPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }

    pub fn validate(&self) -> crate::Result<()> {
        match self.format.to_lowercase().as_str() {
            "pretty" | "json" => Ok(()),
            other => Err(crate::Error::InvalidArgument(format!(
                "Unknown log format: {}",
                other
            ))),
        }
    }
}
