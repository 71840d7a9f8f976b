//! Adapter configuration from environment variables.

use crate::annotator::{PassThrough, PlaceholderBucketInfo, ReplyAnnotator};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid reply mode '{0}' (expected 'augment' or 'passthrough')")]
    InvalidReplyMode(String),

    #[error("Invalid trace level '{0}' (expected 0-255)")]
    InvalidTraceLevel(String),
}

/// Which built-in annotator command envelopes use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    /// Overwrite bucket info with the `(1, 1, 1)` placeholder.
    #[default]
    Augment,
    /// Wrap replies unchanged.
    PassThrough,
}

impl ReplyMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReplyMode::Augment => "augment",
            ReplyMode::PassThrough => "passthrough",
        }
    }

    pub fn annotator(self) -> Arc<dyn ReplyAnnotator> {
        match self {
            ReplyMode::Augment => Arc::new(PlaceholderBucketInfo::new()),
            ReplyMode::PassThrough => Arc::new(PassThrough),
        }
    }
}

impl fmt::Display for ReplyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplyMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "augment" => Ok(ReplyMode::Augment),
            "passthrough" | "pass-through" => Ok(ReplyMode::PassThrough),
            _ => Err(ConfigError::InvalidReplyMode(s.to_string())),
        }
    }
}

/// Settings applied to every command envelope built from this config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub reply_mode: ReplyMode,
    /// Initial trace level of new envelopes. 0 disables tracing.
    pub trace_level: u8,
}

impl AdapterConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `STORAGE_MBUSPROT_REPLY_MODE`: `augment` or `passthrough` (default: augment)
    /// - `STORAGE_MBUSPROT_TRACE_LEVEL`: 0-255 (default: 0)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reply_mode = match lookup("STORAGE_MBUSPROT_REPLY_MODE") {
            Some(v) => v.parse()?,
            None => ReplyMode::default(),
        };

        let trace_level = match lookup("STORAGE_MBUSPROT_TRACE_LEVEL") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidTraceLevel(v.clone()))?,
            None => 0,
        };

        Ok(Self {
            reply_mode,
            trace_level,
        })
    }

    pub fn annotator(&self) -> Arc<dyn ReplyAnnotator> {
        self.reply_mode.annotator()
    }
}
