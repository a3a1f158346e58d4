//! System configuration types: bridge and logging.

use serde::{Deserialize, Serialize};

use super::surface::KINECT_SURFACE;

/// Message bridge behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Surface revealed by the `show-kinect` topic.
    pub reveal_surface: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            reveal_surface: KINECT_SURFACE.into(),
        }
    }
}

/// Log level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[derive(Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `tracing-subscriber` filter directive for this level.
    pub fn directive(self) -> &'static str {
        match self {
            Self::Trace => "sightline=trace",
            Self::Debug => "sightline=debug",
            Self::Info => "sightline=info",
            Self::Warn => "sightline=warn",
            Self::Error => "sightline=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_defaults_to_kinect() {
        assert_eq!(BridgeConfig::default().reveal_surface, "kinect");
    }

    #[test]
    fn log_level_serialization() {
        let json = serde_json::to_string(&LogLevel::Warn).unwrap();
        assert_eq!(json, "\"warn\"");
        let level: LogLevel = serde_json::from_str("\"debug\"").unwrap();
        assert_eq!(level, LogLevel::Debug);
    }

    #[test]
    fn log_level_directive() {
        assert_eq!(LogLevel::default().directive(), "sightline=info");
        assert_eq!(LogLevel::Trace.directive(), "sightline=trace");
    }
}
