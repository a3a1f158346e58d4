//! Sightline configuration system.
//!
//! Provides the TOML-based startup configuration: the ordered surface list,
//! the page route table, bundled-content and dev-server settings, bridge
//! and logging options. All sections use defaults matching the stock
//! two-surface layout, so partial configs work out of the box.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sightline_config::{load_config, config_to_json};
//!
//! let config = load_config().expect("failed to load config");
//! let json = config_to_json(&config);
//! println!("{json}");
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    SightlineConfig, SurfaceDescriptor, CONFIG_SCHEMA_VERSION, KINECT_SURFACE, MAIN_SURFACE,
};

use sightline_common::ConfigError;
use std::path::Path;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a default
/// if none exists, and validates the result.
pub fn load_config() -> Result<SightlineConfig, ConfigError> {
    toml_loader::load_default()
}

/// Load config from an explicit override path, or the platform default.
pub fn load_config_from(path: Option<&Path>) -> Result<SightlineConfig, ConfigError> {
    match path {
        Some(p) => toml_loader::load_from_path(p),
        None => load_config(),
    }
}

/// Serialize a config to a pretty-printed JSON string.
pub fn config_to_json(config: &SightlineConfig) -> String {
    serde_json::to_string_pretty(config)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
