//! Full configuration validation.
//!
//! Each domain has its own submodule; this orchestrator calls them all
//! and collects errors into a single `ConfigError`.

mod helpers;
mod surfaces;

#[cfg(test)]
mod tests;

use crate::schema::SightlineConfig;
use sightline_common::ConfigError;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &SightlineConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    surfaces::validate_surfaces(&mut errors, config);
    surfaces::validate_routes(&mut errors, config);
    surfaces::validate_bridge(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
