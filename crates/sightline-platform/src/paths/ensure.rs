use std::fs;

use sightline_common::PlatformError;

use super::resolve::{config_dir, crash_report_dir, data_dir, log_dir, DataProfile};

/// Creates all Sightline directories for a profile if they do not already exist.
///
/// Creates: config_dir, data_dir(profile), log_dir, and crash_report_dir.
pub fn ensure_dirs(profile: DataProfile) -> Result<(), PlatformError> {
    fs::create_dir_all(config_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    fs::create_dir_all(data_dir(profile)?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    fs::create_dir_all(log_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    fs::create_dir_all(crash_report_dir()?).map_err(|e| PlatformError::PathError(e.to_string()))?;
    Ok(())
}
