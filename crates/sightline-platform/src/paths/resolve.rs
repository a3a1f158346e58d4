use std::path::PathBuf;

use sightline_common::PlatformError;

pub(super) const APP_NAME: &str = "sightline";

/// Suffix appended to the data directory for live-mode runs.
const DEVELOPMENT_SUFFIX: &str = " (development)";

/// Which data directory a run persists its state into.
///
/// Live-mode runs get their own directory so that window placement saved
/// while developing never leaks into a packaged install.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataProfile {
    Packaged,
    Development,
}

impl DataProfile {
    fn dir_name(self) -> String {
        match self {
            Self::Packaged => APP_NAME.to_string(),
            Self::Development => format!("{APP_NAME}{DEVELOPMENT_SUFFIX}"),
        }
    }
}

/// Returns the platform-specific configuration directory for Sightline.
///
/// - macOS: `~/Library/Application Support/sightline`
/// - Linux: `$XDG_CONFIG_HOME/sightline` (defaults to `~/.config/sightline`)
/// - Windows: `%APPDATA%\sightline`
pub fn config_dir() -> Result<PathBuf, PlatformError> {
    Ok(dirs::config_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine config directory".into()))?
        .join(APP_NAME))
}

/// Returns the platform-specific data directory for a profile.
///
/// - macOS: `~/Library/Application Support/sightline`
/// - Linux: `$XDG_DATA_HOME/sightline` (defaults to `~/.local/share/sightline`)
/// - Windows: `%APPDATA%\sightline`
///
/// The development profile uses `sightline (development)` instead.
pub fn data_dir(profile: DataProfile) -> Result<PathBuf, PlatformError> {
    Ok(dirs::data_dir()
        .ok_or_else(|| PlatformError::PathError("could not determine data directory".into()))?
        .join(profile.dir_name()))
}

/// Returns the path to the persisted window placement document.
///
/// Located at `data_dir(profile)/placement.json`.
pub fn placement_file(profile: DataProfile) -> Result<PathBuf, PlatformError> {
    Ok(data_dir(profile)?.join("placement.json"))
}

/// Returns the path to the log directory.
///
/// Located at `data_dir(Packaged)/logs`.
pub fn log_dir() -> Result<PathBuf, PlatformError> {
    Ok(data_dir(DataProfile::Packaged)?.join("logs"))
}

/// Returns the path to the crash report directory.
///
/// Located at `log_dir()/crash-reports`.
pub fn crash_report_dir() -> Result<PathBuf, PlatformError> {
    Ok(log_dir()?.join("crash-reports"))
}
