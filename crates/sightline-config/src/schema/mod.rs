//! Configuration schema types for Sightline.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with the stock two-surface layout.

mod content;
mod surface;
mod system;

pub use content::*;
pub use surface::*;
pub use system::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Sightline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SightlineConfig {
    /// Surfaces to create at startup, in creation order.
    pub surfaces: Vec<SurfaceDescriptor>,
    pub routes: RouteTable,
    pub content: ContentConfig,
    pub dev_server: DevServerConfig,
    pub bridge: BridgeConfig,
    pub logging: LoggingConfig,
}

impl Default for SightlineConfig {
    fn default() -> Self {
        Self {
            surfaces: default_surfaces(),
            routes: RouteTable::default(),
            content: ContentConfig::default(),
            dev_server: DevServerConfig::default(),
            bridge: BridgeConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SightlineConfig {
    pub fn surface(&self, name: &str) -> Option<&SurfaceDescriptor> {
        self.surfaces.iter().find(|s| s.name == name)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_two_surfaces() {
        let config = SightlineConfig::default();
        assert_eq!(config.surfaces.len(), 2);
        assert!(config.surface("main").is_some());
        assert!(config.surface("kinect").is_some());
        assert!(config.surface("settings").is_none());
    }

    #[test]
    fn empty_toml_gives_defaults() {
        let config: SightlineConfig = toml::from_str("").unwrap();
        assert_eq!(config.surfaces.len(), 2);
        assert_eq!(config.bridge.reveal_surface, "kinect");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn surfaces_array_replaces_defaults() {
        let config: SightlineConfig = toml::from_str(
            r#"
[[surfaces]]
name = "main"
route = "home"
interactive = true
width = 1280
height = 720
"#,
        )
        .unwrap();
        assert_eq!(config.surfaces.len(), 1);
        let main = &config.surfaces[0];
        assert_eq!(main.width, 1280);
        assert!(main.visible);
        // Other sections keep defaults
        assert_eq!(config.routes.get("home"), Some("home"));
        assert_eq!(config.content.scheme, "app");
    }

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = SightlineConfig::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: SightlineConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.surfaces, config.surfaces);
        assert_eq!(parsed.routes, config.routes);
    }
}
