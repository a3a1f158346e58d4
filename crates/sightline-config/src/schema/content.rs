//! Content resolution settings: route table, bundled content, dev server.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maps logical page names to content paths.
///
/// `home = "home"` resolves the `home` page to `app://localhost/home` in
/// packaged mode and to `http://localhost:<port>/home` in live mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteTable(pub BTreeMap<String, String>);

impl Default for RouteTable {
    fn default() -> Self {
        let mut routes = BTreeMap::new();
        routes.insert("home".to_string(), "home".to_string());
        routes.insert("kinect".to_string(), "kinect".to_string());
        Self(routes)
    }
}

impl RouteTable {
    pub fn get(&self, page: &str) -> Option<&str> {
        self.0.get(page).map(String::as_str)
    }

    pub fn insert(&mut self, page: impl Into<String>, path: impl Into<String>) {
        self.0.insert(page.into(), path.into());
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Bundled content served in packaged mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Directory holding the exported pages. Relative paths are resolved
    /// against the executable's directory.
    pub root: PathBuf,
    /// Custom protocol scheme used to address bundled content.
    pub scheme: String,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("app"),
            scheme: "app".into(),
        }
    }
}

/// Local development server used in live mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DevServerConfig {
    pub host: String,
    /// Open developer tools on interactive surfaces in live mode.
    pub devtools: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            devtools: true,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_routes() {
        let routes = RouteTable::default();
        assert_eq!(routes.get("home"), Some("home"));
        assert_eq!(routes.get("kinect"), Some("kinect"));
        assert_eq!(routes.get("settings"), None);
    }

    #[test]
    fn routes_from_toml_table() {
        #[derive(Deserialize)]
        struct Wrapper {
            routes: RouteTable,
        }
        let w: Wrapper = toml::from_str(
            r#"
[routes]
home = "index"
kinect = "devices/kinect"
"#,
        )
        .unwrap();
        assert_eq!(w.routes.get("home"), Some("index"));
        assert_eq!(w.routes.get("kinect"), Some("devices/kinect"));
    }

    #[test]
    fn content_defaults() {
        let c = ContentConfig::default();
        assert_eq!(c.root, PathBuf::from("app"));
        assert_eq!(c.scheme, "app");
        let d = DevServerConfig::default();
        assert_eq!(d.host, "localhost");
        assert!(d.devtools);
    }
}
