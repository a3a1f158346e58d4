//! Page name to content location.

use std::fmt;
use std::path::PathBuf;

use sightline_common::{ConfigError, ShellError};
use sightline_config::schema::RouteTable;
use sightline_config::SightlineConfig;
use tracing::debug;

/// Environment variable selecting the launch mode.
pub const LAUNCH_MODE_ENV: &str = "SIGHTLINE_ENV";

/// Value of [`LAUNCH_MODE_ENV`] that selects packaged mode.
const PACKAGED_VALUE: &str = "production";

/// Where surface content comes from. Chosen once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchMode {
    /// Bundled content served from `content_root` through the app scheme.
    Packaged { content_root: PathBuf },
    /// A local development server on `port`.
    Live { port: u16 },
}

impl LaunchMode {
    /// Pick the mode from the environment value and launch arguments.
    ///
    /// `production` selects packaged mode; anything else (including unset)
    /// selects live mode, which requires a port.
    pub fn from_env(
        env_value: Option<&str>,
        port: Option<u16>,
        content_root: PathBuf,
    ) -> Result<Self, ConfigError> {
        if env_value == Some(PACKAGED_VALUE) {
            return Ok(Self::Packaged { content_root });
        }
        match port {
            Some(port) => Ok(Self::Live { port }),
            None => Err(ConfigError::LaunchError(format!(
                "live mode needs the dev server port as the first argument \
                 (set {LAUNCH_MODE_ENV}={PACKAGED_VALUE} for packaged mode)"
            ))),
        }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Packaged { content_root } => {
                write!(f, "packaged ({})", content_root.display())
            }
            Self::Live { port } => write!(f, "live (port {port})"),
        }
    }
}

/// A concrete URL a surface can load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLocation(String);

impl ContentLocation {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct SurfaceLoader {
    mode: LaunchMode,
    routes: RouteTable,
    scheme: String,
    dev_host: String,
}

impl SurfaceLoader {
    pub fn new(mode: LaunchMode, routes: RouteTable) -> Self {
        Self {
            mode,
            routes,
            scheme: "app".into(),
            dev_host: "localhost".into(),
        }
    }

    pub fn from_config(mode: LaunchMode, config: &SightlineConfig) -> Self {
        Self {
            mode,
            routes: config.routes.clone(),
            scheme: config.content.scheme.clone(),
            dev_host: config.dev_server.host.clone(),
        }
    }

    pub fn mode(&self) -> &LaunchMode {
        &self.mode
    }

    /// Resolve `page` for `surface` against the route table.
    pub fn resolve_route(&self, surface: &str, page: &str) -> Result<ContentLocation, ShellError> {
        let path = self
            .routes
            .get(page)
            .ok_or_else(|| ShellError::UnresolvedRoute {
                surface: surface.to_string(),
                page: page.to_string(),
            })?;
        let path = path.trim_start_matches('/');

        let url = match &self.mode {
            LaunchMode::Packaged { .. } => format!("{}://localhost/{path}", self.scheme),
            LaunchMode::Live { port } => format!("http://{}:{port}/{path}", self.dev_host),
        };
        debug!(surface = %surface, page = %page, url = %url, "route resolved");
        Ok(ContentLocation(url))
    }
}
