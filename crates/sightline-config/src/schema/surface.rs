//! Surface descriptor types.

use serde::{Deserialize, Serialize};
use sightline_common::Dimensions;

/// Name of the primary interactive surface.
pub const MAIN_SURFACE: &str = "main";

/// Name of the auxiliary device-view surface.
pub const KINECT_SURFACE: &str = "kinect";

/// Static description of one surface, read from `[[surfaces]]`.
///
/// Everything here is fixed once the surface is created. Runtime visibility
/// is tracked separately by the window registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceDescriptor {
    /// Unique surface name, used to address it over the bridge.
    pub name: String,
    /// Default width in logical pixels.
    pub width: u32,
    /// Default height in logical pixels.
    pub height: u32,
    /// Whether the surface is shown as soon as it is created.
    pub visible: bool,
    /// Logical page loaded into the surface at startup.
    pub route: String,
    /// Main-interactive surfaces keep the process alive; once all of them
    /// close the process shuts down.
    pub interactive: bool,
    /// Window title. Defaults to the surface name.
    pub title: Option<String>,
}

impl Default for SurfaceDescriptor {
    fn default() -> Self {
        Self {
            name: String::new(),
            width: 800,
            height: 600,
            visible: true,
            route: String::new(),
            interactive: false,
            title: None,
        }
    }
}

impl SurfaceDescriptor {
    /// Descriptor for a surface with the given name and route.
    pub fn new(name: impl Into<String>, route: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            route: route.into(),
            ..Default::default()
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }
}

/// The stock surface list: a visible main window and a hidden kinect view.
pub fn default_surfaces() -> Vec<SurfaceDescriptor> {
    vec![
        SurfaceDescriptor::new(MAIN_SURFACE, "home")
            .with_size(1000, 600)
            .interactive(),
        SurfaceDescriptor::new(KINECT_SURFACE, "kinect")
            .with_size(800, 600)
            .hidden(),
    ]
}

// =============================================================================
// Tests
// =============================================================================
