use sightline_common::{Placement, SurfaceId};
use sightline_config::SurfaceDescriptor;

/// Content load progress of a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(String),
}

impl LoadState {
    /// Whether the load has finished one way or the other.
    pub fn is_settled(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

/// Registry-owned record of one live surface.
#[derive(Debug, Clone)]
pub struct SurfaceHandle {
    pub(super) id: SurfaceId,
    pub(super) descriptor: SurfaceDescriptor,
    pub(super) visible: bool,
    pub(super) placement: Placement,
    pub(super) load: LoadState,
}

impl SurfaceHandle {
    pub fn id(&self) -> SurfaceId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &SurfaceDescriptor {
        &self.descriptor
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_interactive(&self) -> bool {
        self.descriptor.interactive
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }
}

/// What the registry reports after a surface has been closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedSurface {
    pub id: SurfaceId,
    pub name: String,
    pub interactive: bool,
    /// True when this was the last open main-interactive surface.
    pub last_interactive: bool,
}
