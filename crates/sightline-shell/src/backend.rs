//! The seam between the shell core and a native windowing backend.

use sightline_common::{Dimensions, Placement, ShellError, SurfaceId};

use crate::bridge::OutboundEnvelope;
use crate::loader::ContentLocation;

/// Everything a backend needs to open one surface window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenRequest<'a> {
    pub id: SurfaceId,
    pub name: &'a str,
    pub title: &'a str,
    /// Restored top-left corner, or `None` to let the OS place the window.
    pub position: Option<(i32, i32)>,
    pub size: Dimensions,
    pub visible: bool,
}

/// Native window operations the shell core relies on.
///
/// Every method is called from the host thread. Asynchronous outcomes
/// (page loads, IPC bodies, moves, close requests) come back as
/// [`SurfaceEvent`]s in the order the backend observed them.
pub trait SurfaceBackend {
    /// Create the window and its webview with the bridge already wired in.
    /// Returns the placement the window actually ended up with.
    fn open(&mut self, request: &OpenRequest<'_>) -> Result<Placement, ShellError>;

    /// Start loading content. Completion is reported through
    /// [`SurfaceEvent::LoadFinished`] or [`SurfaceEvent::LoadFailed`].
    fn load(&mut self, id: SurfaceId, location: &ContentLocation) -> Result<(), ShellError>;

    fn set_visible(&mut self, id: SurfaceId, visible: bool) -> Result<(), ShellError>;

    /// Hand one envelope to the surface's script context.
    fn deliver(&mut self, id: SurfaceId, envelope: &OutboundEnvelope) -> Result<(), ShellError>;

    /// Destroy the window. Unknown ids are ignored.
    fn close(&mut self, id: SurfaceId);

    /// Work areas of the connected monitors. Empty when unknown.
    fn monitors(&self) -> Vec<Placement> {
        Vec::new()
    }

    fn open_devtools(&mut self, _id: SurfaceId) {}
}

/// Events a backend reports back to the host thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Raw IPC body posted by the surface's script context.
    Ipc { surface: SurfaceId, body: String },
    LoadFinished { surface: SurfaceId, url: String },
    LoadFailed { surface: SurfaceId, error: String },
    Moved { surface: SurfaceId, x: i32, y: i32 },
    Resized {
        surface: SurfaceId,
        width: u32,
        height: u32,
    },
    /// The user (or the OS) asked to close the window.
    CloseRequested { surface: SurfaceId },
}

impl SurfaceEvent {
    pub fn surface(&self) -> SurfaceId {
        match self {
            Self::Ipc { surface, .. }
            | Self::LoadFinished { surface, .. }
            | Self::LoadFailed { surface, .. }
            | Self::Moved { surface, .. }
            | Self::Resized { surface, .. }
            | Self::CloseRequested { surface } => *surface,
        }
    }
}
