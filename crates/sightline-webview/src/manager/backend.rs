use sightline_common::{Placement, ShellError, SurfaceId};
use sightline_shell::{ContentLocation, OpenRequest, OutboundEnvelope, SurfaceBackend};
use winit::event_loop::ActiveEventLoop;

use super::WebViewManager;

/// The manager paired with the running event loop for the duration of one
/// callback.
pub struct WinitSurfaces<'a> {
    event_loop: &'a ActiveEventLoop,
    manager: &'a mut WebViewManager,
}

impl<'a> WinitSurfaces<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, manager: &'a mut WebViewManager) -> Self {
        Self {
            event_loop,
            manager,
        }
    }
}

impl SurfaceBackend for WinitSurfaces<'_> {
    fn open(&mut self, request: &OpenRequest<'_>) -> Result<Placement, ShellError> {
        self.manager.open_surface(self.event_loop, request)
    }

    fn load(&mut self, id: SurfaceId, location: &ContentLocation) -> Result<(), ShellError> {
        self.manager.load(id, location)
    }

    fn set_visible(&mut self, id: SurfaceId, visible: bool) -> Result<(), ShellError> {
        self.manager.set_visible(id, visible)
    }

    fn deliver(&mut self, id: SurfaceId, envelope: &OutboundEnvelope) -> Result<(), ShellError> {
        self.manager
            .surface_mut(id)?
            .deliver(envelope)
            .map_err(|e| ShellError::Backend(format!("deliver to {id}: {e}")))
    }

    fn close(&mut self, id: SurfaceId) {
        self.manager.close_surface(id);
    }

    fn monitors(&self) -> Vec<Placement> {
        self.event_loop
            .available_monitors()
            .map(|monitor| {
                let scale = monitor.scale_factor();
                let position = monitor.position().to_logical::<i32>(scale);
                let size = monitor.size().to_logical::<u32>(scale);
                Placement::new(position.x, position.y, size.width, size.height)
            })
            .collect()
    }

    fn open_devtools(&mut self, id: SurfaceId) {
        if let Some(surface) = self.manager.get(id) {
            surface.open_devtools();
        }
    }
}
