//! Native surface management.
//!
//! `WebViewManager` owns one winit window plus `wry::WebView` per surface
//! and reports what happens to them through an [`EventSink`]. The shell
//! core reaches it through [`WinitSurfaces`], a short-lived
//! [`SurfaceBackend`](sightline_shell::SurfaceBackend) that pairs the
//! manager with the active event loop.

use std::collections::HashMap;
use std::sync::Arc;

use sightline_common::SurfaceId;
use sightline_shell::SurfaceEvent;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use crate::content::ContentProvider;
use crate::events::{translate_window_event, EventSink};

mod backend;
mod handle;
pub mod handlers;
mod lifecycle;

pub use backend::WinitSurfaces;
pub use handle::SurfaceWindow;
pub use handlers::NavigationPolicy;

pub struct WebViewManager {
    pub(crate) events: EventSink,
    content_provider: Option<Arc<ContentProvider>>,
    navigation: Arc<NavigationPolicy>,
    devtools: bool,
    surfaces: HashMap<SurfaceId, SurfaceWindow>,
    by_window: HashMap<WindowId, SurfaceId>,
}

impl WebViewManager {
    pub fn new(navigation: NavigationPolicy) -> Self {
        Self {
            events: EventSink::new(),
            content_provider: None,
            navigation: Arc::new(navigation),
            devtools: false,
            surfaces: HashMap::new(),
            by_window: HashMap::new(),
        }
    }

    /// Serve bundled content through the provider's scheme.
    pub fn set_content_provider(&mut self, provider: ContentProvider) {
        self.content_provider = Some(Arc::new(provider));
    }

    /// Allow developer tools on surfaces created from now on.
    pub fn set_devtools(&mut self, enabled: bool) {
        self.devtools = enabled;
    }

    /// Pair the manager with the running event loop.
    pub fn backend<'a>(&'a mut self, event_loop: &'a ActiveEventLoop) -> WinitSurfaces<'a> {
        WinitSurfaces::new(event_loop, self)
    }

    pub fn surface_for_window(&self, window_id: WindowId) -> Option<SurfaceId> {
        self.by_window.get(&window_id).copied()
    }

    pub fn get(&self, id: SurfaceId) -> Option<&SurfaceWindow> {
        self.surfaces.get(&id)
    }

    /// Record a native window event for the host thread.
    pub fn handle_window_event(&self, window_id: WindowId, event: &WindowEvent) {
        let Some(id) = self.surface_for_window(window_id) else {
            return;
        };
        let Some(surface) = self.surfaces.get(&id) else {
            return;
        };

        if let WindowEvent::Resized(_) = event {
            if let Err(e) = surface.fill_window() {
                tracing::warn!(%id, error = %e, "failed to resize webview");
            }
        }
        if let Some(translated) = translate_window_event(id, event, surface.scale_factor()) {
            self.events.push(translated);
        }
    }

    /// Take every event queued since the last drain.
    pub fn drain_events(&self) -> Vec<SurfaceEvent> {
        self.events.drain()
    }

    pub fn count(&self) -> usize {
        self.surfaces.len()
    }
}
