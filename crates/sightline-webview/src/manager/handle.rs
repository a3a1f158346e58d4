use sightline_common::Placement;
use sightline_shell::OutboundEnvelope;
use winit::window::{Window, WindowId};
use wry::WebView;

/// One native surface: a top-level window with a webview filling it.
pub struct SurfaceWindow {
    // Declared first so the webview is torn down before its parent window.
    pub(super) webview: WebView,
    pub(super) window: Window,
    pub(super) name: String,
    pub(super) current_url: String,
}

impl SurfaceWindow {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn current_url(&self) -> &str {
        &self.current_url
    }

    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    pub fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    pub fn load_url(&mut self, url: &str) -> Result<(), wry::Error> {
        self.webview.load_url(url)?;
        self.current_url = url.to_string();
        Ok(())
    }

    /// Hand an envelope to the page's IPC shim.
    pub fn deliver(&self, envelope: &OutboundEnvelope) -> Result<(), wry::Error> {
        self.webview
            .evaluate_script(&crate::ipc::js_dispatch(envelope))
    }

    pub fn set_visible(&self, visible: bool) {
        self.window.set_visible(visible);
        if visible {
            self.window.focus_window();
        }
    }

    pub fn open_devtools(&self) {
        self.webview.open_devtools();
    }

    /// Stretch the webview over the window's client area.
    pub fn fill_window(&self) -> Result<(), wry::Error> {
        let size = self.window.inner_size().to_logical::<f64>(self.scale_factor());
        self.webview.set_bounds(full_bounds(size.width, size.height))
    }

    /// Current outer position and inner size, in logical pixels.
    pub fn placement(&self) -> Placement {
        let scale = self.scale_factor();
        let (x, y) = self
            .window
            .outer_position()
            .map(|p| {
                let p = p.to_logical::<i32>(scale);
                (p.x, p.y)
            })
            .unwrap_or((0, 0));
        let size = self.window.inner_size().to_logical::<u32>(scale);
        Placement::new(x, y, size.width, size.height)
    }
}

/// Bounds covering a whole client area of the given logical size.
pub(crate) fn full_bounds(width: f64, height: f64) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(width, height)),
    }
}
