use std::sync::Arc;

use sightline_common::{Placement, ShellError, SurfaceId};
use sightline_shell::{ContentLocation, OpenRequest};
use tracing::{debug, info};
use winit::dpi::{LogicalPosition, LogicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;
use wry::{WebView, WebViewBuilder};

use crate::ipc::IPC_INIT_SCRIPT;

use super::handle::{full_bounds, SurfaceWindow};
use super::WebViewManager;

fn backend_error(context: impl std::fmt::Display, e: impl std::fmt::Display) -> ShellError {
    ShellError::Backend(format!("{context}: {e}"))
}

impl WebViewManager {
    /// Create the window and webview for one surface.
    ///
    /// The bridge shim and every handler are attached before the webview
    /// exists, so the page can talk to the host as soon as it loads.
    pub(super) fn open_surface(
        &mut self,
        event_loop: &ActiveEventLoop,
        request: &OpenRequest<'_>,
    ) -> Result<Placement, ShellError> {
        let mut attrs = Window::default_attributes()
            .with_title(request.title)
            .with_inner_size(LogicalSize::new(request.size.width, request.size.height))
            .with_visible(request.visible);
        if let Some((x, y)) = request.position {
            attrs = attrs.with_position(LogicalPosition::new(x, y));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| backend_error(format_args!("window for '{}'", request.name), e))?;
        let webview = self
            .build_webview(request.id, &window)
            .map_err(|e| backend_error(format_args!("webview for '{}'", request.name), e))?;

        let surface = SurfaceWindow {
            webview,
            window,
            name: request.name.to_string(),
            current_url: "about:blank".to_string(),
        };
        let placement = surface.placement();
        self.by_window.insert(surface.window_id(), request.id);
        self.surfaces.insert(request.id, surface);

        info!(surface = %request.name, id = %request.id, ?placement, "native surface opened");
        Ok(placement)
    }

    fn build_webview(&self, id: SurfaceId, window: &Window) -> Result<WebView, wry::Error> {
        let size = window.inner_size().to_logical::<f64>(window.scale_factor());

        let mut builder = WebViewBuilder::new()
            .with_bounds(full_bounds(size.width, size.height))
            .with_devtools(self.devtools)
            .with_initialization_script(IPC_INIT_SCRIPT);

        builder = Self::attach_ipc_handler(builder, self.events.clone(), id);
        builder = Self::attach_page_load_handler(builder, self.events.clone(), id);
        builder = Self::attach_navigation_handler(builder, Arc::clone(&self.navigation), id);
        builder = self.attach_custom_protocol(builder);

        builder.build_as_child(window)
    }

    /// Start loading `location` into a surface.
    ///
    /// Bundled content is checked up front: a route with nothing behind it
    /// fails here instead of rendering a 404 page.
    pub(super) fn load(
        &mut self,
        id: SurfaceId,
        location: &ContentLocation,
    ) -> Result<(), ShellError> {
        let url = location.as_str();
        if let Some(provider) = &self.content_provider {
            if url.starts_with(&format!("{}://", provider.scheme())) {
                let path = provider.request_path(url);
                if provider.resolve(path).is_none() {
                    return Err(ShellError::Backend(format!(
                        "no bundled content for '{path}' under {}",
                        provider.root().display()
                    )));
                }
            }
        }

        let surface = self.surface_mut(id)?;
        surface
            .load_url(url)
            .map_err(|e| backend_error(format_args!("load {url}"), e))?;
        debug!(%id, url = %url, "load requested");
        Ok(())
    }

    pub(super) fn set_visible(&mut self, id: SurfaceId, visible: bool) -> Result<(), ShellError> {
        self.surface_mut(id)?.set_visible(visible);
        Ok(())
    }

    pub(super) fn close_surface(&mut self, id: SurfaceId) {
        if let Some(surface) = self.surfaces.remove(&id) {
            self.by_window.remove(&surface.window_id());
            debug!(%id, surface = %surface.name(), "native surface destroyed");
        }
    }

    pub(super) fn surface_mut(&mut self, id: SurfaceId) -> Result<&mut SurfaceWindow, ShellError> {
        self.surfaces
            .get_mut(&id)
            .ok_or_else(|| ShellError::Backend(format!("no window for {id}")))
    }
}
