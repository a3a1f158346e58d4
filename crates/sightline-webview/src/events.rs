//! Collecting backend events for the host thread.

use std::sync::{Arc, Mutex, MutexGuard};

use sightline_common::SurfaceId;
use sightline_shell::SurfaceEvent;
use winit::event::WindowEvent;

/// Shared queue that webview callbacks push into and the event loop drains.
#[derive(Clone, Default)]
pub struct EventSink(Arc<Mutex<Vec<SurfaceEvent>>>);

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking webview callback must not cost us queued close requests.
    fn lock(&self) -> MutexGuard<'_, Vec<SurfaceEvent>> {
        self.0.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn push(&self, event: SurfaceEvent) {
        self.lock().push(event);
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<SurfaceEvent> {
        std::mem::take(&mut *self.lock())
    }
}

/// Map a native window event onto the shell's event model.
///
/// Geometry is converted to logical pixels with `scale`. Zero-sized
/// resizes (minimize on Windows) are dropped.
pub fn translate_window_event(
    surface: SurfaceId,
    event: &WindowEvent,
    scale: f64,
) -> Option<SurfaceEvent> {
    match event {
        WindowEvent::Moved(position) => {
            let logical = position.to_logical::<i32>(scale);
            Some(SurfaceEvent::Moved {
                surface,
                x: logical.x,
                y: logical.y,
            })
        }
        WindowEvent::Resized(size) if size.width > 0 && size.height > 0 => {
            let logical = size.to_logical::<u32>(scale);
            Some(SurfaceEvent::Resized {
                surface,
                width: logical.width,
                height: logical.height,
            })
        }
        WindowEvent::CloseRequested => Some(SurfaceEvent::CloseRequested { surface }),
        _ => None,
    }
}
