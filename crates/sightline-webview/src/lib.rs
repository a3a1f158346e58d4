//! Native surfaces for the Sightline shell.
//!
//! Wraps `winit` windows and `wry` webviews to provide:
//! - One top-level window with a full-size webview per surface
//! - The `window.ipc` shim surfaces use to reach the host
//! - A custom protocol serving bundled content in packaged mode
//! - A navigation allowlist per launch mode
//! - Window and page events queued for the host thread

pub mod content;
pub mod events;
pub mod ipc;
pub mod manager;

pub use content::ContentProvider;
pub use events::{translate_window_event, EventSink};
pub use ipc::{js_dispatch, IPC_INIT_SCRIPT};
pub use manager::{NavigationPolicy, SurfaceWindow, WebViewManager, WinitSurfaces};
