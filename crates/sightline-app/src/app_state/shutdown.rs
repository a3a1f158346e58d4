//! Graceful shutdown: close every surface, release pending requests,
//! stop the host runtime.

use std::time::Duration;

use winit::event_loop::ActiveEventLoop;

use super::core::SightlineApp;

impl SightlineApp {
    /// Close what is still open. Safe to call more than once; the
    /// controller ignores repeats.
    ///
    /// Surfaces close before the runtime stops, so waiters on their pending
    /// requests see `SurfaceUnavailable` rather than a dropped task.
    pub(super) fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        let mut backend = self.webviews.backend(event_loop);
        self.controller.shutdown(&mut backend);
        tracing::debug!(remaining = self.webviews.count(), "native surfaces after shutdown");

        if let Some(rt) = self.tokio_runtime.take() {
            rt.shutdown_timeout(Duration::from_secs(2));
        }
    }
}
