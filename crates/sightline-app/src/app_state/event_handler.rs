//! `ApplicationHandler` implementation for the winit event loop.

use std::process::ExitCode;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::WindowId;

use super::core::{run_on_host, startup_is_fatal, SightlineApp};

impl ApplicationHandler for SightlineApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(readiness) = self.readiness.take() else {
            return;
        };
        if let Some(ready) = self.ready.take() {
            ready.fire();
        }

        let outcome = {
            let mut backend = self.webviews.backend(event_loop);
            let start = self.controller.start(&mut backend, readiness, &self.surfaces);
            run_on_host(self.tokio_runtime.as_ref(), start).and_then(|report| report)
        };

        match &outcome {
            Ok(report) if report.is_clean() => {
                tracing::info!(surfaces = report.created.len(), "surfaces started");
            }
            Ok(report) => {
                for failure in &report.failures {
                    tracing::warn!(
                        surface = %failure.surface,
                        interactive = failure.interactive,
                        error = %failure.error,
                        "surface failed to start"
                    );
                }
            }
            Err(e) => tracing::error!(error = %e, "startup failed"),
        }

        if startup_is_fatal(&outcome) {
            self.exit_code = ExitCode::FAILURE;
            self.shutdown(event_loop);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        self.webviews.handle_window_event(window_id, &event);
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        self.poll_surfaces(event_loop);
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}
