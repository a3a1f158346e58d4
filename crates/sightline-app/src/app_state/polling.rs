//! Draining native events into the shell between winit wakeups.

use std::time::{Duration, Instant};

use sightline_shell::Flow;
use winit::event_loop::{ActiveEventLoop, ControlFlow};

use super::core::SightlineApp;

/// Webview callbacks land on the event-loop thread but outside winit's
/// own event stream, so they are picked up on a short timer.
pub(super) const POLL_INTERVAL: Duration = Duration::from_millis(16);

impl SightlineApp {
    pub(super) fn poll_surfaces(&mut self, event_loop: &ActiveEventLoop) {
        let events = self.webviews.drain_events();
        if !events.is_empty() {
            let mut backend = self.webviews.backend(event_loop);
            for event in events {
                if self.controller.handle_event(&mut backend, event) == Flow::Exit {
                    event_loop.exit();
                    return;
                }
            }
        }

        event_loop.set_control_flow(ControlFlow::WaitUntil(Instant::now() + POLL_INTERVAL));
    }
}
