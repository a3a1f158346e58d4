//! Process-wide startup and shutdown sequencing.

mod readiness;
mod report;


use std::collections::HashSet;

use sightline_common::{ShellError, SurfaceId};
use sightline_config::SurfaceDescriptor;
use tracing::{debug, error, info, warn};

use crate::backend::{SurfaceBackend, SurfaceEvent};
use crate::context::ShellContext;
use crate::registry::LoadState;

pub use readiness::{host_readiness, HostReadiness, ReadyTrigger};
pub use report::{StartupReport, SurfaceFailure};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Starting,
    Running,
    ShuttingDown,
    Terminated,
}

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct LifecycleController {
    ctx: ShellContext,
    phase: Phase,
    on_all_closed: Vec<Box<dyn FnOnce()>>,
    open_devtools: bool,
    unsettled: HashSet<SurfaceId>,
    startup_complete: bool,
}

impl LifecycleController {
    pub fn new(ctx: ShellContext) -> Self {
        Self {
            ctx,
            phase: Phase::Idle,
            on_all_closed: Vec::new(),
            open_devtools: false,
            unsettled: HashSet::new(),
            startup_complete: false,
        }
    }

    /// Open developer tools on interactive surfaces when running live.
    pub fn with_devtools(mut self, enabled: bool) -> Self {
        self.open_devtools = enabled;
        self
    }

    pub fn context(&self) -> &ShellContext {
        &self.ctx
    }

    pub fn context_mut(&mut self) -> &mut ShellContext {
        &mut self.ctx
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once every surface's initial load has succeeded or failed.
    pub fn is_startup_complete(&self) -> bool {
        self.startup_complete
    }

    /// Run `callback` once, after the last main-interactive surface closes.
    pub fn on_all_interactive_surfaces_closed(&mut self, callback: impl FnOnce() + 'static) {
        self.on_all_closed.push(Box::new(callback));
    }

    /// Wait for readiness, then create and load every surface.
    ///
    /// Main-interactive surfaces are created first, the rest after, each
    /// group in the given order. A failure on one surface is recorded in
    /// the report and the others still start; a duplicate name aborts.
    pub async fn start<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        readiness: HostReadiness,
        descriptors: &[SurfaceDescriptor],
    ) -> Result<StartupReport, ShellError> {
        if self.phase != Phase::Idle {
            return Err(ShellError::AlreadyStarted);
        }
        self.phase = Phase::Starting;

        if let Err(e) = readiness.await {
            self.phase = Phase::Terminated;
            return Err(e);
        }
        info!(
            surfaces = descriptors.len(),
            mode = %self.ctx.loader.mode(),
            "host ready, starting surfaces"
        );

        let (mut ordered, auxiliary): (Vec<_>, Vec<_>) =
            descriptors.iter().partition(|d| d.interactive);
        ordered.extend(auxiliary);

        let devtools = self.open_devtools && self.ctx.loader.mode().is_live();
        let mut report = StartupReport::default();

        for descriptor in ordered {
            let name = descriptor.name.as_str();
            let id = match self.ctx.registry.create_surface(backend, descriptor) {
                Ok(id) => id,
                Err(e @ ShellError::DuplicateSurface(_)) => {
                    error!(surface = %name, error = %e, "startup aborted");
                    self.ctx.close_all(backend);
                    self.phase = Phase::Terminated;
                    return Err(e);
                }
                Err(e) => {
                    warn!(surface = %name, error = %e, "surface could not be created");
                    report.fail(name, descriptor.interactive, e);
                    continue;
                }
            };
            report.created.push(name.to_string());

            let loaded = self
                .ctx
                .loader
                .resolve_route(name, &descriptor.route)
                .and_then(|location| backend.load(id, &location));
            match loaded {
                Ok(()) => {
                    self.unsettled.insert(id);
                    if devtools && descriptor.interactive {
                        backend.open_devtools(id);
                    }
                }
                Err(e) => {
                    warn!(surface = %name, error = %e, "surface content failed to load");
                    self.ctx
                        .registry
                        .set_load_state(id, LoadState::Failed(e.to_string()));
                    report.fail(name, descriptor.interactive, e);
                }
            }
        }

        self.phase = Phase::Running;
        self.check_startup_complete();
        Ok(report)
    }

    /// Apply one backend event.
    pub fn handle_event<B: SurfaceBackend>(
        &mut self,
        backend: &mut B,
        event: SurfaceEvent,
    ) -> Flow {
        if self.phase == Phase::Terminated {
            return Flow::Exit;
        }

        match event {
            SurfaceEvent::Ipc { surface, body } => {
                self.ctx.handle_ipc(backend, surface, &body);
            }
            SurfaceEvent::LoadFinished { surface, url } => {
                debug!(%surface, url = %url, "content loaded");
                self.ctx.registry.set_load_state(surface, LoadState::Loaded);
                self.settle(surface);
            }
            SurfaceEvent::LoadFailed { surface, error } => {
                warn!(%surface, error = %error, "content load failed");
                self.ctx
                    .registry
                    .set_load_state(surface, LoadState::Failed(error));
                self.settle(surface);
            }
            SurfaceEvent::Moved { surface, x, y } => {
                self.ctx.registry.record_moved(surface, x, y);
            }
            SurfaceEvent::Resized {
                surface,
                width,
                height,
            } => {
                self.ctx.registry.record_resized(surface, width, height);
            }
            SurfaceEvent::CloseRequested { surface } => {
                let Some(closed) = self.ctx.close_surface(backend, surface) else {
                    return Flow::Continue;
                };
                self.settle(surface);
                if closed.last_interactive {
                    info!(surface = %closed.name, "last interactive surface closed");
                    self.shutdown(backend);
                    return Flow::Exit;
                }
            }
        }
        Flow::Continue
    }

    /// Close everything that is still open and run the close callbacks.
    /// Calling it again does nothing.
    pub fn shutdown<B: SurfaceBackend>(&mut self, backend: &mut B) {
        if matches!(self.phase, Phase::ShuttingDown | Phase::Terminated) {
            return;
        }
        self.phase = Phase::ShuttingDown;

        let closed = self.ctx.close_all(backend);
        if !closed.is_empty() {
            debug!(count = closed.len(), "remaining surfaces force-closed");
        }
        for callback in self.on_all_closed.drain(..) {
            callback();
        }

        self.phase = Phase::Terminated;
        info!("shell shut down");
    }

    fn settle(&mut self, id: SurfaceId) {
        if self.unsettled.remove(&id) {
            self.check_startup_complete();
        }
    }

    fn check_startup_complete(&mut self) {
        if self.phase == Phase::Running && !self.startup_complete && self.unsettled.is_empty() {
            self.startup_complete = true;
            info!(surfaces = self.ctx.registry.len(), "startup complete");
        }
    }
}
