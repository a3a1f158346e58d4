//! SightlineApp struct definition and constructor.

use std::future::Future;
use std::process::ExitCode;

use sightline_common::ShellError;
use sightline_config::SurfaceDescriptor;
use sightline_shell::{
    host_readiness, HostReadiness, LifecycleController, ReadyTrigger, StartupReport,
};
use sightline_webview::WebViewManager;
use tokio::runtime::Runtime;

/// Top-level application state.
pub struct SightlineApp {
    pub(super) controller: LifecycleController,
    pub(super) webviews: WebViewManager,
    pub(super) surfaces: Vec<SurfaceDescriptor>,

    // Fired from the first `resumed`, once native windows can be made.
    pub(super) ready: Option<ReadyTrigger>,
    pub(super) readiness: Option<HostReadiness>,

    // Host futures run here; taken on shutdown.
    pub(super) tokio_runtime: Option<Runtime>,

    pub(super) exit_code: ExitCode,
}

impl SightlineApp {
    pub fn new(
        mut controller: LifecycleController,
        webviews: WebViewManager,
        surfaces: Vec<SurfaceDescriptor>,
        runtime: Runtime,
    ) -> Self {
        controller.on_all_interactive_surfaces_closed(|| {
            tracing::info!("all interactive surfaces closed");
        });
        let (ready, readiness) = host_readiness();
        Self {
            controller,
            webviews,
            surfaces,
            ready: Some(ready),
            readiness: Some(readiness),
            tokio_runtime: Some(runtime),
            exit_code: ExitCode::SUCCESS,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.exit_code
    }
}

/// Drive a host future to completion on the app's runtime from the event
/// loop thread. Fails once the runtime has been shut down.
pub(super) fn run_on_host<F: Future>(
    runtime: Option<&Runtime>,
    future: F,
) -> Result<F::Output, ShellError> {
    match runtime {
        Some(rt) => Ok(rt.block_on(future)),
        None => Err(ShellError::HostNotReady),
    }
}

/// Whether a startup outcome leaves the app without a usable surface.
pub(super) fn startup_is_fatal(outcome: &Result<StartupReport, ShellError>) -> bool {
    match outcome {
        Ok(report) => report.interactive_failure().is_some(),
        Err(_) => true,
    }
}
