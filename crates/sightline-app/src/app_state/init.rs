//! Launch wiring: mode, content root, persisted state, native backend.

use std::path::{Path, PathBuf};

use sightline_config::schema::LogLevel;
use sightline_config::SightlineConfig;
use sightline_platform::DataProfile;
use sightline_shell::{
    LaunchMode, LifecycleController, PlacementStore, ShellContext, SurfaceLoader, SurfaceRegistry,
};
use sightline_webview::{ContentProvider, NavigationPolicy, WebViewManager};

/// Filter directive for the subscriber. A bare level from the command line
/// applies to the sightline crates; anything containing `=` is used as is.
pub fn log_directive(cli: Option<&str>, configured: LogLevel) -> String {
    match cli {
        Some(d) if d.contains('=') => d.to_string(),
        Some(level) => format!("sightline={level}"),
        None => configured.directive().to_string(),
    }
}

/// Runtime that host-side futures (startup, bounded requests) run on.
pub fn build_runtime() -> std::io::Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("sightline-host")
        .enable_all()
        .build()
}

/// Resolve the configured content root. Relative paths are taken from the
/// executable's directory, where packaged content is installed.
pub fn resolve_content_root(root: &Path) -> PathBuf {
    if root.is_absolute() {
        return root.to_path_buf();
    }
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(root)))
        .unwrap_or_else(|| root.to_path_buf())
}

pub fn data_profile(mode: &LaunchMode) -> DataProfile {
    if mode.is_live() {
        DataProfile::Development
    } else {
        DataProfile::Packaged
    }
}

/// Open the placement store for this run, in memory if the platform data
/// directory is unavailable.
pub fn placement_store(profile: DataProfile) -> PlacementStore {
    match sightline_platform::placement_file(profile) {
        Ok(path) => PlacementStore::open(path),
        Err(e) => {
            tracing::warn!(error = %e, "placement will not persist");
            PlacementStore::in_memory()
        }
    }
}

pub fn navigation_policy(mode: &LaunchMode, config: &SightlineConfig) -> NavigationPolicy {
    match mode {
        LaunchMode::Packaged { .. } => NavigationPolicy::packaged(&config.content.scheme),
        LaunchMode::Live { port } => {
            NavigationPolicy::live(&config.content.scheme, &config.dev_server.host, *port)
        }
    }
}

/// Build the shell core for one run.
pub fn build_controller(
    mode: LaunchMode,
    config: &SightlineConfig,
    placements: PlacementStore,
) -> LifecycleController {
    let loader = SurfaceLoader::from_config(mode, config);
    let ctx = ShellContext::new(
        SurfaceRegistry::new(placements),
        loader,
        config.bridge.reveal_surface.clone(),
    );
    LifecycleController::new(ctx).with_devtools(config.dev_server.devtools)
}

/// Build the native backend for one run.
pub fn build_webviews(mode: &LaunchMode, config: &SightlineConfig) -> WebViewManager {
    let mut manager = WebViewManager::new(navigation_policy(mode, config));
    match mode {
        LaunchMode::Packaged { content_root } => {
            manager.set_content_provider(ContentProvider::new(
                content_root.clone(),
                config.content.scheme.clone(),
            ));
        }
        LaunchMode::Live { .. } => {
            manager.set_devtools(config.dev_server.devtools);
        }
    }
    manager
}
